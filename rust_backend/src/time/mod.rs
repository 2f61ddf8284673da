//! Time-of-day encoding, calendar arithmetic and the injectable clock.

pub mod calendar;
pub mod clock;
pub mod hhmm;

pub use calendar::{add_units, nth_occurrence_date};
pub use clock::{Clock, FixedClock, SystemClock};
