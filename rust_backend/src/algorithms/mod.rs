//! Scheduling algorithms.
//!
//! Pure, synchronous functions over immutable inputs. Nothing here performs
//! I/O; booking snapshots are fetched by the service layer and passed in.
//!
//! # Components
//!
//! - [`slots`]: candidate slot generation from a weekday rule and the break window
//! - [`conflicts`]: Booked/Past/Available resolution against bookings and a clock
//! - [`recurrence`]: expansion of one request into a validated appointment series
//!
//! # Example
//!
//! ```
//! use barber_booking::algorithms::{generate_slots, resolve_conflicts};
//! use barber_booking::core::domain::{BreakWindow, Weekday, WeekdayRule};
//! use chrono::{NaiveDate, NaiveTime};
//!
//! let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
//! let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
//! let rule = WeekdayRule::new(Weekday::Sunday, t(9, 0), t(12, 0), 40);
//!
//! let candidates = generate_slots(date, Some(&rule), &BreakWindow::disabled());
//! let now = date.and_hms_opt(8, 0, 0).unwrap();
//! let slots = resolve_conflicts(candidates, &[], now);
//! assert_eq!(slots.iter().filter(|s| s.is_available()).count(), 4);
//! ```

pub mod conflicts;
pub mod recurrence;
pub mod slots;


pub use conflicts::{available_slots, resolve_conflicts};
pub use recurrence::{
    expand_recurrence, occurrence_dates, BookingSnapshot, RecurrenceError, RecurrenceResult,
};
pub use slots::{generate_slots, slot_count, slots_for_date};
