//! Service layer for the booking flow and the admin screen.
//!
//! Services own their collaborators (configuration snapshot, booking
//! repository, clock) and orchestrate the storage services in
//! [`crate::db::services`] with the pure algorithms in [`crate::algorithms`].
//! The only suspension point is the booking fetch.

pub mod availability;
pub mod booking;

pub use availability::{AvailabilityService, DayAvailability, SelectionToken};
pub use booking::{BookedSeries, SeriesBookingService};
