//! Source of "now" for past-slot detection.
//!
//! The clock is injected into the availability and recurrence services rather
//! than read ambiently, so tests can pin the current instant.

use chrono::{Local, NaiveDateTime};

/// Provides the current local wall-clock time of the shop.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock frozen at a fixed instant.
///
/// # Examples
///
/// ```
/// use barber_booking::time::{Clock, FixedClock};
/// use chrono::NaiveDate;
///
/// let at = NaiveDate::from_ymd_opt(2026, 10, 19)
///     .unwrap()
///     .and_hms_opt(11, 0, 0)
///     .unwrap();
/// assert_eq!(FixedClock(at).now(), at);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
