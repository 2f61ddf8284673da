//! Barber booking engine - availability and scheduling core.
//!
//! Turns an admin-defined weekly schedule into bookable time slots, resolves
//! them against existing bookings and the current time, and expands recurring
//! booking requests into series with per-occurrence conflict outcomes.
//!
//! # Layout
//! - [`core`]: domain types (weekday rules, slots, bookings, series)
//! - [`time`]: `HH:MM` encoding, calendar arithmetic, injectable clock
//! - [`config`]: weekly schedule configuration and its validation
//! - [`algorithms`]: slot generation, conflict resolution, recurrence expansion
//! - [`db`]: repository traits, local and file backends, storage services
//! - [`services`]: availability and series booking services
//!
//! # Example
//!
//! ```
//! use barber_booking::algorithms::{resolve_conflicts, slots_for_date};
//! use barber_booking::config::WeeklyScheduleConfig;
//! use chrono::NaiveDate;
//!
//! let config = WeeklyScheduleConfig::default();
//! let sunday = NaiveDate::from_ymd_opt(2026, 10, 25).unwrap();
//! let now = NaiveDate::from_ymd_opt(2026, 10, 19)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//!
//! let slots = resolve_conflicts(slots_for_date(&config, sunday), &[], now);
//! assert_eq!(slots.len(), 16);
//! ```

pub mod algorithms;
pub mod config;
pub mod core;
pub mod db;
pub mod error;
pub mod services;
pub mod time;

pub use error::{SchedulingError, SchedulingResult};
