//! Core domain models for the booking engine.
//!
//! This module defines the data structures shared by every layer: weekday
//! rules, the break window, slots, bookings and recurring appointment series.

pub mod domain;

pub use domain::*;
