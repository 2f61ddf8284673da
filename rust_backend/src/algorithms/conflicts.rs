use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::core::domain::{Booking, Slot, SlotStatus};

/// Mark candidate slots as Booked, Past or Available.
///
/// A slot is `Booked` when an active (non-cancelled) booking on the same date
/// has exactly the slot's start time; this wins over `Past`. Otherwise it is
/// `Past` when its start is strictly earlier than `now`, else `Available`.
///
/// Bookings are matched by exact start time only. A booking made under a
/// different slot duration that merely overlaps a slot is not detected.
///
/// # Arguments
/// * `slots` - Candidate slots, typically from [`super::generate_slots`]
/// * `bookings` - Bookings for the slots' date; cancelled ones are ignored
/// * `now` - Current local time from the injected clock
pub fn resolve_conflicts(slots: Vec<Slot>, bookings: &[Booking], now: NaiveDateTime) -> Vec<Slot> {
    let booked: HashSet<(NaiveDate, NaiveTime)> = bookings
        .iter()
        .filter(|booking| booking.status.is_active())
        .map(|booking| (booking.date, booking.time))
        .collect();

    slots
        .into_iter()
        .map(|mut slot| {
            slot.status = if booked.contains(&(slot.date, slot.time)) {
                SlotStatus::Booked
            } else if slot.starts_at() < now {
                SlotStatus::Past
            } else {
                SlotStatus::Available
            };
            slot
        })
        .collect()
}

/// Only the slots a customer can still pick.
pub fn available_slots(slots: &[Slot]) -> Vec<Slot> {
    slots.iter().filter(|s| s.is_available()).cloned().collect()
}
