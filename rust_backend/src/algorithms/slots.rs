//! Candidate slot generation.
//!
//! One code path serves every grid: a fixed 30 minute grid without a break is
//! simply a rule with `slot_duration_minutes = 30` and a disabled break.

use chrono::NaiveDate;

use crate::config::WeeklyScheduleConfig;
use crate::core::domain::{
    minutes_of_day, time_of_minutes, BreakWindow, Slot, SlotStatus, Weekday, WeekdayRule,
};

/// Generate the candidate slots of `date` for a weekday rule.
///
/// Slots start at `open_time` and step by the slot duration. A slot is kept
/// only if it ends at or before `close_time` and does not overlap the break.
/// Every returned slot is `Available`; conflicts are resolved separately.
///
/// # Arguments
/// * `date` - The calendar date the slots belong to
/// * `rule` - Rule for the date's weekday, `None` if the day is not configured
/// * `break_time` - The daily break window
///
/// # Returns
/// Slots in ascending time order. Empty for a disabled or missing rule, or
/// when the opening window is shorter than one slot.
pub fn generate_slots(
    date: NaiveDate,
    rule: Option<&WeekdayRule>,
    break_time: &BreakWindow,
) -> Vec<Slot> {
    let rule = match rule {
        Some(rule) if rule.enabled => rule,
        _ => return Vec::new(),
    };

    let step = rule.slot_duration_minutes;
    if step == 0 {
        return Vec::new();
    }

    let close = minutes_of_day(rule.close_time);
    let mut start = minutes_of_day(rule.open_time);
    let mut slots = Vec::new();

    while start + step <= close {
        let end = start + step;
        if !break_time.overlaps_minutes(start, end) {
            if let Some(time) = time_of_minutes(start) {
                slots.push(Slot {
                    date,
                    time,
                    duration_minutes: step,
                    status: SlotStatus::Available,
                });
            }
        }
        start = end;
    }

    slots
}

/// Candidate slots for `date` under a full weekly configuration.
pub fn slots_for_date(config: &WeeklyScheduleConfig, date: NaiveDate) -> Vec<Slot> {
    let rule = config.rule_for(Weekday::from_date(date));
    generate_slots(date, rule, &config.break_time)
}

/// Number of slots a weekday offers, for the admin preview.
pub fn slot_count(config: &WeeklyScheduleConfig, weekday: Weekday) -> usize {
    // Any date works as an anchor: the grid depends on the rule only.
    let anchor = NaiveDate::default();
    generate_slots(anchor, config.rule_for(weekday), &config.break_time).len()
}
