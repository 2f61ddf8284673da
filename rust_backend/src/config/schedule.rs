//! The persisted weekly schedule.

use chrono::{NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::core::domain::{BreakWindow, Weekday, WeekdayRule};

/// Built-in schedule used when nothing has been saved yet.
///
/// Sunday through Thursday are open 09:00-21:00 with 40 minute slots, except
/// Monday which uses 20 minute slots. Friday (14:00-18:00) and Saturday are
/// closed. Lunch break 12:00-13:00.
static DEFAULT_CONFIG: Lazy<WeeklyScheduleConfig> = Lazy::new(|| {
    let hm = |h: u32, m: u32| NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default();
    let working_days = Weekday::ALL
        .iter()
        .map(|&day| match day {
            Weekday::Monday => WeekdayRule::new(day, hm(9, 0), hm(21, 0), 20),
            Weekday::Friday => WeekdayRule::new(day, hm(14, 0), hm(18, 0), 40).disabled(),
            Weekday::Saturday => WeekdayRule::new(day, hm(9, 0), hm(21, 0), 40).disabled(),
            _ => WeekdayRule::new(day, hm(9, 0), hm(21, 0), 40),
        })
        .collect();

    WeeklyScheduleConfig {
        working_days,
        break_time: BreakWindow::new(hm(12, 0), hm(13, 0)),
        last_updated: None,
    }
});

/// Weekday rules plus the daily break, as stored by the config backend.
///
/// Serializes as `{workingDays, breakTime, lastUpdated}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyScheduleConfig {
    pub working_days: Vec<WeekdayRule>,
    pub break_time: BreakWindow,
    #[serde(default)]
    pub last_updated: Option<NaiveDateTime>,
}

impl WeeklyScheduleConfig {
    pub fn new(working_days: Vec<WeekdayRule>, break_time: BreakWindow) -> Self {
        Self {
            working_days,
            break_time,
            last_updated: None,
        }
    }

    /// Rule configured for `weekday`, if any.
    ///
    /// A missing rule is treated by the slot generator like a closed day.
    pub fn rule_for(&self, weekday: Weekday) -> Option<&WeekdayRule> {
        self.working_days.iter().find(|rule| rule.weekday == weekday)
    }

    /// Mutable access for admin edits (toggling a day, changing hours).
    pub fn rule_for_mut(&mut self, weekday: Weekday) -> Option<&mut WeekdayRule> {
        self.working_days
            .iter_mut()
            .find(|rule| rule.weekday == weekday)
    }

    /// Whether the shop opens at all on `weekday`.
    pub fn is_open_on(&self, weekday: Weekday) -> bool {
        self.rule_for(weekday).is_some_and(|rule| rule.enabled)
    }
}

impl Default for WeeklyScheduleConfig {
    fn default() -> Self {
        DEFAULT_CONFIG.clone()
    }
}
