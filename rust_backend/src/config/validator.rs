//! Validation of the weekly schedule before it is saved.
//!
//! Every weekday rule must open before it closes and use a slot duration that
//! is positive and fits inside its opening window. The break window must start
//! before it ends. Every time falls on a whole minute, the resolution slots
//! are generated at. Disabled days are validated too, so a day can be re-enabled
//! later without re-checking its hours. A disabled break excludes nothing and
//! its times are only checked once it is switched on.

use std::collections::HashSet;

use crate::core::domain::{BreakWindow, WeekdayRule};
use crate::time::hhmm;

use super::schedule::WeeklyScheduleConfig;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// A configuration that must not be persisted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// `field` is a JSON path such as `workingDays[monday].closeTime`.
    #[error("Invalid config at {field}: {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Path of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::InvalidConfig { field, .. } => field,
        }
    }
}

/// Check a whole configuration, stopping at the first violation.
///
/// # Returns
/// * `Ok(())` - the configuration can be saved
/// * `Err(ConfigError::InvalidConfig)` - naming the first offending field
pub fn validate_config(config: &WeeklyScheduleConfig) -> ConfigResult<()> {
    match collect_issues(config).into_iter().next() {
        Some(issue) => Err(issue),
        None => Ok(()),
    }
}

/// Every violation in the configuration, in document order.
///
/// Used by admin screens to highlight all bad fields at once.
pub fn collect_issues(config: &WeeklyScheduleConfig) -> Vec<ConfigError> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for rule in &config.working_days {
        if !seen.insert(rule.weekday) {
            issues.push(ConfigError::invalid(
                format!("workingDays[{}]", rule.weekday),
                "weekday is configured more than once",
            ));
            continue;
        }
        if let Err(issue) = validate_rule(rule) {
            issues.push(issue);
        }
    }

    if let Err(issue) = validate_break(&config.break_time) {
        issues.push(issue);
    }

    issues
}

/// Check one weekday rule.
pub fn validate_rule(rule: &WeekdayRule) -> ConfigResult<()> {
    let prefix = format!("workingDays[{}]", rule.weekday);

    for (name, time) in [("openTime", rule.open_time), ("closeTime", rule.close_time)] {
        if !hhmm::is_whole_minute(time) {
            return Err(ConfigError::invalid(
                format!("{}.{}", prefix, name),
                format!("{} must fall on a whole minute", time),
            ));
        }
    }

    if rule.open_time >= rule.close_time {
        return Err(ConfigError::invalid(
            format!("{}.closeTime", prefix),
            format!(
                "closing time {} must be after opening time {}",
                hhmm::format(rule.close_time),
                hhmm::format(rule.open_time)
            ),
        ));
    }

    if rule.slot_duration_minutes == 0 {
        return Err(ConfigError::invalid(
            format!("{}.slotDuration", prefix),
            "slot duration must be positive",
        ));
    }

    let window = rule.window_minutes();
    if i64::from(rule.slot_duration_minutes) > window {
        return Err(ConfigError::invalid(
            format!("{}.slotDuration", prefix),
            format!(
                "slot duration of {} minutes exceeds the {} minute opening window",
                rule.slot_duration_minutes, window
            ),
        ));
    }

    Ok(())
}

/// Check the break window.
pub fn validate_break(break_time: &BreakWindow) -> ConfigResult<()> {
    if !break_time.enabled {
        return Ok(());
    }

    for (name, time) in [
        ("startTime", break_time.start_time),
        ("endTime", break_time.end_time),
    ] {
        if !hhmm::is_whole_minute(time) {
            return Err(ConfigError::invalid(
                format!("breakTime.{}", name),
                format!("{} must fall on a whole minute", time),
            ));
        }
    }

    if break_time.start_time >= break_time.end_time {
        return Err(ConfigError::invalid(
            "breakTime.endTime",
            format!(
                "break end {} must be after break start {}",
                hhmm::format(break_time.end_time),
                hhmm::format(break_time.start_time)
            ),
        ));
    }
    Ok(())
}
