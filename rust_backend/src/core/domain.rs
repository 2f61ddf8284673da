//! Domain models for weekly business hours, slots, bookings and recurring series.
//!
//! This module provides the core data structures shared by the scheduling
//! algorithms, the repositories and the service layer. Configuration types
//! ([`WeekdayRule`], [`BreakWindow`]) serialize to the same camelCase JSON the
//! booking frontend stores; derived types ([`Slot`], [`AppointmentSeries`]) are
//! transient and never persisted.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::time::hhmm;

/// Day of the week, ordered Sunday first as the booking calendar displays it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays, Sunday through Saturday.
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Weekday a calendar date falls on.
    ///
    /// # Examples
    ///
    /// ```
    /// use barber_booking::core::domain::Weekday;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
    /// assert_eq!(Weekday::from_date(date), Weekday::Sunday);
    /// ```
    pub fn from_date(date: NaiveDate) -> Self {
        Self::ALL[date.weekday().num_days_from_sunday() as usize]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.as_str() == s.to_lowercase())
            .ok_or_else(|| format!("Unknown weekday: {}", s))
    }
}

/// Operating rules for one day of the week.
///
/// A rule is valid when `open_time < close_time` and the slot duration is
/// positive and fits inside the opening window. Validation happens in
/// [`crate::config::validator`] before a configuration is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekdayRule {
    #[serde(rename = "id")]
    pub weekday: Weekday,
    pub enabled: bool,
    #[serde(with = "hhmm")]
    pub open_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub close_time: NaiveTime,
    #[serde(rename = "slotDuration")]
    pub slot_duration_minutes: u32,
}

impl WeekdayRule {
    /// Creates an enabled rule.
    pub fn new(
        weekday: Weekday,
        open_time: NaiveTime,
        close_time: NaiveTime,
        slot_duration_minutes: u32,
    ) -> Self {
        Self {
            weekday,
            enabled: true,
            open_time,
            close_time,
            slot_duration_minutes,
        }
    }

    /// Same rule with the day switched off.
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Length of the opening window in minutes. Negative for an inverted window.
    pub fn window_minutes(&self) -> i64 {
        i64::from(minutes_of_day(self.close_time)) - i64::from(minutes_of_day(self.open_time))
    }
}

/// Daily exclusion interval, applied identically to every enabled day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakWindow {
    pub enabled: bool,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
}

impl BreakWindow {
    /// An enabled break from `start_time` to `end_time`.
    pub fn new(start_time: NaiveTime, end_time: NaiveTime) -> Self {
        Self {
            enabled: true,
            start_time,
            end_time,
        }
    }

    /// A break that never excludes anything.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            start_time: NaiveTime::default(),
            end_time: NaiveTime::default(),
        }
    }

    /// Whether the half-open slot `[slot_start, slot_end)` intersects the
    /// half-open break `[start_time, end_time)`.
    ///
    /// A slot ending exactly when the break starts, or starting exactly when
    /// it ends, does not overlap.
    ///
    /// # Examples
    ///
    /// ```
    /// use barber_booking::core::domain::BreakWindow;
    /// use chrono::NaiveTime;
    ///
    /// let t = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
    /// let lunch = BreakWindow::new(t(12, 0), t(13, 0));
    ///
    /// assert!(!lunch.overlaps(t(11, 20), t(12, 0)));
    /// assert!(lunch.overlaps(t(11, 40), t(12, 20)));
    /// assert!(!lunch.overlaps(t(13, 0), t(13, 40)));
    /// ```
    pub fn overlaps(&self, slot_start: NaiveTime, slot_end: NaiveTime) -> bool {
        self.overlaps_minutes(minutes_of_day(slot_start), minutes_of_day(slot_end))
    }

    /// Minute-of-day variant of [`BreakWindow::overlaps`]. `slot_end` may run
    /// past midnight (values above 1440).
    pub fn overlaps_minutes(&self, slot_start: u32, slot_end: u32) -> bool {
        self.enabled
            && slot_start < minutes_of_day(self.end_time)
            && minutes_of_day(self.start_time) < slot_end
    }
}

/// Availability of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Available,
    Past,
    Booked,
}

/// A bookable time interval derived from a weekday rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: u32,
    pub status: SlotStatus,
}

impl Slot {
    /// Start of the slot as a local date-time.
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }

    /// End of the slot as a local date-time.
    pub fn ends_at(&self) -> NaiveDateTime {
        self.starts_at() + Duration::minutes(i64::from(self.duration_minutes))
    }

    pub fn is_available(&self) -> bool {
        self.status == SlotStatus::Available
    }
}

/// Lifecycle status of an appointment held by the booking backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in-progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no-show",
        }
    }

    /// Every status except `cancelled` occupies its slot.
    pub fn is_active(&self) -> bool {
        *self != BookingStatus::Cancelled
    }

    /// Allowed moves in the front-desk workflow.
    ///
    /// `pending` is confirmed or cancelled, a confirmed appointment starts,
    /// is cancelled or is marked as a no-show, and a started one completes.
    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, next),
            (Pending, Confirmed)
                | (Pending, Cancelled)
                | (Confirmed, InProgress)
                | (Confirmed, NoShow)
                | (Confirmed, Cancelled)
                | (InProgress, Completed)
        )
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier assigned by the booking backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppointmentId(pub String);

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An existing appointment as seen by the scheduling core (read-only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub id: AppointmentId,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub status: BookingStatus,
}

/// Who and what an appointment is for. Opaque to the scheduling core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentDetails {
    pub service: Option<String>,
    pub barber: Option<String>,
    pub customer: Option<String>,
    pub notes: Option<String>,
}

/// Appointment submitted to the booking backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAppointment {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    #[serde(flatten)]
    pub details: AppointmentDetails,
    pub status: BookingStatus,
}

impl NewAppointment {
    /// A `pending` appointment at the given date and time.
    pub fn pending(date: NaiveDate, time: NaiveTime, details: AppointmentDetails) -> Self {
        Self {
            date,
            time,
            details,
            status: BookingStatus::Pending,
        }
    }
}

/// Unit of the repeat interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceUnit {
    Day,
    Week,
    Month,
}

/// A booking request that repeats `occurrence_count` times, every
/// `interval_count` units, starting at `base_date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceRequest {
    pub base_date: NaiveDate,
    #[serde(with = "hhmm")]
    pub base_time: NaiveTime,
    pub interval_count: u32,
    pub unit: RecurrenceUnit,
    pub occurrence_count: u32,
}

impl RecurrenceRequest {
    /// A one-off booking: a series of exactly one occurrence.
    pub fn single(base_date: NaiveDate, base_time: NaiveTime) -> Self {
        Self {
            base_date,
            base_time,
            interval_count: 1,
            unit: RecurrenceUnit::Day,
            occurrence_count: 1,
        }
    }
}

/// Why an occurrence could not be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SkipReason {
    /// The weekday is disabled or has no rule.
    DayClosed,
    /// The requested time falls inside the break window.
    BreakTime,
    /// The requested time is not a slot start on that day's grid.
    OffGrid,
    /// An active booking already holds the slot.
    Booked,
    /// The slot has already started.
    Past,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::DayClosed => "day closed",
            SkipReason::BreakTime => "break time",
            SkipReason::OffGrid => "not a slot start",
            SkipReason::Booked => "already booked",
            SkipReason::Past => "in the past",
        }
    }
}

/// Terminal state of one occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "reason")]
pub enum OccurrenceOutcome {
    Confirmed,
    SkippedConflict(SkipReason),
}

/// One dated entry of an [`AppointmentSeries`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub outcome: OccurrenceOutcome,
}

impl Occurrence {
    pub fn is_confirmed(&self) -> bool {
        self.outcome == OccurrenceOutcome::Confirmed
    }
}

/// Ordered result of a recurrence expansion, skipped entries included.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentSeries {
    pub occurrences: Vec<Occurrence>,
}

impl AppointmentSeries {
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter()
    }

    /// Occurrences that can be submitted to the booking backend.
    pub fn confirmed(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(|o| o.is_confirmed())
    }

    /// Occurrences skipped because of a conflict, with their reasons.
    pub fn skipped(&self) -> impl Iterator<Item = (&Occurrence, SkipReason)> {
        self.occurrences.iter().filter_map(|o| match o.outcome {
            OccurrenceOutcome::SkippedConflict(reason) => Some((o, reason)),
            OccurrenceOutcome::Confirmed => None,
        })
    }
}

/// Minutes since midnight for a time of day, ignoring seconds.
pub fn minutes_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Inverse of [`minutes_of_day`]. `None` at or past midnight of the next day.
pub fn time_of_minutes(minutes: u32) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_weekday_from_date_sunday_first() {
        let sunday = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();
        assert_eq!(Weekday::from_date(sunday), Weekday::Sunday);
        assert_eq!(Weekday::from_date(sunday.succ_opt().unwrap()), Weekday::Monday);
        let saturday = NaiveDate::from_ymd_opt(2026, 10, 24).unwrap();
        assert_eq!(Weekday::from_date(saturday), Weekday::Saturday);
    }

    #[test]
    fn test_weekday_parse_case_insensitive() {
        assert_eq!("Friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert!("funday".parse::<Weekday>().is_err());
    }

    #[test]
    fn test_break_overlap_half_open() {
        let lunch = BreakWindow::new(t(12, 0), t(13, 0));
        assert!(!lunch.overlaps(t(11, 20), t(12, 0)));
        assert!(!lunch.overlaps(t(13, 0), t(13, 40)));
        assert!(lunch.overlaps(t(12, 20), t(12, 40)));
        assert!(lunch.overlaps(t(11, 30), t(13, 30)));
    }

    #[test]
    fn test_disabled_break_never_overlaps() {
        let mut lunch = BreakWindow::new(t(12, 0), t(13, 0));
        lunch.enabled = false;
        assert!(!lunch.overlaps(t(12, 0), t(13, 0)));
        assert!(!BreakWindow::disabled().overlaps(t(0, 0), t(23, 59)));
    }

    #[test]
    fn test_status_workflow() {
        assert!(BookingStatus::Pending.can_transition_to(BookingStatus::Confirmed));
        assert!(BookingStatus::Confirmed.can_transition_to(BookingStatus::InProgress));
        assert!(BookingStatus::InProgress.can_transition_to(BookingStatus::Completed));
        assert!(!BookingStatus::Completed.can_transition_to(BookingStatus::Pending));
        assert!(!BookingStatus::Cancelled.can_transition_to(BookingStatus::Confirmed));
        assert!(!BookingStatus::Cancelled.is_active());
        assert!(BookingStatus::NoShow.is_active());
    }

    #[test]
    fn test_rule_json_matches_frontend_shape() {
        let rule = WeekdayRule::new(Weekday::Monday, t(9, 0), t(21, 0), 20);
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["id"], "monday");
        assert_eq!(json["openTime"], "09:00");
        assert_eq!(json["closeTime"], "21:00");
        assert_eq!(json["slotDuration"], 20);
    }

    #[test]
    fn test_booking_status_kebab_case() {
        let status: BookingStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(status, BookingStatus::InProgress);
        assert_eq!(serde_json::to_string(&BookingStatus::NoShow).unwrap(), "\"no-show\"");
    }
}
