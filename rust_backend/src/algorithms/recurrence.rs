//! Expansion of a booking request into a recurring appointment series.
//!
//! Every generated date is re-validated through slot generation and conflict
//! resolution at the requested time. A conflict on one date marks that
//! occurrence as skipped and never aborts the series.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::config::WeeklyScheduleConfig;
use crate::core::domain::{
    minutes_of_day, AppointmentSeries, Booking, Occurrence, OccurrenceOutcome, RecurrenceRequest,
    SkipReason, SlotStatus, Weekday,
};
use crate::time::nth_occurrence_date;

use super::conflicts::resolve_conflicts;
use super::slots::generate_slots;

/// Bookings per date, as fetched for every date a series will touch.
///
/// A date with no bookings maps to an empty list. A date absent from the
/// snapshot was never fetched and fails the expansion.
pub type BookingSnapshot = HashMap<NaiveDate, Vec<Booking>>;

pub type RecurrenceResult<T> = Result<T, RecurrenceError>;

/// A recurrence request that cannot be expanded at all.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecurrenceError {
    #[error("intervalCount must be at least 1")]
    ZeroInterval,

    #[error("occurrenceCount must be at least 1")]
    ZeroOccurrences,

    #[error("occurrence {index} falls outside the supported calendar range")]
    OutOfRange { index: u32 },

    #[error("no bookings were fetched for {date}")]
    MissingSnapshot { date: NaiveDate },
}

/// Check the repeat parameters of a request.
pub fn validate_request(request: &RecurrenceRequest) -> RecurrenceResult<()> {
    if request.interval_count == 0 {
        return Err(RecurrenceError::ZeroInterval);
    }
    if request.occurrence_count == 0 {
        return Err(RecurrenceError::ZeroOccurrences);
    }
    Ok(())
}

/// Dates of every occurrence, starting with `base_date`.
///
/// # Returns
/// * `Ok(Vec<NaiveDate>)` - exactly `occurrence_count` ascending dates
/// * `Err(RecurrenceError)` - for zero counts or dates beyond the calendar
pub fn occurrence_dates(request: &RecurrenceRequest) -> RecurrenceResult<Vec<NaiveDate>> {
    validate_request(request)?;

    (0..request.occurrence_count)
        .map(|index| {
            nth_occurrence_date(
                request.base_date,
                index,
                request.interval_count,
                request.unit,
            )
            .ok_or(RecurrenceError::OutOfRange { index })
        })
        .collect()
}

/// Expand a request into a series, one entry per generated date.
///
/// # Arguments
/// * `request` - Base date/time and repeat parameters
/// * `config` - The resolved weekly configuration
/// * `snapshot` - Bookings for each generated date
/// * `now` - Current local time, for past-slot detection
///
/// # Returns
/// * `Ok(AppointmentSeries)` - `Confirmed` entries for bookable dates and
///   `SkippedConflict` entries, with a reason, for the rest
/// * `Err(RecurrenceError::MissingSnapshot)` - a generated date has no entry in `snapshot`
pub fn expand_recurrence(
    request: &RecurrenceRequest,
    config: &WeeklyScheduleConfig,
    snapshot: &BookingSnapshot,
    now: NaiveDateTime,
) -> RecurrenceResult<AppointmentSeries> {
    let mut occurrences = Vec::new();
    for date in occurrence_dates(request)? {
        let bookings = snapshot
            .get(&date)
            .ok_or(RecurrenceError::MissingSnapshot { date })?;
        occurrences.push(Occurrence {
            date,
            time: request.base_time,
            outcome: evaluate_occurrence(date, request.base_time, config, bookings, now),
        });
    }

    Ok(AppointmentSeries { occurrences })
}

/// Decide a single occurrence by regenerating that date's grid.
pub fn evaluate_occurrence(
    date: NaiveDate,
    time: NaiveTime,
    config: &WeeklyScheduleConfig,
    bookings: &[Booking],
    now: NaiveDateTime,
) -> OccurrenceOutcome {
    let rule = match config.rule_for(Weekday::from_date(date)) {
        Some(rule) if rule.enabled => rule,
        _ => return OccurrenceOutcome::SkippedConflict(SkipReason::DayClosed),
    };

    let requested = minutes_of_day(time);
    let slot = generate_slots(date, Some(rule), &config.break_time)
        .into_iter()
        .find(|slot| minutes_of_day(slot.time) == requested);

    let slot = match slot {
        Some(slot) => slot,
        None => {
            let end = requested + rule.slot_duration_minutes;
            let reason = if config.break_time.overlaps_minutes(requested, end) {
                SkipReason::BreakTime
            } else {
                SkipReason::OffGrid
            };
            return OccurrenceOutcome::SkippedConflict(reason);
        }
    };

    match resolve_conflicts(vec![slot], bookings, now)
        .first()
        .map(|slot| slot.status)
    {
        Some(SlotStatus::Available) => OccurrenceOutcome::Confirmed,
        Some(SlotStatus::Booked) => OccurrenceOutcome::SkippedConflict(SkipReason::Booked),
        Some(SlotStatus::Past) | None => OccurrenceOutcome::SkippedConflict(SkipReason::Past),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{AppointmentId, BookingStatus, RecurrenceUnit};

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn request(
        base_date: NaiveDate,
        base_time: NaiveTime,
        interval: u32,
        unit: RecurrenceUnit,
        count: u32,
    ) -> RecurrenceRequest {
        RecurrenceRequest {
            base_date,
            base_time,
            interval_count: interval,
            unit,
            occurrence_count: count,
        }
    }

    /// Every date of `req` fetched, none booked.
    fn empty_snapshot(req: &RecurrenceRequest) -> BookingSnapshot {
        occurrence_dates(req)
            .unwrap()
            .into_iter()
            .map(|date| (date, Vec::new()))
            .collect()
    }

    fn early_now() -> NaiveDateTime {
        d(2026, 10, 1).and_time(t(8, 0))
    }

    #[test]
    fn test_weekly_from_sunday_stays_on_sunday() {
        let sunday = d(2026, 10, 18);
        let req = request(sunday, t(9, 0), 1, RecurrenceUnit::Week, 3);
        let dates = occurrence_dates(&req).unwrap();
        assert_eq!(dates, vec![sunday, d(2026, 10, 25), d(2026, 11, 1)]);
        assert!(dates.iter().all(|&date| Weekday::from_date(date) == Weekday::Sunday));
    }

    #[test]
    fn test_daily_interval() {
        let req = request(d(2026, 10, 18), t(9, 0), 2, RecurrenceUnit::Day, 3);
        let dates = occurrence_dates(&req).unwrap();
        assert_eq!(dates, vec![d(2026, 10, 18), d(2026, 10, 20), d(2026, 10, 22)]);
    }

    #[test]
    fn test_monthly_clamps_day() {
        let req = request(d(2026, 8, 31), t(9, 0), 1, RecurrenceUnit::Month, 3);
        let dates = occurrence_dates(&req).unwrap();
        assert_eq!(dates, vec![d(2026, 8, 31), d(2026, 9, 30), d(2026, 10, 31)]);
    }

    #[test]
    fn test_zero_counts_rejected() {
        let base = d(2026, 10, 18);
        assert_eq!(
            occurrence_dates(&request(base, t(9, 0), 0, RecurrenceUnit::Day, 3)),
            Err(RecurrenceError::ZeroInterval)
        );
        assert_eq!(
            occurrence_dates(&request(base, t(9, 0), 1, RecurrenceUnit::Day, 0)),
            Err(RecurrenceError::ZeroOccurrences)
        );
    }

    #[test]
    fn test_out_of_range_rejected() {
        let req = request(NaiveDate::MAX, t(9, 0), 1, RecurrenceUnit::Day, 2);
        assert_eq!(occurrence_dates(&req), Err(RecurrenceError::OutOfRange { index: 1 }));
    }

    #[test]
    fn test_conflicts_skip_without_aborting() {
        let config = WeeklyScheduleConfig::default();
        // Sundays 09:00-21:00, 40 minute grid from 09:00.
        let sunday = d(2026, 10, 18);
        let req = request(sunday, t(9, 40), 1, RecurrenceUnit::Week, 3);
        let mut snapshot = empty_snapshot(&req);
        snapshot.insert(
            d(2026, 10, 25),
            vec![Booking {
                id: AppointmentId("apt-1".into()),
                date: d(2026, 10, 25),
                time: t(9, 40),
                status: BookingStatus::Confirmed,
            }],
        );

        let series = expand_recurrence(
            &req,
            &config,
            &snapshot,
            early_now(),
        )
        .unwrap();

        let outcomes: Vec<OccurrenceOutcome> = series.iter().map(|o| o.outcome).collect();
        assert_eq!(
            outcomes,
            vec![
                OccurrenceOutcome::Confirmed,
                OccurrenceOutcome::SkippedConflict(SkipReason::Booked),
                OccurrenceOutcome::Confirmed,
            ]
        );
        assert_eq!(series.confirmed().count(), 2);
        assert_eq!(series.skipped().count(), 1);
    }

    #[test]
    fn test_closed_day_skipped() {
        let config = WeeklyScheduleConfig::default();
        // 2026-10-23 is a Friday, closed by default.
        let req = request(d(2026, 10, 22), t(9, 0), 1, RecurrenceUnit::Day, 2);
        let series = expand_recurrence(
            &req,
            &config,
            &empty_snapshot(&req),
            early_now(),
        )
        .unwrap();
        assert_eq!(series.occurrences[0].outcome, OccurrenceOutcome::Confirmed);
        assert_eq!(
            series.occurrences[1].outcome,
            OccurrenceOutcome::SkippedConflict(SkipReason::DayClosed)
        );
    }

    #[test]
    fn test_break_and_grid_reasons() {
        let config = WeeklyScheduleConfig::default();
        let sunday = d(2026, 10, 18);
        // 12:20 would overlap the 12:00-13:00 break.
        assert_eq!(
            evaluate_occurrence(sunday, t(12, 20), &config, &[], early_now()),
            OccurrenceOutcome::SkippedConflict(SkipReason::BreakTime)
        );
        // 09:20 is not a start on the 40 minute Sunday grid.
        assert_eq!(
            evaluate_occurrence(sunday, t(9, 20), &config, &[], early_now()),
            OccurrenceOutcome::SkippedConflict(SkipReason::OffGrid)
        );
        // 09:20 is a start on the 20 minute Monday grid.
        assert_eq!(
            evaluate_occurrence(d(2026, 10, 19), t(9, 20), &config, &[], early_now()),
            OccurrenceOutcome::Confirmed
        );
    }

    #[test]
    fn test_past_occurrence_skipped() {
        let config = WeeklyScheduleConfig::default();
        let sunday = d(2026, 10, 18);
        let now = sunday.and_time(t(10, 0));
        assert_eq!(
            evaluate_occurrence(sunday, t(9, 0), &config, &[], now),
            OccurrenceOutcome::SkippedConflict(SkipReason::Past)
        );
    }

    #[test]
    fn test_unfetched_date_fails_expansion() {
        let config = WeeklyScheduleConfig::default();
        let req = request(d(2026, 10, 18), t(9, 0), 1, RecurrenceUnit::Week, 3);
        let mut snapshot = empty_snapshot(&req);
        snapshot.remove(&d(2026, 10, 25));

        assert_eq!(
            expand_recurrence(&req, &config, &snapshot, early_now()),
            Err(RecurrenceError::MissingSnapshot {
                date: d(2026, 10, 25)
            })
        );
        assert_eq!(
            expand_recurrence(&req, &config, &BookingSnapshot::new(), early_now()),
            Err(RecurrenceError::MissingSnapshot {
                date: d(2026, 10, 18)
            })
        );
    }

    #[test]
    fn test_single_request_yields_one_entry() {
        let config = WeeklyScheduleConfig::default();
        let req = RecurrenceRequest::single(d(2026, 10, 18), t(9, 0));
        let series = expand_recurrence(
            &req,
            &config,
            &empty_snapshot(&req),
            early_now(),
        )
        .unwrap();
        assert_eq!(series.len(), 1);
        assert!(series.occurrences[0].is_confirmed());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn weekly_series_keeps_weekday_and_spacing(
                offset in 0u64..3650,
                interval in 1u32..5,
                count in 1u32..30,
            ) {
                let base = d(2020, 1, 1) + chrono::Days::new(offset);
                let req = request(base, t(9, 0), interval, RecurrenceUnit::Week, count);
                let dates = occurrence_dates(&req).unwrap();

                prop_assert_eq!(dates.len(), count as usize);
                prop_assert_eq!(dates[0], base);
                for pair in dates.windows(2) {
                    prop_assert_eq!((pair[1] - pair[0]).num_days(), 7 * i64::from(interval));
                    prop_assert_eq!(Weekday::from_date(pair[1]), Weekday::from_date(base));
                }
            }

            #[test]
            fn series_has_one_entry_per_date(
                offset in 0u64..365,
                count in 1u32..20,
            ) {
                let base = d(2026, 10, 1) + chrono::Days::new(offset);
                let req = request(base, t(13, 0), 1, RecurrenceUnit::Day, count);
                let series = expand_recurrence(
                    &req,
                    &WeeklyScheduleConfig::default(),
                    &empty_snapshot(&req),
                    early_now(),
                )
                .unwrap();
                prop_assert_eq!(series.len(), count as usize);
            }
        }
    }
}
