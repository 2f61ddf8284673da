//! Calendar stepping for recurring appointments.

use chrono::{Days, Months, NaiveDate};

use crate::core::domain::RecurrenceUnit;

/// Add `count` units to `date`.
///
/// Months clamp the day-of-month to the last valid day of the target month,
/// so January 31st plus one month is the last day of February.
///
/// # Returns
/// * `Some(NaiveDate)` - the shifted date
/// * `None` - if the result falls outside the representable calendar
///
/// # Examples
///
/// ```
/// use barber_booking::core::domain::RecurrenceUnit;
/// use barber_booking::time::add_units;
/// use chrono::NaiveDate;
///
/// let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
/// assert_eq!(add_units(d(2026, 8, 31), 1, RecurrenceUnit::Month), Some(d(2026, 9, 30)));
/// assert_eq!(add_units(d(2026, 10, 18), 2, RecurrenceUnit::Week), Some(d(2026, 11, 1)));
/// ```
pub fn add_units(date: NaiveDate, count: u64, unit: RecurrenceUnit) -> Option<NaiveDate> {
    match unit {
        RecurrenceUnit::Day => date.checked_add_days(Days::new(count)),
        RecurrenceUnit::Week => date.checked_add_days(Days::new(count.checked_mul(7)?)),
        RecurrenceUnit::Month => {
            let months = u32::try_from(count).ok()?;
            date.checked_add_months(Months::new(months))
        }
    }
}

/// Date of the `index`-th occurrence (zero-based) of a series starting at `base`.
///
/// Each occurrence is measured from `base` rather than from the previous
/// occurrence, so a clamped month does not shorten the following ones.
pub fn nth_occurrence_date(
    base: NaiveDate,
    index: u32,
    interval_count: u32,
    unit: RecurrenceUnit,
) -> Option<NaiveDate> {
    let steps = u64::from(index).checked_mul(u64::from(interval_count))?;
    add_units(base, steps, unit)
}
