//! Availability for the customer date picker and time grid.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use log::debug;
use serde::Serialize;

use crate::algorithms::{resolve_conflicts, slot_count, slots_for_date};
use crate::config::WeeklyScheduleConfig;
use crate::core::domain::{Slot, Weekday};
use crate::db::repo_config::BookingSettings;
use crate::db::repository::{BookingRepository, ConfigStore};
use crate::db::services::{fetch_bookings, load_schedule_config};
use crate::error::SchedulingResult;
use crate::time::Clock;

/// Identifies one date selection.
///
/// Each call to [`AvailabilityService::begin`] supersedes every earlier
/// token; results computed for a superseded token are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionToken {
    sequence: u64,
    date: NaiveDate,
}

impl SelectionToken {
    pub fn date(&self) -> NaiveDate {
        self.date
    }
}

/// Resolved slot grid of one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    /// Every candidate slot with its status, in time order.
    pub slots: Vec<Slot>,
}

impl DayAvailability {
    /// False for a closed or fully booked day. This is a normal result.
    pub fn has_availability(&self) -> bool {
        self.slots.iter().any(Slot::is_available)
    }

    pub fn available(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().filter(|s| s.is_available())
    }
}

pub struct AvailabilityService {
    config: WeeklyScheduleConfig,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    settings: BookingSettings,
    sequence: AtomicU64,
}

impl AvailabilityService {
    pub fn new(
        config: WeeklyScheduleConfig,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            bookings,
            clock,
            settings: BookingSettings::default(),
            sequence: AtomicU64::new(0),
        }
    }

    /// Build a service around the stored configuration, or the defaults.
    ///
    /// # Returns
    /// * `Err(SchedulingError::FetchFailure)` - If the config store could not be read
    pub async fn from_store(
        store: &dyn ConfigStore,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
    ) -> SchedulingResult<Self> {
        let config = load_schedule_config(store).await?;
        Ok(Self::new(config, bookings, clock))
    }

    pub fn with_settings(mut self, settings: BookingSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn config(&self) -> &WeeklyScheduleConfig {
        &self.config
    }

    /// Start a new selection for `date`, superseding all earlier ones.
    pub fn begin(&self, date: NaiveDate) -> SelectionToken {
        let sequence = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        SelectionToken { sequence, date }
    }

    /// Whether no later selection has started since `token`.
    pub fn is_current(&self, token: &SelectionToken) -> bool {
        self.sequence.load(Ordering::SeqCst) == token.sequence
    }

    /// Compute the slot grid for the token's date.
    ///
    /// Awaits the booking fetch, then generates and resolves the slots.
    ///
    /// # Returns
    /// * `Ok(Some(DayAvailability))` - Grid for the current selection
    /// * `Ok(None)` - The selection was superseded while the fetch was pending
    /// * `Err(SchedulingError::FetchFailure)` - Bookings could not be read
    pub async fn day_availability(
        &self,
        token: &SelectionToken,
    ) -> SchedulingResult<Option<DayAvailability>> {
        let fetched = fetch_bookings(self.bookings.as_ref(), token.date).await;

        // A superseded selection is dropped whatever the fetch returned.
        if !self.is_current(token) {
            debug!(
                "Availability: discarding stale selection {} for {}",
                token.sequence, token.date
            );
            return Ok(None);
        }

        let bookings = fetched?;
        let candidates = slots_for_date(&self.config, token.date);
        let slots = resolve_conflicts(candidates, &bookings, self.clock.now());

        debug!(
            "Availability: {} of {} slots open on {}",
            slots.iter().filter(|s| s.is_available()).count(),
            slots.len(),
            token.date
        );

        Ok(Some(DayAvailability {
            date: token.date,
            slots,
        }))
    }

    /// Open dates for the date picker.
    ///
    /// Scans `horizon_days` days starting at `from` and keeps days whose
    /// weekday is enabled, stopping after `max_listed_dates`.
    pub fn upcoming_dates(&self, from: NaiveDate) -> Vec<NaiveDate> {
        (0..u64::from(self.settings.horizon_days))
            .filter_map(|offset| from.checked_add_days(Days::new(offset)))
            .filter(|date| self.config.is_open_on(Weekday::from_date(*date)))
            .take(self.settings.max_listed_dates)
            .collect()
    }

    /// Candidate slots per weekday, Sunday first.
    pub fn slot_counts(&self) -> Vec<(Weekday, usize)> {
        Weekday::ALL
            .iter()
            .map(|&weekday| (weekday, slot_count(&self.config, weekday)))
            .collect()
    }
}
