//! Booking a single or recurring appointment.

use std::sync::Arc;

use chrono::NaiveDate;
use log::{info, warn};
use serde::Serialize;

use crate::algorithms::{expand_recurrence, occurrence_dates, BookingSnapshot};
use crate::config::WeeklyScheduleConfig;
use crate::core::domain::{
    AppointmentDetails, AppointmentId, AppointmentSeries, NewAppointment, RecurrenceRequest,
};
use crate::db::repo_config::BookingSettings;
use crate::db::repository::BookingRepository;
use crate::db::services::fetch_bookings;
use crate::error::{SchedulingError, SchedulingResult};
use crate::time::Clock;

/// Outcome of [`SeriesBookingService::book_series`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookedSeries {
    /// Every generated occurrence with its outcome.
    pub series: AppointmentSeries,
    /// Appointments created for the confirmed occurrences, in date order.
    pub created: Vec<(NaiveDate, AppointmentId)>,
}

impl BookedSeries {
    pub fn skipped_count(&self) -> usize {
        self.series.len() - self.created.len()
    }
}

pub struct SeriesBookingService {
    config: WeeklyScheduleConfig,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    settings: BookingSettings,
}

impl SeriesBookingService {
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
        }
    }

    pub fn with_settings(mut self, settings: BookingSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Book every bookable occurrence of a request.
    ///
    /// Bookings of each generated date are fetched first; any fetch failure
    /// aborts before anything is created. Occurrences that conflict are
    /// skipped with a reason and never abort the rest. Each confirmed
    /// occurrence becomes a `pending` appointment carrying `template`.
    ///
    /// # Arguments
    /// * `request` - Base date/time and repeat parameters
    /// * `template` - Service, barber and customer shared by all occurrences
    ///
    /// # Returns
    /// * `Ok(BookedSeries)` - Series plus the ids of the created appointments
    /// * `Err(SchedulingError::InvalidRequest)` - Zero or too many occurrences, zero interval
    /// * `Err(SchedulingError::FetchFailure)` - A date's bookings could not be read
    /// * `Err(SchedulingError::PartialSeries)` - Creating an appointment failed; carries
    ///   the failing date and the appointments created before it
    pub async fn book_series(
        &self,
        request: &RecurrenceRequest,
        template: &AppointmentDetails,
    ) -> SchedulingResult<BookedSeries> {
        if request.occurrence_count > self.settings.max_occurrences {
            return Err(SchedulingError::InvalidRequest(format!(
                "occurrenceCount {} exceeds the limit of {}",
                request.occurrence_count, self.settings.max_occurrences
            )));
        }

        let mut snapshot = BookingSnapshot::new();
        for date in occurrence_dates(request)? {
            let bookings = fetch_bookings(self.bookings.as_ref(), date).await?;
            snapshot.insert(date, bookings);
        }

        let series = expand_recurrence(request, &self.config, &snapshot, self.clock.now())?;

        for (occurrence, reason) in series.skipped() {
            warn!(
                "Series booking: skipping {} {} ({})",
                occurrence.date,
                occurrence.time.format("%H:%M"),
                reason.as_str()
            );
        }

        let mut created = Vec::new();
        for occurrence in series.confirmed() {
            let appointment =
                NewAppointment::pending(occurrence.date, occurrence.time, template.clone());
            match self.bookings.create(&appointment).await {
                Ok(id) => created.push((occurrence.date, id)),
                Err(e) => {
                    warn!(
                        "Series booking: create failed on {} after {} appointments: {}",
                        occurrence.date,
                        created.len(),
                        e
                    );
                    return Err(SchedulingError::PartialSeries {
                        failed_on: occurrence.date,
                        created,
                        source: e,
                    });
                }
            }
        }

        info!(
            "Series booking: {} of {} occurrences booked from {}",
            created.len(),
            series.len(),
            request.base_date
        );

        Ok(BookedSeries { series, created })
    }
}
