//! Errors surfaced by the scheduling services.

use chrono::NaiveDate;
use thiserror::Error;

use crate::algorithms::RecurrenceError;
use crate::config::ConfigError;
use crate::core::domain::{AppointmentId, BookingStatus};
use crate::db::repository::RepositoryError;

pub type SchedulingResult<T> = Result<T, SchedulingError>;

/// Failure of a single service operation.
///
/// An empty day and a skipped occurrence are results, not errors.
#[derive(Debug, Error)]
pub enum SchedulingError {
    /// The configuration was rejected and nothing was written.
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    /// Reading configuration or bookings failed. The caller may retry.
    #[error("Failed to fetch {what}: {source}")]
    FetchFailure {
        what: String,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to persist {what}: {source}")]
    PersistFailure {
        what: String,
        #[source]
        source: RepositoryError,
    },

    /// Creating an appointment of a series failed after earlier ones were
    /// stored. `created` lists those so the caller can report or cancel them.
    #[error(
        "Series booking stopped at {failed_on} after {} appointments were created: {source}",
        .created.len()
    )]
    PartialSeries {
        failed_on: NaiveDate,
        created: Vec<(NaiveDate, AppointmentId)>,
        #[source]
        source: RepositoryError,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Cannot move booking from {from} to {to}")]
    InvalidTransition { from: BookingStatus, to: BookingStatus },
}

impl SchedulingError {
    pub fn fetch(what: impl Into<String>, source: RepositoryError) -> Self {
        Self::FetchFailure {
            what: what.into(),
            source,
        }
    }

    pub fn persist(what: impl Into<String>, source: RepositoryError) -> Self {
        Self::PersistFailure {
            what: what.into(),
            source,
        }
    }

    /// True when repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::FetchFailure { source, .. }
            | Self::PersistFailure { source, .. }
            | Self::PartialSeries { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}

impl From<RecurrenceError> for SchedulingError {
    fn from(err: RecurrenceError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}
