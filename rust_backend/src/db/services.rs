//! High-level storage service layer.
//!
//! These functions work with any implementation of the repository traits and
//! hold the rules that must hold regardless of the backend: validation before
//! a save, fingerprint deduplication, stamping `lastUpdated`, filtering out
//! cancelled bookings and the booking status workflow.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (booking flow, admin screen)         │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Config validation and deduplication                  │
//! │  - Active booking filter, status workflow               │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Traits (repository/)                        │
//! │  - ConfigStore, BookingRepository                       │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────┴────────────────┐
//!     │                                 │
//! ┌───▼──────────────┐     ┌──────────▼──────────────┐
//! │ FileConfigStore  │     │ Local Repository        │
//! │ (JSON document)  │     │ (in-memory)             │
//! └──────────────────┘     └─────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use barber_booking::db::{services, repositories::LocalRepository};
//! use barber_booking::config::WeeklyScheduleConfig;
//! use barber_booking::time::SystemClock;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let config = services::load_schedule_config(&repo).await?;
//!     assert_eq!(config, WeeklyScheduleConfig::default());
//!
//!     let saved = services::save_schedule_config(&repo, &config, &SystemClock).await?;
//!     assert!(saved.written);
//!     Ok(())
//! }
//! ```

use chrono::NaiveDate;
use log::{debug, info, warn};

use super::checksum::config_fingerprint;
use super::repository::{BookingRepository, ConfigStore, RepositoryResult};
use crate::config::{validate_config, WeeklyScheduleConfig};
use crate::core::domain::{AppointmentId, Booking, BookingStatus};
use crate::error::{SchedulingError, SchedulingResult};
use crate::time::Clock;

/// Result of [`save_schedule_config`].
#[derive(Debug, Clone, PartialEq)]
pub struct SavedConfig {
    /// The configuration as it is now stored.
    pub config: WeeklyScheduleConfig,
    /// False when the stored rules were already identical and nothing was written.
    pub written: bool,
}

// ==================== Health & Connection ====================

/// Check if the booking backend is healthy.
///
/// # Returns
/// * `Ok(true)` if the backend answers
/// * `Err` if check fails
pub async fn health_check<R>(repo: &R) -> RepositoryResult<bool>
where
    R: BookingRepository + ?Sized,
{
    repo.health_check().await
}

// ==================== Schedule Configuration ====================

/// Load the weekly schedule, falling back to the built-in defaults.
///
/// # Arguments
/// * `store` - Configuration store
///
/// # Returns
/// * `Ok(WeeklyScheduleConfig)` - Stored configuration, or defaults if none was saved
/// * `Err(SchedulingError::FetchFailure)` - If the store could not be read
pub async fn load_schedule_config<S>(store: &S) -> SchedulingResult<WeeklyScheduleConfig>
where
    S: ConfigStore + ?Sized,
{
    match store.get().await {
        Ok(Some(config)) => {
            info!(
                "Service layer: loaded schedule config ({} weekday rules, last updated {:?})",
                config.working_days.len(),
                config.last_updated
            );
            Ok(config)
        }
        Ok(None) => {
            info!("Service layer: no stored schedule config, using defaults");
            Ok(WeeklyScheduleConfig::default())
        }
        Err(e) => {
            warn!("Service layer: failed to load schedule config: {}", e);
            Err(SchedulingError::fetch("schedule config", e))
        }
    }
}

/// Validate and store a weekly schedule.
///
/// This function orchestrates the save:
/// 1. Validate every rule and the break window; an invalid config is never written
/// 2. Compare the fingerprint with the stored config and skip identical saves
/// 3. Stamp `lastUpdated` from `clock` and write the whole document at once
///
/// # Arguments
/// * `store` - Configuration store
/// * `config` - Configuration edited by the admin
/// * `clock` - Source of the `lastUpdated` stamp
///
/// # Returns
/// * `Ok(SavedConfig)` - Stored configuration and whether a write happened
/// * `Err(SchedulingError::InvalidConfig)` - Naming the first offending field
/// * `Err(SchedulingError::FetchFailure | PersistFailure)` - If the store fails
pub async fn save_schedule_config<S>(
    store: &S,
    config: &WeeklyScheduleConfig,
    clock: &dyn Clock,
) -> SchedulingResult<SavedConfig>
where
    S: ConfigStore + ?Sized,
{
    if let Err(e) = validate_config(config) {
        warn!("Service layer: rejected schedule config: {}", e);
        return Err(e.into());
    }

    let fingerprint =
        config_fingerprint(config).map_err(|e| SchedulingError::persist("schedule config", e))?;

    let stored = store
        .get()
        .await
        .map_err(|e| SchedulingError::fetch("schedule config", e))?;

    if let Some(existing) = stored {
        let existing_fingerprint = config_fingerprint(&existing)
            .map_err(|e| SchedulingError::persist("schedule config", e))?;
        if existing_fingerprint == fingerprint {
            info!(
                "Service layer: schedule config unchanged (fingerprint {}), skipping write",
                &fingerprint[..12]
            );
            return Ok(SavedConfig {
                config: existing,
                written: false,
            });
        }
    }

    let mut to_store = config.clone();
    to_store.last_updated = Some(clock.now());

    store
        .put(&to_store)
        .await
        .map_err(|e| SchedulingError::persist("schedule config", e))?;

    info!(
        "Service layer: saved schedule config (fingerprint {}, {} open days)",
        &fingerprint[..12],
        to_store.working_days.iter().filter(|r| r.enabled).count()
    );

    Ok(SavedConfig {
        config: to_store,
        written: true,
    })
}

// ==================== Bookings ====================

/// Active bookings on a date.
///
/// Cancelled bookings never block a slot and are dropped here.
///
/// # Returns
/// * `Ok(Vec<Booking>)` - Active bookings, possibly empty
/// * `Err(SchedulingError::FetchFailure)` - Never reported as an empty day
pub async fn fetch_bookings<R>(repo: &R, date: NaiveDate) -> SchedulingResult<Vec<Booking>>
where
    R: BookingRepository + ?Sized,
{
    let bookings = repo.list_by_date(date).await.map_err(|e| {
        warn!("Service layer: failed to fetch bookings for {}: {}", date, e);
        SchedulingError::fetch(format!("bookings for {}", date), e)
    })?;

    let total = bookings.len();
    let active: Vec<Booking> = bookings.into_iter().filter(|b| b.status.is_active()).collect();
    debug!(
        "Service layer: {} active of {} bookings on {}",
        active.len(),
        total,
        date
    );
    Ok(active)
}

/// Move a booking along the front-desk workflow.
///
/// # Arguments
/// * `repo` - Booking repository
/// * `id` - Appointment to update
/// * `to` - Requested status
///
/// # Returns
/// * `Ok(Booking)` - The booking with its new status
/// * `Err(SchedulingError::InvalidTransition)` - If the workflow forbids the move
pub async fn update_booking_status<R>(
    repo: &R,
    id: &AppointmentId,
    to: BookingStatus,
) -> SchedulingResult<Booking>
where
    R: BookingRepository + ?Sized,
{
    let mut booking = repo
        .get_booking(id)
        .await
        .map_err(|e| SchedulingError::fetch(format!("appointment {}", id), e))?;

    if !booking.status.can_transition_to(to) {
        warn!(
            "Service layer: refused status change of {} from {} to {}",
            id, booking.status, to
        );
        return Err(SchedulingError::InvalidTransition {
            from: booking.status,
            to,
        });
    }

    repo.update(id, to)
        .await
        .map_err(|e| SchedulingError::persist(format!("appointment {}", id), e))?;

    info!("Service layer: appointment {} {} -> {}", id, booking.status, to);
    booking.status = to;
    Ok(booking)
}
