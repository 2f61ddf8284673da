//! In-memory local repository implementation.
//!
//! This module provides a local implementation of both repository traits
//! suitable for unit testing and local development. All data is stored in
//! memory, providing fast, deterministic, and isolated execution.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::config::WeeklyScheduleConfig;
use crate::core::domain::{AppointmentId, Booking, BookingStatus, NewAppointment};
use crate::db::repository::*;

/// In-memory local repository.
///
/// Serves both the schedule configuration and the appointments. Clones share
/// the same underlying data.
///
/// # Example
/// ```
/// use barber_booking::db::repositories::LocalRepository;
/// use barber_booking::db::repository::ConfigStore;
///
/// #[tokio::main]
/// async fn main() {
///     let repo = LocalRepository::new();
///     assert!(repo.get().await.unwrap().is_none());
/// }
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    config: Option<WeeklyScheduleConfig>,
    bookings: BTreeMap<AppointmentId, Booking>,

    // ID counter
    next_appointment_id: u64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            config: None,
            bookings: BTreeMap::new(),
            next_appointment_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Create a repository pre-loaded with a configuration.
    pub fn with_config(config: WeeklyScheduleConfig) -> Self {
        let repo = Self::new();
        repo.data.write().config = Some(config);
        repo
    }

    /// Insert a booking directly, bypassing id assignment.
    ///
    /// This is a helper method for setting up data.
    pub fn insert_booking(&self, booking: Booking) {
        self.data.write().bookings.insert(booking.id.clone(), booking);
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy every trait method fails with `ConnectionError`.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of bookings stored, cancelled ones included.
    pub fn booking_count(&self) -> usize {
        self.data.read().bookings.len()
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(&self) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::ConnectionError(
                "Booking backend is not healthy".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

// ==================== Config Store ====================

#[async_trait]
impl ConfigStore for LocalRepository {
    async fn get(&self) -> RepositoryResult<Option<WeeklyScheduleConfig>> {
        self.check_health()?;
        Ok(self.data.read().config.clone())
    }

    async fn put(&self, config: &WeeklyScheduleConfig) -> RepositoryResult<()> {
        self.check_health()?;
        self.data.write().config = Some(config.clone());
        Ok(())
    }
}

// ==================== Booking Repository ====================

#[async_trait]
impl BookingRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn list_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Booking>> {
        self.check_health()?;
        let data = self.data.read();

        let mut bookings: Vec<Booking> = data
            .bookings
            .values()
            .filter(|booking| booking.date == date)
            .cloned()
            .collect();

        bookings.sort_by_key(|b| b.time);
        Ok(bookings)
    }

    async fn get_booking(&self, id: &AppointmentId) -> RepositoryResult<Booking> {
        self.check_health()?;
        self.data
            .read()
            .bookings
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Appointment {} not found", id)))
    }

    async fn create(&self, appointment: &NewAppointment) -> RepositoryResult<AppointmentId> {
        self.check_health()?;
        let mut data = self.data.write();

        let id = AppointmentId(format!("apt-{:06}", data.next_appointment_id));
        data.next_appointment_id += 1;

        data.bookings.insert(
            id.clone(),
            Booking {
                id: id.clone(),
                date: appointment.date,
                time: appointment.time,
                status: appointment.status,
            },
        );

        Ok(id)
    }

    async fn update(&self, id: &AppointmentId, status: BookingStatus) -> RepositoryResult<()> {
        self.check_health()?;
        let mut data = self.data.write();

        let booking = data
            .bookings
            .get_mut(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Appointment {} not found", id)))?;
        booking.status = status;
        Ok(())
    }
}
