//! Access to appointments held by the booking backend.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::core::domain::{AppointmentId, Booking, BookingStatus, NewAppointment};

/// Repository trait for the booking backend.
///
/// The scheduling core only reads bookings to detect conflicts, creates
/// appointments for confirmed occurrences, and moves appointments through
/// the status workflow.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Check if the backend is reachable.
    ///
    /// # Returns
    /// - `Ok(true)` if the backend is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// All bookings on `date`, cancelled ones included.
    ///
    /// # Returns
    /// * `Ok(Vec<Booking>)` - possibly empty
    /// * `Err(RepositoryError)` - the fetch failed; never report this as "no bookings"
    async fn list_by_date(&self, date: NaiveDate) -> RepositoryResult<Vec<Booking>>;

    /// Fetch one booking.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - if no booking has this id
    async fn get_booking(&self, id: &AppointmentId) -> RepositoryResult<Booking>;

    /// Create an appointment and return its new id.
    async fn create(&self, appointment: &NewAppointment) -> RepositoryResult<AppointmentId>;

    /// Overwrite the status of an appointment.
    ///
    /// Workflow rules are enforced by the service layer, not here.
    async fn update(&self, id: &AppointmentId, status: BookingStatus) -> RepositoryResult<()>;
}
