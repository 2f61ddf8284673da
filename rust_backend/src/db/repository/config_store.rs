//! Storage for the weekly schedule configuration.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::config::WeeklyScheduleConfig;

/// Repository trait for the persisted weekly schedule.
///
/// The configuration is read and written as a single unit. Implementations
/// must make `put` all-or-nothing: after a failed `put` the previous
/// configuration is still returned by `get`.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Fetch the stored configuration.
    ///
    /// # Returns
    /// * `Ok(Some(config))` - a configuration has been saved before
    /// * `Ok(None)` - nothing stored yet; callers fall back to defaults
    /// * `Err(RepositoryError)` - the store could not be read
    async fn get(&self) -> RepositoryResult<Option<WeeklyScheduleConfig>>;

    /// Replace the stored configuration.
    ///
    /// Callers validate before calling; stores do not re-validate.
    async fn put(&self, config: &WeeklyScheduleConfig) -> RepositoryResult<()>;
}
