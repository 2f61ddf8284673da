//! Repository trait definitions for the booking engine's collaborators.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`config_store`]: Load/save of the weekly schedule configuration
//! - [`bookings`]: Read, create and update appointments
//!
//! # Convenience Trait Bound
//!
//! Backends that serve both concerns (such as the in-memory
//! [`crate::db::repositories::LocalRepository`]) satisfy [`FullRepository`]:
//!
//! ```ignore
//! async fn reset<R: FullRepository>(repo: &R) -> RepositoryResult<()> {
//!     repo.put(&WeeklyScheduleConfig::default()).await?;
//!     let _ = repo.list_by_date(today).await?;
//!     Ok(())
//! }
//! ```

pub mod bookings;
pub mod config_store;
pub mod error;

pub use error::{RepositoryError, RepositoryResult};

pub use bookings::BookingRepository;
pub use config_store::ConfigStore;

/// Composite trait bound for a backend implementing both repository traits.
pub trait FullRepository: ConfigStore + BookingRepository {}

// Blanket implementation: any type implementing both traits automatically implements FullRepository
impl<T> FullRepository for T where T: ConfigStore + BookingRepository {}
