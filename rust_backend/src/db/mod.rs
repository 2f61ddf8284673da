//! Storage module for the schedule configuration and bookings.
//!
//! This module provides abstractions for storage operations via the Repository
//! pattern, allowing different backends to be swapped easily.
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level storage operations (use these in your application!)
//! - `repository`: `ConfigStore` and `BookingRepository` trait definitions
//! - `repositories::local`: In-memory implementation of both traits
//! - `repositories::file`: JSON file configuration store
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: TOML engine settings
//!
//! # Recommended Usage
//!
//! ```no_run
//! use barber_booking::db::{services, EngineSettings, RepositoryFactory};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = EngineSettings::from_default_location()?;
//!     let repos = RepositoryFactory::from_settings(&settings)?;
//!
//!     let config = services::load_schedule_config(repos.config_store.as_ref()).await?;
//!     println!("{} weekday rules", config.working_days.len());
//!     Ok(())
//! }
//! ```
//!
//! Handles are created explicitly and passed down; there is no process-wide
//! repository instance.

pub mod checksum;
pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;
pub mod services;

// ==================== Service Layer ====================

pub use services::{
    fetch_bookings, health_check, load_schedule_config, save_schedule_config,
    update_booking_status, SavedConfig,
};

// ==================== Repository Pattern Exports ====================

pub use checksum::{calculate_checksum, config_fingerprint};
pub use repo_config::{BookingSettings, EngineSettings, FileSettings, RepositorySettings};

pub use factory::{Repositories, RepositoryBuilder, RepositoryFactory, RepositoryType};
#[cfg(feature = "file-repo")]
pub use repositories::FileConfigStore;
pub use repositories::LocalRepository;
pub use repository::{
    BookingRepository, ConfigStore, FullRepository, RepositoryError, RepositoryResult,
};
