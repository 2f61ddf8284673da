//! Repository factory for dependency injection.
//!
//! This module creates the configuration store and booking repository
//! selected by runtime configuration. Nothing here is a process-wide
//! singleton; callers own the returned handles and pass them to services.

use std::str::FromStr;
use std::sync::Arc;

#[cfg(feature = "file-repo")]
use super::repositories::FileConfigStore;
use super::repositories::LocalRepository;
use super::repo_config::EngineSettings;
use super::repository::{BookingRepository, ConfigStore, FullRepository, RepositoryResult};

/// Environment variable consulted by [`RepositoryType::from_env`].
pub const REPOSITORY_TYPE_ENV: &str = "BOOKING_REPOSITORY_TYPE";

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory store for both configuration and bookings
    Local,
    /// Schedule configuration kept in a JSON file, bookings in memory
    File,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("local", "file"), ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "file" => Ok(Self::File),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `BOOKING_REPOSITORY_TYPE`. Defaults to Local if not set or invalid.
    pub fn from_env() -> Self {
        std::env::var(REPOSITORY_TYPE_ENV)
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(Self::Local)
    }
}

/// Handles to the two backends the services need.
#[derive(Clone)]
pub struct Repositories {
    pub config_store: Arc<dyn ConfigStore>,
    pub bookings: Arc<dyn BookingRepository>,
}

impl Repositories {
    /// Serve both concerns from one backend.
    pub fn shared<R: FullRepository + 'static>(repo: Arc<R>) -> Self {
        Self {
            config_store: repo.clone(),
            bookings: repo,
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use barber_booking::db::{EngineSettings, RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let repos = RepositoryFactory::create(RepositoryType::Local, &EngineSettings::default())?;
///     assert!(repos.bookings.health_check().await?);
///     assert!(repos.config_store.get().await?.is_none());
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create both backends for the given repository type.
    ///
    /// For `Local` a single in-memory repository backs both handles.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `settings` - Engine settings (the file path is used by `File`)
    ///
    /// # Returns
    /// * `Ok(Repositories)` - Configuration store and booking repository
    /// * `Err(RepositoryError)` - If the type is not available in this build
    pub fn create(
        repo_type: RepositoryType,
        settings: &EngineSettings,
    ) -> RepositoryResult<Repositories> {
        match repo_type {
            RepositoryType::Local => Ok(Repositories::shared(Self::create_local())),
            RepositoryType::File => Ok(Repositories {
                config_store: Self::create_config_store(repo_type, settings)?,
                bookings: Self::create_local(),
            }),
        }
    }

    /// Create only the configuration store.
    pub fn create_config_store(
        repo_type: RepositoryType,
        settings: &EngineSettings,
    ) -> RepositoryResult<Arc<dyn ConfigStore>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            #[cfg(feature = "file-repo")]
            RepositoryType::File => Ok(Arc::new(FileConfigStore::new(&settings.file.config_path))),
            #[cfg(not(feature = "file-repo"))]
            RepositoryType::File => {
                let _ = settings;
                Err(super::repository::RepositoryError::ConfigurationError(
                    "File repository support is not compiled in (enable the `file-repo` feature)"
                        .to_string(),
                ))
            }
        }
    }

    /// Create an in-memory local repository.
    pub fn create_local() -> Arc<LocalRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create repositories from a settings file's `[repository]` section.
    pub fn from_settings(settings: &EngineSettings) -> RepositoryResult<Repositories> {
        Self::create(settings.repository_type()?, settings)
    }

    /// Create repositories from environment configuration.
    ///
    /// Reads `BOOKING_REPOSITORY_TYPE` and uses default settings otherwise.
    pub fn from_env() -> RepositoryResult<Repositories> {
        Self::create(RepositoryType::from_env(), &EngineSettings::default())
    }
}

/// Builder for configuring repository creation.
///
/// # Example
/// ```no_run
/// use barber_booking::db::{EngineSettings, RepositoryBuilder, RepositoryType};
///
/// let settings = EngineSettings::from_default_location().unwrap_or_default();
/// let repos = RepositoryBuilder::new()
///     .repository_type(RepositoryType::File)
///     .settings(settings)
///     .build()
///     .unwrap();
/// ```
pub struct RepositoryBuilder {
    repo_type: RepositoryType,
    settings: EngineSettings,
}

impl RepositoryBuilder {
    /// Create a new repository builder with default settings.
    ///
    /// Defaults to the local repository type.
    pub fn new() -> Self {
        Self {
            repo_type: RepositoryType::Local,
            settings: EngineSettings::default(),
        }
    }

    /// Set the repository type.
    pub fn repository_type(mut self, repo_type: RepositoryType) -> Self {
        self.repo_type = repo_type;
        self
    }

    /// Set the engine settings. The repository type is left unchanged.
    pub fn settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Take the repository type from the environment.
    pub fn from_env(mut self) -> Self {
        self.repo_type = RepositoryType::from_env();
        self
    }

    /// Build the repository handles.
    pub fn build(self) -> RepositoryResult<Repositories> {
        RepositoryFactory::create(self.repo_type, &self.settings)
    }
}

impl Default for RepositoryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeeklyScheduleConfig;
    use crate::db::repository::RepositoryError;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!("local".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert_eq!("file".parse::<RepositoryType>().unwrap(), RepositoryType::File);
        assert_eq!("FILE".parse::<RepositoryType>().unwrap(), RepositoryType::File);
        assert!("postgres".parse::<RepositoryType>().is_err());
    }

    #[tokio::test]
    async fn test_local_shares_one_backend() {
        let repos = RepositoryFactory::create(RepositoryType::Local, &EngineSettings::default())
            .unwrap();
        assert!(repos.bookings.health_check().await.unwrap());

        repos
            .config_store
            .put(&WeeklyScheduleConfig::default())
            .await
            .unwrap();
        assert!(repos.config_store.get().await.unwrap().is_some());
    }

    #[cfg(feature = "file-repo")]
    #[tokio::test]
    async fn test_builder_file_repository() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut settings = EngineSettings::default();
        settings.file.config_path = dir.path().join("schedule.json");

        let repos = RepositoryBuilder::new()
            .repository_type(RepositoryType::File)
            .settings(settings.clone())
            .build()
            .unwrap();

        assert!(repos.config_store.get().await.unwrap().is_none());
        repos
            .config_store
            .put(&WeeklyScheduleConfig::default())
            .await
            .unwrap();
        assert!(settings.file.config_path.exists());
    }

    #[test]
    fn test_from_settings_rejects_unknown_type() {
        let mut settings = EngineSettings::default();
        settings.repository.repo_type = "azure".to_string();
        assert!(matches!(
            RepositoryFactory::from_settings(&settings),
            Err(RepositoryError::ConfigurationError(_))
        ));
    }
}
