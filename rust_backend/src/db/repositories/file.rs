//! JSON file backed configuration store.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::WeeklyScheduleConfig;
use crate::db::repository::{ConfigStore, RepositoryError, RepositoryResult};

/// Stores the weekly schedule as one JSON document on disk.
///
/// Writes go to a sibling `*.tmp` file that is then renamed over the target,
/// so readers see either the old or the new document, never a mix.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

/// Decode a configuration document, reporting the JSON path of a bad field.
pub fn parse_config_json(content: &str) -> RepositoryResult<WeeklyScheduleConfig> {
    let deserializer = &mut serde_json::Deserializer::from_str(content);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        RepositoryError::ValidationError(format!(
            "Failed to parse config at {}: {}",
            e.path(),
            e.inner()
        ))
    })
}

#[async_trait]
impl ConfigStore for FileConfigStore {
    async fn get(&self) -> RepositoryResult<Option<WeeklyScheduleConfig>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No schedule config at {}", self.path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(RepositoryError::ConnectionError(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )))
            }
        };

        parse_config_json(&content).map(Some)
    }

    async fn put(&self, config: &WeeklyScheduleConfig) -> RepositoryResult<()> {
        let content = serde_json::to_string_pretty(config).map_err(|e| {
            RepositoryError::InternalError(format!("Failed to encode config: {}", e))
        })?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, content).await.map_err(|e| {
            RepositoryError::ConnectionError(format!("Failed to write {}: {}", temp.display(), e))
        })?;

        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(RepositoryError::ConnectionError(format!(
                "Failed to replace {}: {}",
                self.path.display(),
                e
            )));
        }

        debug!("Wrote schedule config to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::Weekday;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path().join("schedule.json"));
        assert!(store.get().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path().join("schedule.json"));

        let mut config = WeeklyScheduleConfig::default();
        if let Some(rule) = config.rule_for_mut(Weekday::Saturday) {
            rule.enabled = true;
        }
        store.put(&config).await.unwrap();

        assert_eq!(store.get().await.unwrap(), Some(config));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_bad_field_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("schedule.json");
        std::fs::write(
            &path,
            r#"{
                "workingDays": [
                    {"id": "sunday", "enabled": true, "openTime": "9am", "closeTime": "21:00", "slotDuration": 40}
                ],
                "breakTime": {"enabled": true, "startTime": "12:00", "endTime": "13:00"}
            }"#,
        )
        .unwrap();

        let err = FileConfigStore::new(&path).get().await.unwrap_err();
        match err {
            RepositoryError::ValidationError(message) => {
                assert!(message.contains("workingDays[0].openTime"), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unwritable_location_fails() {
        let dir = TempDir::new().unwrap();
        let store = FileConfigStore::new(dir.path().join("missing").join("schedule.json"));
        let result = store.put(&WeeklyScheduleConfig::default()).await;
        assert!(matches!(result, Err(RepositoryError::ConnectionError(_))));
        assert!(store.get().await.unwrap().is_none());
    }
}
