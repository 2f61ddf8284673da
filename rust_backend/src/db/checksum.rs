//! Checksum calculation for schedule configuration deduplication.

use sha2::{Digest, Sha256};

use super::repository::{RepositoryError, RepositoryResult};
use crate::config::WeeklyScheduleConfig;

/// Calculate SHA-256 checksum of arbitrary content.
///
/// # Arguments
/// * `content` - Content to hash, typically canonical JSON
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    let result = hasher.finalize();
    hex::encode(result)
}

/// Fingerprint of the parts of a configuration that affect scheduling.
///
/// `lastUpdated` is left out, so re-saving identical rules yields the same
/// fingerprint.
pub fn config_fingerprint(config: &WeeklyScheduleConfig) -> RepositoryResult<String> {
    let content = serde_json::to_string(&(&config.working_days, &config.break_time))
        .map_err(|e| RepositoryError::InternalError(format!("Failed to encode config: {}", e)))?;
    Ok(calculate_checksum(&content))
}
