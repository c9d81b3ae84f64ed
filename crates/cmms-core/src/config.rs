//! Configuration types and loading

use serde::{Deserialize, Serialize};

/// Limits applied to an attachment selection.
///
/// The defaults match what the server enforces; environment variables can
/// tighten or relax them per deployment.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
pub struct UploadLimits {
    /// Maximum number of files on a record (existing plus newly staged)
    pub max_files: usize,
    /// Maximum combined size of newly staged files, in bytes
    pub max_total_bytes: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_files: 10,
            max_total_bytes: 24 * 1024 * 1024, // shown to users as "25 MB"
        }
    }
}

impl UploadLimits {
    /// Load limits from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `CMMS_ATTACHMENTS_MAX_FILES`
    /// - `CMMS_ATTACHMENTS_MAX_TOTAL_BYTES`
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut limits = Self::default();

        if let Ok(value) = std::env::var("CMMS_ATTACHMENTS_MAX_FILES") {
            limits.max_files = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CMMS_ATTACHMENTS_MAX_FILES".to_string(),
                message: format!("expected a positive integer, got {:?}", value),
            })?;
        }

        if let Ok(value) = std::env::var("CMMS_ATTACHMENTS_MAX_TOTAL_BYTES") {
            limits.max_total_bytes = value.parse().map_err(|_| ConfigError::InvalidValue {
                key: "CMMS_ATTACHMENTS_MAX_TOTAL_BYTES".to_string(),
                message: format!("expected a byte count, got {:?}", value),
            })?;
        }

        Ok(limits)
    }

    /// User-facing label for the byte limit, rounded to whole decimal
    /// megabytes ("25 MB" for the default 24 MiB).
    pub fn total_size_label(&self) -> String {
        let mb = (self.max_total_bytes as f64 / 1_000_000.0).round() as u64;
        format!("{} MB", mb)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}
