//! Editor configuration
//!
//! Read from TOML; every key is optional.
//!
//! ```toml
//! prettify_timeout_ms = 60000
//! event_buffer = 64
//! suggested_file_name = "untitled.ttl"
//!
//! [auth]
//! client_id = "..."
//! scope = "read:user user:email"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use vocedit_auth::AuthConfig;

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Deadline for a single pretty-print request, in milliseconds
    pub prettify_timeout_ms: u64,
    /// Capacity of the UI event and actor result channels
    pub event_buffer: usize,
    /// Name offered by the save-as picker
    pub suggested_file_name: String,
    /// Sign-in endpoints
    pub auth: AuthConfig,
}

impl EditorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Io` if the file cannot be read
    /// - `ConfigError::Parse` / `ConfigError::Invalid` as for `from_toml_str`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "Loaded editor config");
        Ok(config)
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// - `ConfigError::Parse` if the text is not valid TOML for this type
    /// - `ConfigError::Invalid` if a value is out of range
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// With prettify deadline, raised to at least one millisecond
    #[must_use]
    pub fn with_prettify_timeout(mut self, timeout: Duration) -> Self {
        self.prettify_timeout_ms = u64::try_from(timeout.as_millis())
            .unwrap_or(u64::MAX)
            .max(1);
        self
    }

    /// With event buffer size, raised to at least one slot
    #[inline]
    #[must_use]
    pub fn with_event_buffer(mut self, event_buffer: usize) -> Self {
        self.event_buffer = event_buffer.max(1);
        self
    }

    /// Prettify deadline as a `Duration`
    #[inline]
    #[must_use]
    pub fn prettify_timeout(&self) -> Duration {
        Duration::from_millis(self.prettify_timeout_ms.max(1))
    }

    /// Channel capacity; never zero even if the field was set directly
    #[inline]
    #[must_use]
    pub fn channel_capacity(&self) -> usize {
        self.event_buffer.max(1)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.event_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "event_buffer",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.prettify_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                key: "prettify_timeout_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prettify_timeout_ms: 60_000,
            event_buffer: 64,
            suggested_file_name: "untitled.ttl".to_string(),
            auth: AuthConfig::default(),
        }
    }
}
