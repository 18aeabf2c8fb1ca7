//! Encryption-materials cache configuration

use serde::{Deserialize, Serialize};

/// Settings for the encryption-materials cache
///
/// A bound configured as 0 is disabled: `max_size = 0` means unbounded
/// capacity, `max_age_seconds = 0` means no age limit, and
/// `message_use_limit = 0` means no use-count limit.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MaterialsCacheSettings {
    /// Whether caching is enabled at all
    pub enabled: bool,

    /// Maximum number of entries (0 = unbounded)
    #[serde(default = "default_max_size")]
    pub max_size: usize,

    /// Maximum age of an entry in seconds (0 = no age bound)
    #[serde(default = "default_max_age")]
    pub max_age_seconds: u64,

    /// Maximum number of uses per entry (0 = no use-count bound)
    #[serde(default = "default_use_limit")]
    pub message_use_limit: u64,
}

impl Default for MaterialsCacheSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: default_max_size(),
            max_age_seconds: default_max_age(),
            message_use_limit: default_use_limit(),
        }
    }
}

impl MaterialsCacheSettings {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let enabled = std::env::var("VAULT_MATERIALS_CACHE_ENABLED")
            .map(|v| v != "false" && v != "0")
            .unwrap_or(true);
        let max_size = std::env::var("VAULT_MATERIALS_CACHE_MAX_SIZE")
            .unwrap_or_else(|_| default_max_size().to_string())
            .parse()
            .unwrap_or_else(|_| default_max_size());
        let max_age_seconds = std::env::var("VAULT_MATERIALS_CACHE_MAX_AGE_SECONDS")
            .unwrap_or_else(|_| default_max_age().to_string())
            .parse()
            .unwrap_or_else(|_| default_max_age());
        let message_use_limit = std::env::var("VAULT_MATERIALS_CACHE_USE_LIMIT")
            .unwrap_or_else(|_| default_use_limit().to_string())
            .parse()
            .unwrap_or_else(|_| default_use_limit());

        Self {
            enabled,
            max_size,
            max_age_seconds,
            message_use_limit,
        }
    }

    /// Set the maximum entry count
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the maximum entry age in seconds
    pub fn with_max_age_seconds(mut self, seconds: u64) -> Self {
        self.max_age_seconds = seconds;
        self
    }

    /// Set the per-entry use limit
    pub fn with_message_use_limit(mut self, limit: u64) -> Self {
        self.message_use_limit = limit;
        self
    }

    /// Disable caching entirely
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}

fn default_max_size() -> usize {
    1000
}

fn default_max_age() -> u64 {
    120 // 2 minutes
}

fn default_use_limit() -> u64 {
    200
}
