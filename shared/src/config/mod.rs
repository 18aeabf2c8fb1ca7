//! Configuration module for the Vaultcore trust core

mod materials;
mod token;

pub use materials::MaterialsCacheSettings;
pub use token::{AcceptModeName, IssueModeName, SweeperSettings, TokenConfig};

use serde::{Deserialize, Serialize};

/// Complete application configuration for the trust core
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Token issuance/acceptance and sweeper settings
    #[serde(default)]
    pub token: TokenConfig,

    /// Encryption-materials cache settings
    #[serde(default)]
    pub materials_cache: MaterialsCacheSettings,
}

impl AppConfig {
    /// Create from environment variables
    ///
    /// Fails when a token mode name cannot be parsed; configuration is
    /// never silently defaulted.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            token: TokenConfig::from_env()?,
            materials_cache: MaterialsCacheSettings::from_env(),
        })
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            token: TokenConfig::default(),
            materials_cache: MaterialsCacheSettings::default(),
        }
    }
}
