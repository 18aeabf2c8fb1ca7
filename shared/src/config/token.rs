//! Token issuance, acceptance, and sweeper configuration

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Name of the representation the service issues
///
/// Exactly one representation can be issued; "all" is not a valid issuance
/// mode and is rejected at parse time so it can never be defaulted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueModeName {
    /// Opaque session tokens backed by the token store
    Session,
    /// Self-describing signed tokens
    Jwt,
}

impl FromStr for IssueModeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "jwt" => Ok(Self::Jwt),
            other => Err(format!("unknown issue mode: {}", other)),
        }
    }
}

/// Name of the representation(s) the service accepts for validation and
/// revocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceptModeName {
    /// Only opaque session tokens
    Session,
    /// Only signed tokens
    Jwt,
    /// Either kind, detected per token by format
    All,
}

impl FromStr for AcceptModeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "session" => Ok(Self::Session),
            "jwt" => Ok(Self::Jwt),
            "all" => Ok(Self::All),
            other => Err(format!("unknown accept mode: {}", other)),
        }
    }
}

/// Settings for the background expired-token sweeper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SweeperSettings {
    /// Whether the background sweep is enabled
    pub enabled: bool,

    /// How often to run the sweep (in seconds)
    pub interval_seconds: u64,

    /// Maximum number of records to delete per sweep
    pub max_delete: usize,

    /// Number of records to delete per batch
    pub batch_size: usize,

    /// Pause between batches in milliseconds
    pub batch_pause_millis: u64,
}

impl Default for SweeperSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_seconds: 3600, // Run every hour
            max_delete: 10_000,
            batch_size: 1_000,
            batch_pause_millis: 100,
        }
    }
}

/// Token service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TokenConfig {
    /// Which representation the service issues
    pub issue_mode: IssueModeName,

    /// Which representation(s) the service accepts
    pub accept_mode: AcceptModeName,

    /// Signing secret for the JWT codec
    pub jwt_secret: String,

    /// Default token lifetime in minutes
    pub default_ttl_minutes: i64,

    /// Background sweeper settings
    #[serde(default)]
    pub sweeper: SweeperSettings,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issue_mode: IssueModeName::Session,
            accept_mode: AcceptModeName::All,
            jwt_secret: String::from("development-secret-please-change-in-production"),
            default_ttl_minutes: 60,
            sweeper: SweeperSettings::default(),
        }
    }
}

impl TokenConfig {
    /// Create from environment variables
    ///
    /// An unknown mode name is an error, never a silent default;
    /// issuance must always be unambiguous. Unset variables fall back to
    /// the documented defaults.
    pub fn from_env() -> Result<Self, String> {
        let issue_mode = match std::env::var("VAULT_TOKEN_ISSUE_MODE") {
            Ok(name) => name.parse()?,
            Err(_) => IssueModeName::Session,
        };
        let accept_mode = match std::env::var("VAULT_TOKEN_ACCEPT_MODE") {
            Ok(name) => name.parse()?,
            Err(_) => AcceptModeName::All,
        };
        let jwt_secret = std::env::var("VAULT_JWT_SECRET")
            .unwrap_or_else(|_| "development-secret-please-change-in-production".to_string());
        let default_ttl_minutes = std::env::var("VAULT_TOKEN_TTL_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        Ok(Self {
            issue_mode,
            accept_mode,
            jwt_secret,
            default_ttl_minutes,
            sweeper: SweeperSettings::default(),
        })
    }

    /// Set the issuance mode
    pub fn with_issue_mode(mut self, mode: IssueModeName) -> Self {
        self.issue_mode = mode;
        self
    }

    /// Set the acceptance mode
    pub fn with_accept_mode(mut self, mode: AcceptModeName) -> Self {
        self.accept_mode = mode;
        self
    }

    /// Check if using the default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.jwt_secret == "development-secret-please-change-in-production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_config_default() {
        let config = TokenConfig::default();
        assert_eq!(config.issue_mode, IssueModeName::Session);
        assert_eq!(config.accept_mode, AcceptModeName::All);
        assert_eq!(config.default_ttl_minutes, 60);
        assert!(config.is_using_default_secret());
    }

    #[test]
    fn test_token_config_builder() {
        let config = TokenConfig::default()
            .with_issue_mode(IssueModeName::Jwt)
            .with_accept_mode(AcceptModeName::Jwt);

        assert_eq!(config.issue_mode, IssueModeName::Jwt);
        assert_eq!(config.accept_mode, AcceptModeName::Jwt);
    }

    #[test]
    fn test_issue_mode_parsing() {
        assert_eq!("session".parse::<IssueModeName>(), Ok(IssueModeName::Session));
        assert_eq!("JWT".parse::<IssueModeName>(), Ok(IssueModeName::Jwt));
        assert!("all".parse::<IssueModeName>().is_err());
        assert!("bogus".parse::<IssueModeName>().is_err());
    }

    #[test]
    fn test_accept_mode_parsing() {
        assert_eq!("session".parse::<AcceptModeName>(), Ok(AcceptModeName::Session));
        assert_eq!("jwt".parse::<AcceptModeName>(), Ok(AcceptModeName::Jwt));
        assert_eq!("all".parse::<AcceptModeName>(), Ok(AcceptModeName::All));
        assert!("bogus".parse::<AcceptModeName>().is_err());
    }

    #[test]
    fn test_from_env_rejects_unknown_mode_name() {
        std::env::set_var("VAULT_TOKEN_ISSUE_MODE", "bogus");
        let result = TokenConfig::from_env();
        std::env::remove_var("VAULT_TOKEN_ISSUE_MODE");

        assert!(result.is_err());
    }

    #[test]
    fn test_sweeper_settings_default() {
        let settings = SweeperSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.interval_seconds, 3600);
        assert_eq!(settings.max_delete, 10_000);
        assert_eq!(settings.batch_size, 1_000);
        assert_eq!(settings.batch_pause_millis, 100);
    }
}
