//! Configuration for the token service
//!
//! Issuance and acceptance are separate closed enums: only the two
//! concrete representations are issuable, so an ambiguous "issue both"
//! configuration cannot be expressed, while acceptance may additionally
//! allow either kind with per-token format detection.

use vault_shared::config::{AcceptModeName, IssueModeName, TokenConfig};

/// Which representation the service issues
///
/// Fixed at construction; immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueMode {
    /// Opaque session tokens persisted by hash in the token store
    Session,
    /// Self-describing signed tokens
    Jwt,
}

/// Which representation(s) the service accepts for validation and
/// revocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptMode {
    /// Only opaque session tokens
    Session,
    /// Only signed tokens
    Jwt,
    /// Either kind, detected per token by inspecting its format
    All,
}

impl From<IssueModeName> for IssueMode {
    fn from(name: IssueModeName) -> Self {
        match name {
            IssueModeName::Session => IssueMode::Session,
            IssueModeName::Jwt => IssueMode::Jwt,
        }
    }
}

impl From<AcceptModeName> for AcceptMode {
    fn from(name: AcceptModeName) -> Self {
        match name {
            AcceptModeName::Session => AcceptMode::Session,
            AcceptModeName::Jwt => AcceptMode::Jwt,
            AcceptModeName::All => AcceptMode::All,
        }
    }
}

/// Configuration for the token service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenServiceConfig {
    /// Which representation is issued
    pub issue_mode: IssueMode,
    /// Which representation(s) are accepted
    pub accept_mode: AcceptMode,
}

impl TokenServiceConfig {
    /// Builds service configuration from the shared settings surface
    pub fn from_settings(settings: &TokenConfig) -> Self {
        Self {
            issue_mode: settings.issue_mode.into(),
            accept_mode: settings.accept_mode.into(),
        }
    }
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            issue_mode: IssueMode::Session,
            accept_mode: AcceptMode::All,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenServiceConfig::default();
        assert_eq!(config.issue_mode, IssueMode::Session);
        assert_eq!(config.accept_mode, AcceptMode::All);
    }

    #[test]
    fn test_from_settings() {
        let settings = TokenConfig::default()
            .with_issue_mode(IssueModeName::Jwt)
            .with_accept_mode(AcceptModeName::Jwt);
        let config = TokenServiceConfig::from_settings(&settings);

        assert_eq!(config.issue_mode, IssueMode::Jwt);
        assert_eq!(config.accept_mode, AcceptMode::Jwt);
    }
}
