//! Shared configuration types for the Vaultcore trust core
//!
//! This crate provides the configuration surface consumed by the core
//! services:
//! - Token issuance/acceptance settings and sweeper knobs
//! - Encryption-materials cache settings

pub mod config;

// Re-export commonly used items at crate root
pub use config::{
    AcceptModeName, AppConfig, IssueModeName, MaterialsCacheSettings, SweeperSettings, TokenConfig,
};
