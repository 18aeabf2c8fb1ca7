//! Repository interfaces for external persistence collaborators.

pub mod token;

pub use token::{MockTokenStore, TokenStore};
