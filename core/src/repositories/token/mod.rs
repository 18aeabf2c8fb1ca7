//! Token store abstraction and in-memory implementation

mod mock;
mod r#trait;

pub use mock::MockTokenStore;
pub use r#trait::TokenStore;
