//! Domain layer: entities shared by the trust-core services.

pub mod entities;

pub use entities::*;
