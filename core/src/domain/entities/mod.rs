//! Domain entities

pub mod token;

pub use token::{
    join_groups, split_groups, AuthToken, PrincipalType, SessionTokenRecord, TokenClaims,
    TokenRepresentation,
};
