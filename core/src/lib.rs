//! # Gatekey Core
//!
//! Core token lifecycle logic for the Gatekey service. This crate contains
//! the domain entities, the token/user collaborator traits, the claim codec
//! and token service, and the error types shared with the infrastructure
//! layer.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::token::{Claims, TokenKind, TokenMetadata, TokenPair};
pub use domain::entities::user::User;
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{TokenStore, UserDirectory};
pub use services::{
    ClaimCodec, TokenCleanupConfig, TokenCleanupService, TokenService, TokenServiceConfig,
};
