//! Token service module for the JWT lifecycle
//!
//! This module handles all token-related operations:
//! - Signed claim encoding and verification (claim codec)
//! - Access/refresh token pair issuance
//! - Stateless validation combined with stateful revocation checks
//! - Access token refresh (no refresh-token rotation)
//! - Revocation, bulk revocation, and background cleanup of expired metadata

mod cleanup;
mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use cleanup::{TokenCleanupConfig, TokenCleanupService};
pub use codec::ClaimCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
