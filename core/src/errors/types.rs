//! Token error taxonomy.
//!
//! These are returned to the API layer as typed failures. That layer is
//! expected to collapse `InvalidToken`/`TokenExpired`/`TokenRevoked`/
//! `TokenNotFound`/`InvalidTokenType` into one authentication-failure
//! response so callers cannot probe which check rejected them, while the
//! distinction stays available for internal logging.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    /// Malformed structure, bad signature, or unexpected algorithm header
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Token not yet valid")]
    TokenNotYetValid,

    #[error("Token has been revoked")]
    TokenRevoked,

    /// No metadata record exists for the token identifier
    #[error("Token not found")]
    TokenNotFound,

    /// Wrong token kind for the operation (e.g. refreshing with an access token)
    #[error("Invalid token type")]
    InvalidTokenType,

    /// Metadata persistence failed during issuance; the signed strings are
    /// discarded and the caller must retry issuance
    #[error("Failed to persist token metadata")]
    PersistenceFailed,
}
