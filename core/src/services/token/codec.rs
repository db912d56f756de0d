//! Claim codec: signing and verification of token claims.
//!
//! This is the stateless layer of validation. It owns the symmetric keys
//! and checks structure, signature, algorithm header, expiry, not-before,
//! and issuer. Revocation is never consulted here.

use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

/// Encodes and decodes signed token claims
///
/// Decoding accepts HS256 only; a token whose algorithm header names any
/// other algorithm fails as `InvalidToken`, which closes the classic
/// algorithm-substitution hole.
pub struct ClaimCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    unverified: Validation,
}

impl ClaimCodec {
    /// Creates a codec for the given symmetric secret and issuer
    pub fn new(secret: &str, issuer: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // No clock-skew leeway: a token is expired the second its exp passes.
        validation.leeway = 0;

        // Structural parse only, for revocation: a token past expiry or with
        // a skewed clock must still be revocable by its identifier.
        let mut unverified = Validation::new(Algorithm::HS256);
        unverified.insecure_disable_signature_validation();
        unverified.validate_exp = false;
        unverified.validate_nbf = false;
        unverified.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            unverified,
        }
    }

    /// Signs claims into a compact token string
    pub fn encode(&self, claims: &Claims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            DomainError::Internal {
                message: format!("Failed to sign claims: {}", e),
            }
        })
    }

    /// Parses and verifies a token string, returning its claims
    ///
    /// # Returns
    /// * `Ok(Claims)` - Signature, algorithm, expiry, not-before and issuer all check out
    /// * `Err(TokenExpired)` - Past its `exp` claim
    /// * `Err(TokenNotYetValid)` - Before its `nbf` claim
    /// * `Err(InvalidToken)` - Malformed, bad signature, wrong algorithm, or wrong issuer
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                ErrorKind::ImmatureSignature => TokenError::TokenNotYetValid,
                _ => TokenError::InvalidToken,
            })
    }

    /// Parses a token structurally without verifying signature or timestamps
    ///
    /// Used only to extract the token identifier for revocation; never treat
    /// the returned claims as authenticated.
    pub fn decode_unverified(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.unverified)
            .map(|data| data.claims)
            .map_err(|_| TokenError::InvalidToken)
    }
}
