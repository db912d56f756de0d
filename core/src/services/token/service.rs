//! Main token service implementation

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind, TokenMetadata, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{TokenStore, UserDirectory};

use super::codec::ClaimCodec;
use super::config::TokenServiceConfig;

/// Service managing the full token lifecycle
///
/// Holds no shared mutable state beyond the immutable signing keys and
/// configuration; every operation is an independent request against the
/// store and directory collaborators.
pub struct TokenService<S: TokenStore, U: UserDirectory> {
    pub(crate) store: S,
    pub(crate) users: U,
    codec: ClaimCodec,
    config: TokenServiceConfig,
}

impl<S: TokenStore, U: UserDirectory> TokenService<S, U> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `store` - Token metadata store
    /// * `users` - User directory for refresh-time lookups
    /// * `config` - Signing secret, issuer, and token lifetimes
    pub fn new(store: S, users: U, config: TokenServiceConfig) -> Self {
        let codec = ClaimCodec::new(&config.jwt_secret, &config.issuer);
        Self {
            store,
            users,
            codec,
            config,
        }
    }

    /// Issues a new access/refresh token pair for a user
    ///
    /// Both tokens get fresh identifiers and their own metadata record. If
    /// either record fails to persist the signed strings are discarded and
    /// `PersistenceFailed` is returned: a signed-but-unpersisted token must
    /// never be treated as issued, since fail-closed validation would reject
    /// it anyway. The caller retries issuance.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The issued pair
    /// * `Err(DomainError)` - Signing or persistence failed
    pub async fn issue(&self, user: &User) -> Result<TokenPair, DomainError> {
        info!(user_id = %user.id, email = %user.email, "Issuing token pair");

        let access_claims = Claims::access(user, &self.config.issuer, self.config.access_lifetime());
        let refresh_claims =
            Claims::refresh(user, &self.config.issuer, self.config.refresh_lifetime());

        let access_token = self.codec.encode(&access_claims)?;
        let refresh_token = self.codec.encode(&refresh_claims)?;

        self.persist_metadata(&access_claims).await?;
        self.persist_metadata(&refresh_claims).await?;

        info!(
            user_id = %user.id,
            access_token_id = %access_claims.jti,
            refresh_token_id = %refresh_claims.jti,
            "Issued token pair"
        );

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_expires_in(),
            self.config.refresh_expires_in(),
        ))
    }

    /// Validates a token string and returns its claims
    ///
    /// Combines the stateless checks (signature, algorithm, expiry,
    /// not-before, issuer) with the stateful revocation check. A token with
    /// no metadata record fails closed as `TokenNotFound`: an unknown token
    /// must never be more trusted than a revoked one.
    ///
    /// The last-used timestamp update is best-effort; its failure is logged
    /// and never fails validation.
    pub async fn validate(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.codec.decode(token)?;
        let token_id = claims.token_id().map_err(|_| TokenError::InvalidToken)?;

        match self.store.is_revoked(token_id).await? {
            None => {
                warn!(token_id = %token_id, "No metadata record for token, failing closed");
                return Err(TokenError::TokenNotFound.into());
            }
            Some(true) => {
                warn!(token_id = %token_id, sub = %claims.sub, "Attempted use of revoked token");
                return Err(TokenError::TokenRevoked.into());
            }
            Some(false) => {}
        }

        if let Err(e) = self.store.update_last_used(token_id, Utc::now()).await {
            warn!(token_id = %token_id, error = %e, "Failed to update last-used timestamp");
        }

        debug!(
            token_id = %token_id,
            sub = %claims.sub,
            token_type = %claims.token_type,
            "Token validated"
        );

        Ok(claims)
    }

    /// Mints a new access token from a valid refresh token
    ///
    /// The refresh token must pass full validation and carry the refresh
    /// kind. The user is re-fetched so the new access token reflects the
    /// current role and email rather than the ones captured at login. The
    /// refresh token itself is not rotated; it stays valid until its own
    /// expiry or explicit revocation.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new signed access token
    /// * `Err(DomainError)` - Validation, type check, lookup, or persistence failed
    pub async fn refresh(&self, refresh_token: &str) -> Result<String, DomainError> {
        let claims = self.validate(refresh_token).await?;

        if claims.token_type != TokenKind::Refresh {
            warn!(
                token_type = %claims.token_type,
                sub = %claims.sub,
                "Attempted refresh with non-refresh token"
            );
            return Err(TokenError::InvalidTokenType.into());
        }

        let user_id = claims.user_id().map_err(|_| TokenError::InvalidToken)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let access_claims = Claims::access(&user, &self.config.issuer, self.config.access_lifetime());
        let access_token = self.codec.encode(&access_claims)?;
        self.persist_metadata(&access_claims).await?;

        info!(
            user_id = %user.id,
            new_token_id = %access_claims.jti,
            refresh_token_id = %claims.jti,
            "Refreshed access token"
        );

        Ok(access_token)
    }

    /// Revokes a single token by its string
    ///
    /// The token is parsed without signature or timestamp verification: a
    /// revoked token need not still be cryptographically valid, and expired
    /// or clock-skewed tokens must remain revocable. Revoking an
    /// already-revoked token is a no-op success; a token with no metadata
    /// record fails with `TokenNotFound`.
    pub async fn revoke(&self, token: &str) -> Result<(), DomainError> {
        let claims = self.codec.decode_unverified(token)?;
        let token_id = claims.token_id().map_err(|_| TokenError::InvalidToken)?;

        if !self.store.revoke(token_id).await? {
            warn!(token_id = %token_id, "No token found to revoke");
            return Err(TokenError::TokenNotFound.into());
        }

        info!(token_id = %token_id, sub = %claims.sub, "Revoked token");
        Ok(())
    }

    /// Revokes every active token belonging to a user
    ///
    /// Used for "log out everywhere" and credential-compromise response.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of tokens newly revoked
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let count = self.store.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, tokens_revoked = count, "Revoked all tokens for user");
        Ok(count)
    }

    /// Deletes all metadata records past their expiry
    ///
    /// Maintenance sweep, intended to run on a timer outside the request
    /// path (see `TokenCleanupService`). Idempotent: a second sweep at the
    /// same instant removes nothing.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of records deleted
    pub async fn cleanup_expired(&self) -> Result<usize, DomainError> {
        let deleted = self.store.delete_expired(Utc::now()).await?;
        info!(tokens_deleted = deleted, "Cleaned up expired token metadata");
        Ok(deleted)
    }

    /// Fetches the stored metadata record for a token identifier
    pub async fn metadata(&self, token_id: Uuid) -> Result<TokenMetadata, DomainError> {
        self.store
            .find_by_id(token_id)
            .await?
            .ok_or(TokenError::TokenNotFound.into())
    }

    /// Checks the revocation flag for a token identifier
    ///
    /// Fails closed: an identifier with no metadata record is reported as
    /// `TokenNotFound` rather than "not revoked".
    pub async fn is_revoked(&self, token_id: Uuid) -> Result<bool, DomainError> {
        self.store
            .is_revoked(token_id)
            .await?
            .ok_or(TokenError::TokenNotFound.into())
    }

    /// Lists a user's active (non-revoked, non-expired) tokens, newest first
    pub async fn active_sessions(&self, user_id: Uuid) -> Result<Vec<TokenMetadata>, DomainError> {
        self.store.find_active_by_user(user_id).await
    }

    /// Builds and saves the metadata record for freshly issued claims
    async fn persist_metadata(&self, claims: &Claims) -> Result<(), DomainError> {
        let metadata = TokenMetadata::for_claims(claims).map_err(|e| DomainError::Internal {
            message: format!("Issued claims carry invalid identifiers: {}", e),
        })?;

        self.store.save(metadata).await.map_err(|e| {
            error!(
                token_id = %claims.jti,
                sub = %claims.sub,
                error = %e,
                "Failed to persist token metadata"
            );
            TokenError::PersistenceFailed
        })?;

        Ok(())
    }
}
