//! Token store trait defining the interface for token metadata persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::token::TokenMetadata;
use crate::errors::DomainError;

/// Persistence contract for token metadata records
///
/// One record exists per issued token, keyed by the claim `jti`. The store
/// exclusively owns persistence; services reference records by identifier
/// and never hold them across calls.
///
/// # Consistency
/// - `revoke` must be an atomic single-row write
/// - The revocation flag is monotonic: implementations never clear it
/// - `update_last_used` is best-effort at call sites; its errors must not
///   be promoted into validation failures
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Save a new token metadata record
    ///
    /// # Arguments
    /// * `metadata` - The record to persist, keyed by its `id`
    ///
    /// # Returns
    /// * `Ok(TokenMetadata)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g. duplicate identifier)
    async fn save(&self, metadata: TokenMetadata) -> Result<TokenMetadata, DomainError>;

    /// Find a metadata record by its token identifier
    ///
    /// # Returns
    /// * `Ok(Some(TokenMetadata))` - Record found
    /// * `Ok(None)` - No record with the given identifier
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_id(&self, token_id: Uuid) -> Result<Option<TokenMetadata>, DomainError>;

    /// Check the revocation flag for a token identifier
    ///
    /// # Returns
    /// * `Ok(Some(bool))` - Record exists; the flag value
    /// * `Ok(None)` - No record exists. Callers decide what absence means;
    ///   the token service treats it as fail-closed (`TokenNotFound`)
    /// * `Err(DomainError)` - Store error occurred
    ///
    /// Implementations may override with a direct single-column query.
    async fn is_revoked(&self, token_id: Uuid) -> Result<Option<bool>, DomainError> {
        Ok(self.find_by_id(token_id).await?.map(|m| m.is_revoked))
    }

    /// Set the revocation flag on a record
    ///
    /// Revoking an already-revoked record is a no-op success.
    ///
    /// # Returns
    /// * `Ok(true)` - Record exists (flag set now or previously)
    /// * `Ok(false)` - No record with the given identifier
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke(&self, token_id: Uuid) -> Result<bool, DomainError>;

    /// Revoke every non-revoked record owned by a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records newly revoked
    /// * `Err(DomainError)` - Revocation failed
    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Record the time of a successful validation
    ///
    /// Best-effort: the caller logs failures and continues. A missing
    /// record is not an error here.
    async fn update_last_used(
        &self,
        token_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError>;

    /// Delete every record whose expiry is strictly before `before`
    ///
    /// Revoked records past expiry are deleted too; revocation state no
    /// longer matters once the signed token cannot validate.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired(&self, before: DateTime<Utc>) -> Result<usize, DomainError>;

    /// Find active (non-revoked, non-expired) records for a user, newest first
    ///
    /// # Returns
    /// * `Ok(Vec<TokenMetadata>)` - Active records, possibly empty
    /// * `Err(DomainError)` - Store error occurred
    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<TokenMetadata>, DomainError>;
}
