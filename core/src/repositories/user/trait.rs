//! User directory trait defining the lookup interface for user records.
//!
//! The directory is a read-only external collaborator: Gatekey consults it
//! during refresh so new access tokens carry the user's current role and
//! email, not the ones captured when the refresh token was issued.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Lookup contract for the external user directory
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Arguments
    /// * `user_id` - The UUID of the user
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with the given id
    /// * `Err(DomainError)` - Directory error occurred
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError>;
}
