//! User directory record consumed during token issuance and refresh.
//!
//! Gatekey never owns user accounts; this entity mirrors what the external
//! user directory exposes (see `repositories::UserDirectory`). Credential
//! fields live with the directory, not here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user as seen by the token service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, embedded in token claims
    pub email: String,

    /// Role, embedded in access token claims
    pub role: String,

    /// Whether the account is active
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new active user record
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            role: role.into(),
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}
