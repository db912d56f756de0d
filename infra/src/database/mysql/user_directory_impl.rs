//! MySQL implementation of the UserDirectory trait.
//!
//! Read-only lookups against the user table. Token refresh re-reads the
//! user here so newly minted claims reflect the current role and status.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::user::User;
use gk_core::errors::DomainError;
use gk_core::repositories::UserDirectory;

/// MySQL implementation of UserDirectory
pub struct MySqlUserDirectory {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlUserDirectory {
    /// Create a new MySQL user directory
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a User entity
    fn row_to_user(row: &sqlx::mysql::MySqlRow) -> Result<User, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        Ok(User {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            email: row.try_get("email").map_err(|e| DomainError::Internal {
                message: format!("Failed to get email: {}", e),
            })?,
            role: row.try_get("role").map_err(|e| DomainError::Internal {
                message: format!("Failed to get role: {}", e),
            })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_active: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get updated_at: {}", e),
                })?,
        })
    }
}

#[async_trait]
impl UserDirectory for MySqlUserDirectory {
    async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let query = r#"
            SELECT id, email, role, is_active, created_at, updated_at
            FROM users
            WHERE id = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find user: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}
