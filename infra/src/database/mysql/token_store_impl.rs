//! MySQL implementation of the TokenStore trait.
//!
//! Persists token metadata records keyed by the JWT `jti` claim. Each
//! record carries the revocation flag consulted on every validation, so
//! queries here sit on the hot path and stay single-row where possible.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use gk_core::domain::entities::token::{TokenKind, TokenMetadata};
use gk_core::errors::DomainError;
use gk_core::repositories::TokenStore;

const TOKEN_COLUMNS: &str = "id, user_id, token_type, device_id, client_id, \
     is_revoked, created_at, expires_at, last_used_at";

/// MySQL implementation of TokenStore
pub struct MySqlTokenStore {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenStore {
    /// Create a new MySQL token store
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert a database row to a TokenMetadata entity
    fn row_to_metadata(row: &sqlx::mysql::MySqlRow) -> Result<TokenMetadata, DomainError> {
        let id: String = row.try_get("id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get id: {}", e),
        })?;

        let user_id: String = row.try_get("user_id").map_err(|e| DomainError::Internal {
            message: format!("Failed to get user_id: {}", e),
        })?;

        let token_type: String = row
            .try_get("token_type")
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to get token_type: {}", e),
            })?;

        Ok(TokenMetadata {
            id: Uuid::parse_str(&id).map_err(|e| DomainError::Internal {
                message: format!("Invalid token UUID: {}", e),
            })?,
            user_id: Uuid::parse_str(&user_id).map_err(|e| DomainError::Internal {
                message: format!("Invalid user UUID: {}", e),
            })?,
            kind: Self::parse_kind(&token_type)?,
            device_id: row
                .try_get("device_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get device_id: {}", e),
                })?,
            client_id: row
                .try_get("client_id")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get client_id: {}", e),
                })?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get is_revoked: {}", e),
                })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get created_at: {}", e),
                })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get expires_at: {}", e),
                })?,
            last_used_at: row
                .try_get::<Option<DateTime<Utc>>, _>("last_used_at")
                .map_err(|e| DomainError::Internal {
                    message: format!("Failed to get last_used_at: {}", e),
                })?,
        })
    }

    fn parse_kind(value: &str) -> Result<TokenKind, DomainError> {
        match value {
            "access" => Ok(TokenKind::Access),
            "refresh" => Ok(TokenKind::Refresh),
            other => Err(DomainError::Internal {
                message: format!("Unknown token type in store: {}", other),
            }),
        }
    }
}

#[async_trait]
impl TokenStore for MySqlTokenStore {
    async fn save(&self, metadata: TokenMetadata) -> Result<TokenMetadata, DomainError> {
        let query = r#"
            INSERT INTO token_metadata (
                id, user_id, token_type, device_id, client_id,
                is_revoked, created_at, expires_at, last_used_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(metadata.id.to_string())
            .bind(metadata.user_id.to_string())
            .bind(metadata.kind.to_string())
            .bind(&metadata.device_id)
            .bind(&metadata.client_id)
            .bind(metadata.is_revoked)
            .bind(metadata.created_at)
            .bind(metadata.expires_at)
            .bind(metadata.last_used_at)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to save token metadata: {}", e),
            })?;

        Ok(metadata)
    }

    async fn find_by_id(&self, token_id: Uuid) -> Result<Option<TokenMetadata>, DomainError> {
        let query = format!(
            "SELECT {} FROM token_metadata WHERE id = ? LIMIT 1",
            TOKEN_COLUMNS
        );

        let result = sqlx::query(&query)
            .bind(token_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find token metadata: {}", e),
            })?;

        match result {
            Some(row) => Ok(Some(Self::row_to_metadata(&row)?)),
            None => Ok(None),
        }
    }

    async fn is_revoked(&self, token_id: Uuid) -> Result<Option<bool>, DomainError> {
        // Single-column query; this runs on every validation
        let query = "SELECT is_revoked FROM token_metadata WHERE id = ? LIMIT 1";

        let result = sqlx::query(query)
            .bind(token_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to check revocation status: {}", e),
            })?;

        match result {
            Some(row) => {
                let is_revoked: bool =
                    row.try_get("is_revoked").map_err(|e| DomainError::Internal {
                        message: format!("Failed to get is_revoked: {}", e),
                    })?;
                Ok(Some(is_revoked))
            }
            None => Ok(None),
        }
    }

    async fn revoke(&self, token_id: Uuid) -> Result<bool, DomainError> {
        let query = r#"
            UPDATE token_metadata
            SET is_revoked = TRUE
            WHERE id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(token_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke token: {}", e),
            })?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }

        // No row updated: either the record is missing or it was already
        // revoked, which counts as success. Distinguish with a lookup.
        Ok(self.is_revoked(token_id).await?.is_some())
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let query = r#"
            UPDATE token_metadata
            SET is_revoked = TRUE
            WHERE user_id = ? AND is_revoked = FALSE
        "#;

        let result = sqlx::query(query)
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to revoke user tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn update_last_used(
        &self,
        token_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        let query = "UPDATE token_metadata SET last_used_at = ? WHERE id = ?";

        let result = sqlx::query(query)
            .bind(at)
            .bind(token_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to update last used timestamp: {}", e),
            })?;

        if result.rows_affected() == 0 {
            tracing::warn!(token_id = %token_id, "No token found to update last used timestamp");
        }

        Ok(())
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> Result<usize, DomainError> {
        let query = "DELETE FROM token_metadata WHERE expires_at < ?";

        let result = sqlx::query(query)
            .bind(before)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to delete expired tokens: {}", e),
            })?;

        Ok(result.rows_affected() as usize)
    }

    async fn find_active_by_user(&self, user_id: Uuid) -> Result<Vec<TokenMetadata>, DomainError> {
        let query = format!(
            r#"
            SELECT {} FROM token_metadata
            WHERE user_id = ?
                AND is_revoked = FALSE
                AND expires_at > ?
            ORDER BY created_at DESC
            "#,
            TOKEN_COLUMNS
        );

        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(Utc::now())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Failed to find active tokens: {}", e),
            })?;

        let mut tokens = Vec::with_capacity(rows.len());
        for row in &rows {
            tokens.push(Self::row_to_metadata(row)?);
        }

        Ok(tokens)
    }
}
