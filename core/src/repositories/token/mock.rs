//! Mock implementation of TokenStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::token::TokenMetadata;
use crate::errors::DomainError;

use super::r#trait::TokenStore;

/// In-memory token store for testing
///
/// Supports failure injection so service tests can exercise the
/// persistence-failure and best-effort paths.
pub struct MockTokenStore {
    records: Arc<RwLock<HashMap<Uuid, TokenMetadata>>>,
    save_calls: AtomicUsize,
    fail_on_save: AtomicUsize,
    update_last_used_fails: AtomicBool,
}

impl MockTokenStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            save_calls: AtomicUsize::new(0),
            fail_on_save: AtomicUsize::new(0),
            update_last_used_fails: AtomicBool::new(false),
        }
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Make the nth save call (1-based, counted from store creation) fail
    pub fn fail_on_save(&self, nth: usize) {
        self.fail_on_save.store(nth, Ordering::SeqCst);
    }

    /// Make every update_last_used call fail
    pub fn fail_update_last_used(&self) {
        self.update_last_used_fails.store(true, Ordering::SeqCst);
    }
}

impl Default for MockTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn save(&self, metadata: TokenMetadata) -> Result<TokenMetadata, DomainError> {
        let call = self.save_calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call == self.fail_on_save.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Injected save failure".to_string(),
            });
        }

        let mut records = self.records.write().await;

        if records.contains_key(&metadata.id) {
            return Err(DomainError::Validation {
                message: "Token metadata already exists".to_string(),
            });
        }

        records.insert(metadata.id, metadata.clone());
        Ok(metadata)
    }

    async fn find_by_id(&self, token_id: Uuid) -> Result<Option<TokenMetadata>, DomainError> {
        let records = self.records.read().await;
        Ok(records.get(&token_id).cloned())
    }

    async fn revoke(&self, token_id: Uuid) -> Result<bool, DomainError> {
        let mut records = self.records.write().await;

        if let Some(record) = records.get_mut(&token_id) {
            record.revoke();
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let mut count = 0;

        for record in records.values_mut() {
            if record.user_id == user_id && !record.is_revoked {
                record.revoke();
                count += 1;
            }
        }

        Ok(count)
    }

    async fn update_last_used(
        &self,
        token_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<(), DomainError> {
        if self.update_last_used_fails.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: "Injected last-used update failure".to_string(),
            });
        }

        let mut records = self.records.write().await;

        if let Some(record) = records.get_mut(&token_id) {
            record.last_used_at = Some(at);
        }

        Ok(())
    }

    async fn delete_expired(&self, before: DateTime<Utc>) -> Result<usize, DomainError> {
        let mut records = self.records.write().await;
        let initial_count = records.len();

        records.retain(|_, record| record.expires_at >= before);

        Ok(initial_count - records.len())
    }

    async fn find_active_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<TokenMetadata>, DomainError> {
        let records = self.records.read().await;
        let mut active: Vec<TokenMetadata> = records
            .values()
            .filter(|r| r.user_id == user_id && r.is_active())
            .cloned()
            .collect();

        active.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(active)
    }
}
