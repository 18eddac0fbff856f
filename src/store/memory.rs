//! In-memory KYC store

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::errors::{StoreError, StoreResult};
use super::KycStore;
use crate::kyc::{KycRecord, KycStatus};

/// In-process table with the same uniqueness rule as the hosted one
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, KycRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl KycStore for MemoryStore {
    async fn find(&self, user_address: &str) -> StoreResult<Option<KycRecord>> {
        Ok(self.records.read().await.get(user_address).cloned())
    }

    async fn insert(&self, record: &KycRecord) -> StoreResult<KycRecord> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.user_address) {
            return Err(StoreError::Conflict(record.user_address.clone()));
        }
        records.insert(record.user_address.clone(), record.clone());
        Ok(record.clone())
    }

    async fn update(
        &self,
        user_address: &str,
        status: &KycStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<KycRecord> {
        let mut records = self.records.write().await;
        let record = records
            .get_mut(user_address)
            .ok_or_else(|| StoreError::MissingRow(user_address.to_string()))?;
        record.status = status.clone();
        record.updated_at = Some(updated_at);
        Ok(record.clone())
    }

    async fn list(&self, status: Option<&KycStatus>) -> StoreResult<Vec<KycRecord>> {
        let records = self.records.read().await;
        Ok(records
            .values()
            .filter(|r| status.map_or(true, |s| &r.status == s))
            .cloned()
            .collect())
    }
}
