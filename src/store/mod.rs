//! # KYC Store Module
//!
//! Persistence seam for KYC records. The service only ever talks to a
//! [`KycStore`]; which implementation sits behind it is decided once at
//! startup from [`StoreConfig`].
//!
//! - [`PostgrestStore`] - hosted table reached over its REST API
//! - [`MemoryStore`] - in-process table for tests and local runs

pub mod config;
pub mod errors;
pub mod memory;
pub mod postgrest;

pub use config::{StoreBackend, StoreConfig};
pub use errors::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgrest::PostgrestStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::kyc::{KycRecord, KycStatus};

/// Table of KYC records keyed by user address
#[async_trait]
pub trait KycStore: Send + Sync + std::fmt::Debug {
    /// Look up the record for an address
    async fn find(&self, user_address: &str) -> StoreResult<Option<KycRecord>>;

    /// Insert a new record and return it as stored
    async fn insert(&self, record: &KycRecord) -> StoreResult<KycRecord>;

    /// Overwrite status and timestamp of an existing record
    async fn update(
        &self,
        user_address: &str,
        status: &KycStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<KycRecord>;

    /// All records, optionally only those with the given status
    async fn list(&self, status: Option<&KycStatus>) -> StoreResult<Vec<KycRecord>>;
}
