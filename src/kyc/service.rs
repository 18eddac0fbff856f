//! # KYC Service
//!
//! Status reconciliation against a single store table: look the address up,
//! then either insert a fresh record or overwrite the existing one.
//!
//! Read and write are not wrapped in a transaction. Two submissions for the
//! same address can interleave; the later write wins, and two racing first
//! submissions may trip the store's uniqueness constraint.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use super::errors::{KycError, KycResult};
use super::record::{KycRecord, KycStats, KycStatus, StatusSubmission};
use crate::store::{KycStore, StoreError};

/// Entry point for every KYC operation
#[derive(Debug, Clone)]
pub struct KycService {
    store: Arc<dyn KycStore>,
}

impl KycService {
    pub fn new(store: Arc<dyn KycStore>) -> Self {
        Self { store }
    }

    /// Record a status for an address, creating or updating its record.
    ///
    /// A missing timestamp is replaced with the current UTC time.
    pub async fn submit_status(&self, submission: StatusSubmission) -> KycResult<KycRecord> {
        let user_address = required("user_address", &submission.user_address)?;
        let status = KycStatus::from(required("status", &submission.status)?);
        let updated_at = submission.updated_at.unwrap_or_else(Utc::now);

        let existing = self.store.find(user_address).await.map_err(store_failure)?;

        let record = match existing {
            None => {
                let record = KycRecord::new(user_address, status, updated_at);
                let stored = self.store.insert(&record).await.map_err(store_failure)?;
                info!(user_address, status = %stored.status, "KYC record created");
                stored
            }
            Some(previous) => {
                let stored = self
                    .store
                    .update(user_address, &status, updated_at)
                    .await
                    .map_err(store_failure)?;
                info!(
                    user_address,
                    from = %previous.status,
                    to = %stored.status,
                    "KYC record updated"
                );
                stored
            }
        };

        Ok(record)
    }

    /// Current record for an address, or a `NOT_SUBMITTED` placeholder.
    ///
    /// The address is looked up and echoed exactly as given; an unknown or
    /// blank address is not an error.
    pub async fn status_of(&self, user_address: &str) -> KycResult<KycRecord> {
        match self.store.find(user_address).await.map_err(store_failure)? {
            Some(record) => Ok(record),
            None => {
                debug!(user_address, "No KYC record, reporting NOT_SUBMITTED");
                Ok(KycRecord::not_submitted(user_address))
            }
        }
    }

    /// All records, newest first, optionally restricted to one status.
    pub async fn list_records(&self, status: Option<KycStatus>) -> KycResult<Vec<KycRecord>> {
        let mut records = self
            .store
            .list(status.as_ref())
            .await
            .map_err(store_failure)?;
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }

    pub async fn stats(&self) -> KycResult<KycStats> {
        let records = self.store.list(None).await.map_err(store_failure)?;
        Ok(KycStats::from_records(&records))
    }
}

fn required<'a>(field: &str, value: &'a str) -> KycResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(KycError::InvalidRequest(format!("{} must not be empty", field)));
    }
    Ok(value)
}

fn store_failure(err: StoreError) -> KycError {
    error!(error = %err, "KYC store operation failed");
    KycError::Store(err)
}
