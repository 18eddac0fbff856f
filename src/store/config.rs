//! Store configuration
//!
//! Selects the backend and carries the two credentials the hosted table
//! needs (project URL and API key).

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::{KycStore, MemoryStore, PostgrestStore};

/// Which [`KycStore`] implementation to build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Hosted table over its REST API
    #[default]
    Postgrest,
    /// In-process table, lost on exit
    Memory,
}

/// Store configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// Project URL, e.g. `https://<project>.supabase.co`
    #[serde(default)]
    pub url: Option<String>,

    /// API key sent with every request
    #[serde(default)]
    pub api_key: Option<String>,

    /// Table holding KYC records (default: "kyc_requests")
    #[serde(default = "default_table")]
    pub table: String,

    /// Per-request timeout in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_table() -> String {
    "kyc_requests".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Config for an in-memory store
    pub fn memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Default::default()
        }
    }

    /// Check that the selected backend has what it needs
    pub fn validate(&self) -> StoreResult<()> {
        if self.backend == StoreBackend::Memory {
            return Ok(());
        }

        let missing: Vec<&str> = [("url", &self.url), ("api_key", &self.api_key)]
            .into_iter()
            .filter(|(_, value)| value.as_deref().map_or(true, |v| v.trim().is_empty()))
            .map(|(name, _)| name)
            .collect();

        if !missing.is_empty() {
            return Err(StoreError::Config(format!(
                "missing store credentials: {}",
                missing.join(", ")
            )));
        }
        if self.timeout_secs == 0 {
            return Err(StoreError::Config("timeout_secs must be > 0".to_string()));
        }

        Ok(())
    }

    /// Build the configured store
    pub fn build(&self) -> StoreResult<Arc<dyn KycStore>> {
        self.validate()?;

        match self.backend {
            StoreBackend::Memory => Ok(Arc::new(MemoryStore::new())),
            StoreBackend::Postgrest => {
                let store = PostgrestStore::new(
                    self.url.as_deref().unwrap_or_default(),
                    self.api_key.as_deref().unwrap_or_default(),
                    &self.table,
                    Duration::from_secs(self.timeout_secs),
                )?;
                Ok(Arc::new(store))
            }
        }
    }
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("backend", &self.backend)
            .field("url", &self.url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("table", &self.table)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
