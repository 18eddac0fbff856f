//! Service configuration
//!
//! Loaded in three layers, later ones winning:
//! 1. Optional JSON file (`--config`)
//! 2. Environment variables
//! 3. Command line flags
//!
//! Environment:
//! - `SUPABASE_URL` / `SUPABASE_ANON_KEY` (falls back to the `VITE_`-prefixed names)
//! - `KYC_HOST`, `KYC_PORT`

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::store::StoreConfig;

const URL_VARS: [&str; 2] = ["SUPABASE_URL", "VITE_SUPABASE_URL"];
const KEY_VARS: [&str; 2] = ["SUPABASE_ANON_KEY", "VITE_SUPABASE_ANON_KEY"];

/// Configuration file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

impl ServiceConfig {
    /// Load from an optional file, then apply the process environment
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Load configuration from file
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Override fields from environment variables looked up via `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .find(|value| !value.trim().is_empty())
        };

        if let Some(url) = first(&URL_VARS[..]) {
            self.store.url = Some(url);
        }
        if let Some(key) = first(&KEY_VARS[..]) {
            self.store.api_key = Some(key);
        }
        if let Some(host) = first(&["KYC_HOST"][..]) {
            self.server.host = host;
        }
        if let Some(port) = first(&["KYC_PORT"][..]) {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| CliError::config_error(format!("Invalid KYC_PORT: '{}'", port)))?;
        }

        Ok(())
    }

    /// Check that the configuration can start a service
    pub fn validate(&self) -> CliResult<()> {
        self.store.validate()?;
        self.server
            .parse_socket_addr()
            .map_err(|e| CliError::config_error(e.to_string()))?;
        Ok(())
    }
}
