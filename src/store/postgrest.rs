//! # PostgREST Store
//!
//! KYC table hosted behind a PostgREST-style REST API (the interface hosted
//! Postgres platforms expose at `/rest/v1`). Two credentials are needed: the
//! project URL and an API key, sent both as `apikey` and as a bearer token.
//!
//! Requests used:
//! - find:   `GET    {table}?select=*&user_address=eq.{addr}&limit=1`
//! - insert: `POST   {table}` with `Prefer: return=representation`
//! - update: `PATCH  {table}?user_address=eq.{addr}` with `Prefer: return=representation`
//! - list:   `GET    {table}?select=*&order=updated_at.desc[&status=eq.{label}]`

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::errors::{StoreError, StoreResult};
use super::KycStore;
use crate::kyc::{KycRecord, KycStatus};

const REPRESENTATION: &str = "return=representation";

/// Client for one remote table
#[derive(Clone)]
pub struct PostgrestStore {
    client: Client,
    endpoint: String,
    api_key: String,
}

/// Error payload returned by PostgREST
#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    hint: Option<String>,
}

impl PostgrestStore {
    /// Create a client for `{url}/rest/v1/{table}`
    pub fn new(url: &str, api_key: &str, table: &str, timeout: Duration) -> StoreResult<Self> {
        let url = url.trim().trim_end_matches('/');
        if url.is_empty() {
            return Err(StoreError::Config("store URL is empty".to_string()));
        }
        if api_key.trim().is_empty() {
            return Err(StoreError::Config("store API key is empty".to_string()));
        }
        if table.trim().is_empty() {
            return Err(StoreError::Config("table name is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/rest/v1/{}", url, table.trim()),
            api_key: api_key.trim().to_string(),
        })
    }

    /// Table endpoint this store talks to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    /// Send a request whose response body is an array of rows
    async fn fetch_rows(&self, request: RequestBuilder) -> StoreResult<Vec<KycRecord>> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        let rows = response.json::<Vec<KycRecord>>().await?;
        debug!(endpoint = %self.endpoint, rows = rows.len(), "store request complete");
        Ok(rows)
    }

    async fn check_status(response: Response) -> StoreResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<PostgrestErrorBody>(&text) {
            Ok(body) => {
                warn!(
                    status = status.as_u16(),
                    code = body.code.as_deref().unwrap_or(""),
                    details = body.details.as_deref().unwrap_or(""),
                    hint = body.hint.as_deref().unwrap_or(""),
                    "store rejected request"
                );
                body.message
            }
            Err(_) if !text.trim().is_empty() => text,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("store request failed")
                .to_string(),
        };

        Err(StoreError::Remote {
            status: status.as_u16(),
            message,
        })
    }

    fn single(rows: Vec<KycRecord>, user_address: &str) -> StoreResult<KycRecord> {
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::MissingRow(user_address.to_string()))
    }
}

impl std::fmt::Debug for PostgrestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgrestStore")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

fn eq(value: &str) -> String {
    format!("eq.{}", value)
}

#[async_trait]
impl KycStore for PostgrestStore {
    async fn find(&self, user_address: &str) -> StoreResult<Option<KycRecord>> {
        let request = self.request(Method::GET).query(&[
            ("select", "*"),
            ("user_address", eq(user_address).as_str()),
            ("limit", "1"),
        ]);
        Ok(self.fetch_rows(request).await?.into_iter().next())
    }

    async fn insert(&self, record: &KycRecord) -> StoreResult<KycRecord> {
        let request = self
            .request(Method::POST)
            .header("Prefer", REPRESENTATION)
            .json(record);
        Self::single(self.fetch_rows(request).await?, &record.user_address)
    }

    async fn update(
        &self,
        user_address: &str,
        status: &KycStatus,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<KycRecord> {
        let request = self
            .request(Method::PATCH)
            .query(&[("user_address", eq(user_address))])
            .header("Prefer", REPRESENTATION)
            .json(&json!({
                "status": status,
                "updated_at": updated_at,
            }));
        Self::single(self.fetch_rows(request).await?, user_address)
    }

    async fn list(&self, status: Option<&KycStatus>) -> StoreResult<Vec<KycRecord>> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "updated_at.desc".to_string()),
        ];
        if let Some(status) = status {
            params.push(("status", eq(status.as_str())));
        }
        self.fetch_rows(self.request(Method::GET).query(&params)).await
    }
}
