//! KYC API Tests
//!
//! Drive the full router in-process:
//! - First submission creates exactly one record
//! - Later submissions update that record in place
//! - Unseen addresses read back as NOT_SUBMITTED
//! - Missing timestamps are server-assigned
//! - Store failures surface as 500 with the store's message
//! - Refused requests keep their status inside the error envelope

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::{DateTime, Utc};
use kycstatus::http_server::{HttpServer, HttpServerConfig};
use kycstatus::kyc::{KycRecord, KycStatus};
use kycstatus::store::{KycStore, MemoryStore, StoreError, StoreResult};
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn app(store: Arc<dyn KycStore>) -> Router {
    HttpServer::with_store(HttpServerConfig::default(), store).router()
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn submit(router: &Router, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, "/kyc/status", Some(body)).await
}

async fn get_status(router: &Router, address: &str) -> (StatusCode, Value) {
    send(router, Method::GET, &format!("/kyc/status/{}", address), None).await
}

/// Store whose every call fails
#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl KycStore for BrokenStore {
    async fn find(&self, _user_address: &str) -> StoreResult<Option<KycRecord>> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn insert(&self, _record: &KycRecord) -> StoreResult<KycRecord> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn update(
        &self,
        _user_address: &str,
        _status: &KycStatus,
        _updated_at: DateTime<Utc>,
    ) -> StoreResult<KycRecord> {
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn list(&self, _status: Option<&KycStatus>) -> StoreResult<Vec<KycRecord>> {
        Err(StoreError::Remote {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}

// =============================================================================
// Upsert Tests
// =============================================================================

#[tokio::test]
async fn test_first_submission_creates_record() {
    let store = Arc::new(MemoryStore::new());
    let router = app(store.clone());

    let (status, body) = submit(
        &router,
        json!({"user_address": "0xabc", "status": "PENDING"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("KYC status updated successfully"));
    assert_eq!(body["data"]["user_address"], json!("0xabc"));
    assert_eq!(body["data"]["status"], json!("PENDING"));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_second_submission_updates_same_record() {
    let store = Arc::new(MemoryStore::new());
    let router = app(store.clone());

    submit(&router, json!({"user_address": "0xabc", "status": "PENDING"})).await;
    let (status, body) = submit(
        &router,
        json!({"user_address": "0xabc", "status": "APPROVED"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("APPROVED"));
    assert_eq!(store.len().await, 1);

    let (_, body) = get_status(&router, "0xabc").await;
    assert_eq!(body["data"]["status"], json!("APPROVED"));
}

#[tokio::test]
async fn test_missing_timestamp_is_server_assigned() {
    let router = app(Arc::new(MemoryStore::new()));

    let before = Utc::now();
    let (_, body) = submit(&router, json!({"user_address": "0xabc", "status": "PENDING"})).await;
    let after = Utc::now();

    let ts: DateTime<Utc> = body["data"]["updated_at"].as_str().unwrap().parse().unwrap();
    assert!(ts >= before && ts <= after);
}

#[tokio::test]
async fn test_supplied_timestamp_is_normalized_to_utc() {
    let router = app(Arc::new(MemoryStore::new()));

    let (status, body) = submit(
        &router,
        json!({
            "user_address": "0xabc",
            "status": "REJECTED",
            "updated_at": "2024-06-01T15:00:00+03:00"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ts: DateTime<Utc> = body["data"]["updated_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(ts.to_rfc3339(), "2024-06-01T12:00:00+00:00");
}

#[tokio::test]
async fn test_unix_timestamp_is_accepted() {
    let router = app(Arc::new(MemoryStore::new()));

    let (status, body) = submit(
        &router,
        json!({"user_address": "0xabc", "status": "PENDING", "updated_at": 1717243200}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ts: DateTime<Utc> = body["data"]["updated_at"].as_str().unwrap().parse().unwrap();
    assert_eq!(ts.to_rfc3339(), "2024-06-01T12:00:00+00:00");
}

#[tokio::test]
async fn test_custom_status_label_is_kept() {
    let router = app(Arc::new(MemoryStore::new()));

    let (_, body) = submit(
        &router,
        json!({"user_address": "0xabc", "status": "NEEDS_DOCUMENTS"}),
    )
    .await;

    assert_eq!(body["data"]["status"], json!("NEEDS_DOCUMENTS"));
}

// =============================================================================
// Query Tests
// =============================================================================

#[tokio::test]
async fn test_unseen_address_is_not_submitted() {
    let store = Arc::new(MemoryStore::new());
    let router = app(store.clone());

    let (status, body) = get_status(&router, "0xnobody").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "success": true,
            "data": {"user_address": "0xnobody", "status": "NOT_SUBMITTED"}
        })
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_query_address_is_echoed_verbatim() {
    let router = app(Arc::new(MemoryStore::new()));

    let (status, body) = get_status(&router, "%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"user_address": " ", "status": "NOT_SUBMITTED"})
    );

    let (status, body) = get_status(&router, "%200xAbc%20").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user_address"], json!(" 0xAbc "));
}

#[tokio::test]
async fn test_list_and_stats() {
    let router = app(Arc::new(MemoryStore::new()));

    for (address, status, ts) in [
        ("0x1", "PENDING", "2024-01-01T00:00:00Z"),
        ("0x2", "APPROVED", "2024-01-02T00:00:00Z"),
        ("0x3", "PENDING", "2024-01-03T00:00:00Z"),
    ] {
        submit(
            &router,
            json!({"user_address": address, "status": status, "updated_at": ts}),
        )
        .await;
    }

    let (status, body) = send(&router, Method::GET, "/kyc/requests", None).await;
    assert_eq!(status, StatusCode::OK);
    let addresses: Vec<_> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["user_address"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(addresses, vec!["0x3", "0x2", "0x1"]);

    let (_, body) = send(&router, Method::GET, "/kyc/requests?status=PENDING", None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = send(&router, Method::GET, "/kyc/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({"total": 3, "pending": 2, "approved": 1, "rejected": 0})
    );
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_blank_fields_are_bad_requests() {
    let store = Arc::new(MemoryStore::new());
    let router = app(store.clone());

    let (status, body) = submit(&router, json!({"user_address": "  ", "status": "PENDING"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(400));

    let (status, _) = submit(&router, json!({"user_address": "0xabc", "status": " "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_rejected_bodies_keep_extractor_status() {
    let store = Arc::new(MemoryStore::new());
    let router = app(store.clone());

    let (status, body) = submit(&router, json!({"user_address": "0xabc"})).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(422));

    let (status, body) = submit(
        &router,
        json!({"user_address": "0xabc", "status": "PENDING", "updated_at": "tomorrow"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], json!(422));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/kyc/status")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method(Method::POST)
        .uri("/kyc/status")
        .body(Body::from(r#"{"user_address": "0xabc", "status": "PENDING"}"#))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], json!(415));

    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_undecodable_address_is_enveloped() {
    let router = app(Arc::new(MemoryStore::new()));

    let (status, body) = get_status(&router, "%FF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!(400));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_store_failure_is_server_error() {
    let router = app(Arc::new(BrokenStore));

    let (status, body) = submit(&router, json!({"user_address": "0xabc", "status": "PENDING"})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("Transport error: connection refused"));

    let (status, body) = get_status(&router, "0xabc").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], json!(500));

    let (status, body) = send(&router, Method::GET, "/kyc/stats", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("service unavailable"));
}

#[tokio::test]
async fn test_health() {
    let router = app(Arc::new(MemoryStore::new()));

    let (status, body) = send(&router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("ok"));
    assert_eq!(body["service"], json!("kycstatus"));
    assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
}
