//! KYC HTTP Routes
//!
//! Endpoints for submitting and reading KYC verification status.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::kyc::{KycError, KycRecord, KycResult, KycService, KycStats, KycStatus, StatusSubmission};
use crate::store::KycStore;

// ==================
// Shared State
// ==================

/// KYC state shared across handlers
pub struct KycState {
    pub service: KycService,
}

impl KycState {
    pub fn new(store: Arc<dyn KycStore>) -> Self {
        Self {
            service: KycService::new(store),
        }
    }
}

// ==================
// Request/Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct SubmitStatusResponse {
    pub success: bool,
    pub message: String,
    pub data: KycRecord,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ListRequestsQuery {
    #[serde(default)]
    pub status: Option<String>,
}

// ==================
// KYC Routes
// ==================

/// Create KYC routes
pub fn kyc_routes(state: Arc<KycState>) -> Router {
    Router::new()
        .route("/status", post(submit_status_handler))
        .route("/status/:user_address", get(get_status_handler))
        .route("/requests", get(list_requests_handler))
        .route("/stats", get(stats_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn submit_status_handler(
    State(state): State<Arc<KycState>>,
    payload: Result<Json<StatusSubmission>, JsonRejection>,
) -> KycResult<Json<SubmitStatusResponse>> {
    let Json(submission) = payload.map_err(|e| KycError::rejected(e.status(), e.body_text()))?;

    let record = state.service.submit_status(submission).await?;

    Ok(Json(SubmitStatusResponse {
        success: true,
        message: "KYC status updated successfully".to_string(),
        data: record,
    }))
}

async fn get_status_handler(
    State(state): State<Arc<KycState>>,
    user_address: Result<Path<String>, PathRejection>,
) -> KycResult<Json<DataResponse<KycRecord>>> {
    let Path(user_address) = user_address.map_err(|e| KycError::rejected(e.status(), e.body_text()))?;
    let record = state.service.status_of(&user_address).await?;
    Ok(Json(DataResponse::new(record)))
}

async fn list_requests_handler(
    State(state): State<Arc<KycState>>,
    query: Result<Query<ListRequestsQuery>, QueryRejection>,
) -> KycResult<Json<DataResponse<Vec<KycRecord>>>> {
    let Query(query) = query.map_err(|e| KycError::rejected(e.status(), e.body_text()))?;

    let status = query
        .status
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(KycStatus::from);

    let records = state.service.list_records(status).await?;
    Ok(Json(DataResponse::new(records)))
}

async fn stats_handler(
    State(state): State<Arc<KycState>>,
) -> KycResult<Json<DataResponse<KycStats>>> {
    let stats = state.service.stats().await?;
    Ok(Json(DataResponse::new(stats)))
}
