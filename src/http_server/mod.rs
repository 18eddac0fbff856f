//! # KYC HTTP Server Module
//!
//! Axum server exposing the KYC status API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `POST /kyc/status` - Create or update the status for an address
//! - `GET /kyc/status/{user_address}` - Current status for an address
//! - `GET /kyc/requests?status=` - Stored records, newest first
//! - `GET /kyc/stats` - Status counts

pub mod config;
pub mod health_routes;
pub mod kyc_routes;
pub mod server;

pub use config::HttpServerConfig;
pub use kyc_routes::KycState;
pub use server::HttpServer;
