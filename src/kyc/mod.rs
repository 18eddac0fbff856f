//! # KYC Status Module
//!
//! Records one verification status per user address and reconciles new
//! submissions against what the store already holds.

pub mod errors;
pub mod record;
pub mod service;
pub mod timestamp;

pub use errors::{ErrorResponse, KycError, KycResult};
pub use record::{KycRecord, KycStats, KycStatus, StatusSubmission};
pub use service::KycService;
