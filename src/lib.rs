//! kycstatus - KYC verification status API
//!
//! Records one status label per user address in a hosted table and serves
//! it back over HTTP.

pub mod cli;
pub mod http_server;
pub mod kyc;
pub mod logging;
pub mod store;
