//! CLI module for kycstatus
//!
//! Provides command-line interface for:
//! - serve: Start the KYC status HTTP API
//! - status: One-shot status lookup for an address

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, run_command, serve, status};
pub use config::ServiceConfig;
pub use errors::{CliError, CliErrorCode, CliResult};
