//! CLI argument definitions using clap
//!
//! Commands:
//! - kycstatus serve [--config <path>] [--host <host>] [--port <port>] [--memory]
//! - kycstatus status <address> [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// kycstatus - KYC verification status API
#[derive(Parser, Debug)]
#[command(name = "kycstatus")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,

        /// Keep records in memory instead of the hosted table
        #[arg(long)]
        memory: bool,
    },

    /// Print the current status for one address and exit
    Status {
        /// User address to look up
        address: String,

        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
