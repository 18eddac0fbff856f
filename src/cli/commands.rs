//! CLI command implementations
//!
//! Both commands build the store exactly once from configuration and hand
//! it to whatever needs it.

use std::path::PathBuf;

use tracing::info;

use crate::http_server::HttpServer;
use crate::kyc::KycService;
use crate::logging;
use crate::store::{StoreBackend, StoreConfig};

use super::args::Command;
use super::config::ServiceConfig;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    logging::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_command(cli.command))
}

/// Run the appropriate command based on CLI args
pub async fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            memory,
        } => {
            let mut config = ServiceConfig::load(config.as_deref())?;
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if memory {
                config.store = StoreConfig {
                    table: config.store.table,
                    ..StoreConfig::memory()
                };
            }
            serve(config).await
        }
        Command::Status { address, config } => status(config, &address).await,
    }
}

/// Start the HTTP API and serve until shutdown
pub async fn serve(config: ServiceConfig) -> CliResult<()> {
    config.validate()?;

    let store = config.store.build()?;
    info!(
        backend = ?config.store.backend,
        table = %config.store.table,
        "KYC store ready"
    );
    if config.store.backend == StoreBackend::Memory {
        info!("Records are kept in memory and will be lost on exit");
    }

    HttpServer::with_store(config.server, store)
        .start()
        .await
        .map_err(|e| CliError::server_error(e.to_string()))
}

/// Print the current record for one address as JSON
pub async fn status(config_path: Option<PathBuf>, address: &str) -> CliResult<()> {
    let config = ServiceConfig::load(config_path.as_deref())?;
    config.store.validate()?;

    let service = KycService::new(config.store.build()?);
    let record = service.status_of(address).await?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
