//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;

use crate::http_server::{HttpServer, ServerConfig};
use crate::observability::init_logging;
use crate::store::{CountryStore, InMemoryStore, StoreStats};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            dataset,
        } => {
            let config = resolve_config(config.as_deref(), host, port, dataset)?;
            serve(config)
        }
        Command::Check { dataset } => check(&dataset),
    }
}

/// Build the effective configuration: defaults, then the optional file,
/// then command line flags.
pub fn resolve_config(
    path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    dataset: Option<PathBuf>,
) -> CliResult<ServerConfig> {
    let mut config = match path {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }
    if let Some(dataset) = dataset {
        config.dataset_path = dataset;
    }

    config.validate()?;
    Ok(config)
}

/// Load the dataset and serve until shutdown
pub fn serve(config: ServerConfig) -> CliResult<()> {
    init_logging(&config.log_config());

    let store = InMemoryStore::load(&config.dataset_path)?;
    let server = HttpServer::with_config(config, Arc::new(store));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

#[derive(Debug, Serialize)]
struct CheckReport {
    valid: bool,
    dataset: PathBuf,
    #[serde(flatten)]
    stats: StoreStats,
}

/// Validate a dataset file and print its table sizes
pub fn check(dataset: &Path) -> CliResult<()> {
    let store = InMemoryStore::load(dataset)?;
    write_json(&CheckReport {
        valid: true,
        dataset: dataset.to_path_buf(),
        stats: store.stats(),
    })
}
