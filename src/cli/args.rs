//! CLI argument definitions using clap
//!
//! Commands:
//! - countries-api serve [--config <path>] [--host <host>] [--port <port>] [--dataset <path>]
//! - countries-api check --dataset <path>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Read-only REST API over world country reference data
#[derive(Parser, Debug)]
#[command(name = "countries-api")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the dataset and serve the HTTP API
    Serve {
        /// Optional JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind (overrides config)
        #[arg(long, env = "COUNTRIES_API_PORT")]
        port: Option<u16>,

        /// Dataset file (overrides config)
        #[arg(long, env = "COUNTRIES_API_DATASET")]
        dataset: Option<PathBuf>,
    },

    /// Validate a dataset file and print its table sizes
    Check {
        /// Dataset file
        #[arg(long, env = "COUNTRIES_API_DATASET")]
        dataset: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_overrides() {
        let cli = Cli::try_parse_from([
            "countries-api",
            "serve",
            "--port",
            "8080",
            "--dataset",
            "/srv/countries.json",
        ])
        .unwrap();

        match cli.command {
            Command::Serve {
                config,
                host,
                port,
                dataset,
            } => {
                assert!(config.is_none());
                assert!(host.is_none());
                assert_eq!(port, Some(8080));
                assert_eq!(dataset, Some(PathBuf::from("/srv/countries.json")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_check_requires_dataset() {
        let parsed = Cli::try_parse_from(["countries-api", "check", "--dataset", "data.json"]);
        assert!(matches!(
            parsed.unwrap().command,
            Command::Check { .. }
        ));
    }

    #[test]
    fn test_rejects_non_numeric_port() {
        assert!(Cli::try_parse_from(["countries-api", "serve", "--port", "http"]).is_err());
    }
}
