//! Raptor RPC - Main entrypoint.
//!
//! This is the main entry point for the Raptor RPC server. It loads
//! configuration, initializes the logging system, registers the built-in
//! methods and serves them on the configured carrier.

use clap::{Parser, Subcommand};
use raptor_rpc::config::{ConfigLoader, LogConfig, RaptorConfig, ENV_PREFIX};
use raptor_rpc::{create_processor, transport, RaptorError, RaptorResult};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Command line arguments for Raptor RPC.
#[derive(Parser, Debug)]
#[clap(name = "raptor-rpc", version, author, about)]
struct Args {
    /// Path to configuration file
    #[clap(short, long, value_parser)]
    config: Option<PathBuf>,

    /// Command to execute
    #[clap(subcommand)]
    command: Option<Command>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the built-in methods on the configured carrier
    Serve,

    /// Validate the configuration file
    Validate,

    /// Generate a default configuration file
    GenConfig {
        /// Path to output configuration file
        #[clap(short, long, value_parser)]
        output: PathBuf,
    },
}

/// Initialize the logging system.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_logging(log: &LogConfig) -> RaptorResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let registry = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_error::ErrorLayer::default());

    let result = if log.json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_file(log.source_location)
                    .with_line_number(log.source_location),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .pretty()
                    .with_file(log.source_location)
                    .with_line_number(log.source_location)
                    .with_thread_names(true),
            )
            .try_init()
    };

    result.map_err(|e| RaptorError::Custom(format!("Failed to set global tracing subscriber: {e}")))
}

fn load_or_exit(loader: &ConfigLoader) -> RaptorConfig {
    match loader.load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    }
}

fn serve(config: RaptorConfig) -> RaptorResult<()> {
    let runtime = if config.server.worker_threads == 1 {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
    } else {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.server.worker_threads)
            .enable_all()
            .build()?
    };

    runtime.block_on(async {
        info!(
            "Starting {} with carrier: {}, address: {}",
            config.server.name,
            config.server.carrier,
            config.server.socket_addr()
        );

        let processor = Arc::new(create_processor());
        transport::serve(
            &config.server.carrier,
            config.server.socket_addr(),
            processor,
            &config.limits,
        )
        .await?;
        Ok::<(), RaptorError>(())
    })
}

/// Main entry point for the application.
fn main() -> RaptorResult<()> {
    // Parse command-line arguments
    let args = Args::parse();
    let loader = ConfigLoader::new(args.config.as_deref(), ENV_PREFIX);

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = load_or_exit(&loader);
            init_logging(&config.log)?;
            serve(config)
        }
        Command::Validate => {
            let config = load_or_exit(&loader);
            init_logging(&config.log)?;
            info!("Configuration validated successfully");
            Ok(())
        }
        Command::GenConfig { output } => {
            let default_config = RaptorConfig::default();

            // Create parent directories if they don't exist
            if let Some(parent) = output.parent() {
                std::fs::create_dir_all(parent)?;
            }

            let toml = default_config.to_toml().map_err(RaptorError::Config)?;
            std::fs::write(&output, toml)?;

            println!("Default configuration written to {}", output.display());
            Ok(())
        }
    }
}
