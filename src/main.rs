//! Main entry point for the Table Ladder bot
//!
//! Reads chat updates as newline-delimited JSON from stdin and writes one
//! JSON reply per answered update to stdout. Logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use table_ladder::config::{validate_config, AppConfig};
use table_ladder::transport::MessageUtils;
use table_ladder::{Dispatcher, FsObjectStore};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

/// Table Ladder - Elo ratings and a table queue for a chat group
#[derive(Parser)]
#[command(
    name = "table-ladder",
    version,
    about = "Elo ladder and table booking queue for a chat group",
    long_about = "Table Ladder records games between registered players with a modified Elo \
                 rating, tracks head-to-head stats and keeps a FIFO queue for a shared table. \
                 Updates are read as JSON lines from stdin, replies are written to stdout."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Data directory override
    #[arg(long, value_name = "DIR", help = "Override the object store directory")]
    data_dir: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Admin handle override
    #[arg(long, value_name = "HANDLE", help = "Override the admin handle")]
    admin: Option<String>,

    /// Group chat override
    #[arg(long, value_name = "TITLE", help = "Override the group chat title")]
    group: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging")]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without reading updates")]
    dry_run: bool,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display startup banner with service information
fn display_startup_banner(config: &AppConfig) {
    info!("🏓 Table Ladder v{}", table_ladder::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    info!("   Data dir: {}", config.storage.data_dir.display());
    info!(
        "   Admin: {}",
        config.access.admin_handle.as_deref().unwrap_or("<none>")
    );
    info!(
        "   Group: {}",
        config.access.group_name.as_deref().unwrap_or("<any chat>")
    );
    info!(
        "   Start rating: {}, K: {}, active top: {} days",
        config.ladder.start_rating, config.ladder.k_factor, config.ladder.active_top_days
    );
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
}

/// Load and merge configuration from environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(data_dir) = &args.data_dir {
        config.storage.data_dir = data_dir.clone();
    }

    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    if let Some(admin) = &args.admin {
        config.access.admin_handle = Some(admin.trim_start_matches('@').to_string());
    }

    if let Some(group) = &args.group {
        config.access.group_name = Some(group.clone());
    }

    validate_config(&config)?;
    Ok(config)
}

/// Answer updates from stdin until it closes
async fn serve(dispatcher: Dispatcher) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut answered = 0u64;

    while let Some(line) = lines.next_line().await.context("Failed to read update")? {
        if line.trim().is_empty() {
            continue;
        }

        let Some(response) = dispatcher.dispatch_bytes(line.as_bytes()).await else {
            continue;
        };

        match MessageUtils::serialize_response(&response) {
            Ok(mut out) => {
                out.push('\n');
                stdout
                    .write_all(out.as_bytes())
                    .await
                    .context("Failed to write reply")?;
                stdout.flush().await.context("Failed to flush reply")?;
                answered += 1;
            }
            Err(e) => error!("Failed to write reply: {}", e),
        }
    }

    info!("Input closed after {} replies", answered);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load configuration (CLI args can override environment/config file)
    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        info!("Configuration validation successful");
        display_startup_banner(&config);
        info!("Dry run completed - exiting without reading updates");
        return Ok(());
    }

    display_startup_banner(&config);

    let store = Arc::new(FsObjectStore::new(config.storage.data_dir.clone()));
    let dispatcher = Dispatcher::from_config(store, &config);

    info!("✅ Table Ladder is reading updates from stdin");
    if let Err(e) = serve(dispatcher).await {
        error!("Update loop failed: {:#}", e);
        std::process::exit(1);
    }

    info!("🛑 Table Ladder stopped");
    Ok(())
}
