//! Foros review bot - main entry point
//!
//! Loads the staff document, connects the Telegram gateway, and runs the
//! dispatcher over a long-polling update loop until shutdown.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use foros_bot::dispatcher::Dispatcher;
use foros_bot::telegram::{ApiClient, TelegramGateway, UpdatePoller};
use foros_common::config::{BotConfig, ConfigOverrides};
use foros_common::store::StaffStore;

/// Command-line arguments for foros-bot
#[derive(Parser, Debug)]
#[command(name = "foros-bot")]
#[command(about = "Review and tipping bot for the Foros restaurant")]
#[command(version)]
struct Args {
    /// Bot API token
    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    token: String,

    /// Path of the staff document
    #[arg(long, env = "FOROS_DATA_FILE")]
    data_file: Option<PathBuf>,

    /// Directory holding staff photos
    #[arg(long, env = "FOROS_PHOTOS_DIR")]
    photos_dir: Option<PathBuf>,

    /// Optional TOML config file
    #[arg(long, env = "FOROS_CONFIG")]
    config: Option<PathBuf>,

    /// Minimum review count for leaderboard inclusion
    #[arg(long)]
    min_reviews: Option<usize>,

    /// Leaderboard length cap
    #[arg(long)]
    top_limit: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "foros_bot=debug,foros_common=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = BotConfig::resolve(
        args.config.as_deref(),
        ConfigOverrides {
            data_file: args.data_file,
            photos_dir: args.photos_dir,
            min_reviews: args.min_reviews,
            top_limit: args.top_limit,
        },
    )
    .context("Failed to resolve configuration")?;

    info!("Staff document: {}", config.data_file.display());
    info!("Photos directory: {}", config.photos_dir.display());

    std::fs::create_dir_all(&config.photos_dir)
        .context("Failed to create photos directory")?;

    let store = StaffStore::load(&config.data_file).context("Failed to load staff document")?;

    let api = ApiClient::new(&args.token);
    let mut poller = UpdatePoller::new(api.clone());
    poller
        .drop_pending()
        .await
        .context("Failed to reach the Bot API")?;

    let mut dispatcher = Dispatcher::new(TelegramGateway::new(api), store, config);
    info!("Foros review bot started");

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            batch = poller.next_batch() => match batch {
                Ok(events) => {
                    for event in events {
                        if let Err(err) = dispatcher.dispatch(event).await {
                            error!("Update handling failed: {err}");
                        }
                    }
                }
                Err(err) => {
                    error!("Polling failed: {err}");
                    tokio::time::sleep(Duration::from_secs(3)).await;
                }
            },
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
