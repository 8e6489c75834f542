use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use tokio::sync::watch;
use tracing::info;

use mailarc_broker::Broker;
use mailarc_consumer::{Consumer, Dispatcher};
use mailarc_storage::FsAttachmentStore;

use crate::config::WorkerConfig;

mod config;
mod telemetry;

/// Attachment lifecycle worker for the mailarc archive.
#[derive(Parser, Debug)]
#[command(
    name = "mailarc-worker",
    about = "Consumes attachment lifecycle events and applies them to storage"
)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "mailarc.toml")]
    config: String,

    /// Override the broker URI.
    #[arg(long)]
    uri: Option<String>,

    /// Override the queue name.
    #[arg(long)]
    queue: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration from the TOML file, or use defaults if the file
    // does not exist.
    let mut config: WorkerConfig = if Path::new(&cli.config).exists() {
        let contents = std::fs::read_to_string(&cli.config)?;
        toml::from_str(&contents)?
    } else {
        toml::from_str("")?
    };
    if let Some(uri) = cli.uri {
        config.broker.uri = uri;
    }
    if let Some(queue) = cli.queue {
        config.broker.queue = queue;
    }

    telemetry::init();

    if !Path::new(&cli.config).exists() {
        info!(path = %cli.config, "config file not found, using defaults");
    }

    // Fail fast if the storage root is not usable; nothing should be
    // consumed from the queue before the backend can serve removals.
    let store = FsAttachmentStore::new(&config.storage.root);
    store.validate().await?;
    info!(root = %config.storage.root.display(), "storage backend ready");

    let consumer = Consumer::new(Dispatcher::new(Arc::new(store)));

    let broker = Broker::connect(&config.broker).await?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let channel = broker.channel().clone();
    let queue = config.broker.queue.clone();
    let consume_handle = tokio::spawn(async move {
        mailarc_broker::consume::run(&channel, &queue, &consumer, shutdown_rx).await
    });

    tokio::signal::ctrl_c().await?;
    info!("interrupt received, shutting down");
    let _ = shutdown_tx.send(true);

    // Let the in-flight delivery finish before releasing the connection.
    consume_handle.await??;
    broker.close().await?;
    info!("worker stopped");
    Ok(())
}
