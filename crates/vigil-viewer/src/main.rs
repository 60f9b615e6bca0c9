use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{info, warn};
use vigil_config::ConfigLoader;
use vigil_queue::{AmqpClient, QueueClient};
use vigil_viewer::{create_router, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about = "Vigil detection viewer")]
struct Args {
    #[arg(long, default_value = "./config")]
    config_dir: String,

    /// Override [stream].bind from the config file.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = ConfigLoader::new(&args.config_dir).load_global()?;

    // Broker connection failures at startup are fatal; everything after
    // this point is logged and survived.
    let client = AmqpClient::connect(&config.broker.url)
        .await
        .context("broker unreachable at startup")?;
    client.declare_queue(&config.broker.queue).await?;
    let client: Arc<dyn QueueClient> = Arc::new(client);

    let state = AppState {
        client: client.clone(),
        queue: config.broker.queue.clone(),
        boundary: config.stream.boundary.clone(),
        poll_idle: Duration::from_millis(config.stream.poll_idle_ms),
        jpeg_quality: config.stream.jpeg_quality,
    };

    let bind = args.bind.unwrap_or_else(|| config.stream.bind.clone());
    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    info!(bind = %bind, queue = %config.broker.queue, "viewer listening");

    let result = axum::serve(listener, create_router(state)).await;
    if let Err(err) = client.disconnect().await {
        warn!(error = %err, "broker disconnect failed");
    }
    result?;
    Ok(())
}
