mod detector;
mod pipeline;
mod source;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};
use vigil_config::ConfigLoader;
use vigil_queue::{AmqpClient, QueueClient};

use crate::detector::{Detector, NoopDetector, ScriptedDetector};
use crate::pipeline::ProducerPipeline;
use crate::source::{FrameSource, ImageDirSource, TestPatternSource};

#[derive(Parser, Debug)]
#[command(author, version, about = "Vigil detection producer")]
struct Args {
    #[arg(long, default_value = "./config")]
    config_dir: String,

    /// Override [producer].source_dir from the config file.
    #[arg(long)]
    source_dir: Option<PathBuf>,

    /// Publish this many synthetic test-pattern frames instead of reading
    /// a source directory.
    #[arg(long)]
    synthetic_frames: Option<u32>,

    /// Detection stage: "noop" or "scripted".
    #[arg(long, default_value = "noop")]
    detector: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();
    let config = ConfigLoader::new(&args.config_dir).load_global()?;

    // Init state: broker connection, queue declaration, and the video
    // source are all fatal on failure.
    let client = AmqpClient::connect(&config.broker.url)
        .await
        .context("broker unreachable at startup")?;
    client.declare_queue(&config.broker.queue).await?;
    let client: Arc<dyn QueueClient> = Arc::new(client);

    let source: Box<dyn FrameSource> = match args.synthetic_frames {
        Some(frames) => Box::new(TestPatternSource::new(frames, 640, 480)),
        None => {
            let dir = args
                .source_dir
                .unwrap_or_else(|| config.producer.source_dir.clone());
            Box::new(ImageDirSource::open(&dir)?)
        }
    };

    let mut detector: Box<dyn Detector> = match args.detector.as_str() {
        "noop" => Box::new(NoopDetector),
        "scripted" => Box::new(ScriptedDetector::walking_person()),
        other => bail!("unknown detector: {other}"),
    };

    info!(queue = %config.broker.queue, "producer starting");
    let pipeline = ProducerPipeline::new(
        client.clone(),
        config.broker.queue.clone(),
        config.stream.jpeg_quality,
    );

    let result = pipeline.run(source, detector.as_mut()).await;
    if let Err(err) = client.disconnect().await {
        warn!(error = %err, "broker disconnect failed");
    }
    result?;
    Ok(())
}
