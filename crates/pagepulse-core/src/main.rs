use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use pagepulse_collector::{spawn_aggregator, MetricsDocument, SnapshotAssembler};
use pagepulse_core::{PageTrace, PerformanceConfig, PerformanceMonitor};
use pagepulse_timing::PerformanceTimeline;

mod cli;
use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("PAGEPULSE_LOG").unwrap_or_else(|_| "pagepulse=info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "PagePulse starting");

    match args.command {
        cli::Command::Run {
            trace,
            config,
            settle_ms,
        } => run_trace(trace, config, settle_ms).await,
        cli::Command::Inspect { trace, config } => inspect_trace(trace, config).await,
    }
}

async fn run_trace(trace: PathBuf, config: PathBuf, settle_ms: Option<u64>) -> Result<()> {
    let mut config = PerformanceConfig::load(&config)?;
    if let Some(settle_ms) = settle_ms {
        config.settle_delay_ms = settle_ms;
    }
    let trace = PageTrace::load(&trace)?;

    let timeline = Arc::new(PerformanceTimeline::new());
    let monitor = PerformanceMonitor::new(config, timeline.clone())?;
    trace.replay(&timeline);

    match monitor.on_load(&trace.page_url).await? {
        Some(cycle) => {
            let payload = cycle.flush().await;
            tracing::info!(
                page_url = %payload.common.page_url,
                resources = payload.metrics.resources.len(),
                "collection cycle complete"
            );
        }
        None => tracing::info!("nothing reported"),
    }

    monitor.shutdown().await
}

async fn inspect_trace(trace: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let trace = PageTrace::load(&trace)?;
    let timeline = Arc::new(PerformanceTimeline::new());

    let document: MetricsDocument = match config {
        Some(path) => {
            let monitor = PerformanceMonitor::new(PerformanceConfig::load(&path)?, timeline.clone())?;
            trace.replay(&timeline);
            let document = monitor.collect().await?;
            monitor.shutdown().await?;
            document
        }
        None => {
            let aggregator = spawn_aggregator(timeline.clone());
            let assembler = SnapshotAssembler::new(aggregator.clone(), timeline.clone());
            trace.replay(&timeline);
            let document = assembler.assemble().await?;
            aggregator.shutdown().await?;
            document
        }
    };

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
