use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pagepulse", version, about = "Page-load performance telemetry collector")]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replay a recorded page load and deliver its report.
    Run {
        trace: PathBuf,
        #[arg(long, env = "PAGEPULSE_CONFIG")]
        config: PathBuf,
        /// Override the configured settle delay.
        #[arg(long)]
        settle_ms: Option<u64>,
    },
    /// Replay a recorded page load and print the metrics document.
    Inspect {
        trace: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
