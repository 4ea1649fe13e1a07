use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod config;
mod plotting;
mod workflow;

/// Water quality monitoring dashboard polling a ThingSpeak channel.
#[derive(Debug, Parser)]
#[command(name = "hydrowatch", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of refresh ticks to run; 0 runs until interrupted.
    #[arg(long, default_value_t = 0)]
    ticks: u64,

    /// Refresh interval override, in seconds.
    #[arg(long)]
    interval: Option<u64>,

    /// Output directory override for session artifacts.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Skip the remote channel entirely and generate synthetic data.
    #[arg(long)]
    offline: bool,
}

fn main() -> Result<()> {
    println!("--- Hydrowatch Dashboard ---");

    let cli = Cli::parse();

    let mut config = config::DashboardConfig::load(cli.config.as_deref())?;
    if let Some(interval) = cli.interval {
        config.tick_interval_secs = interval;
    }
    if let Some(dir) = &cli.output_dir {
        config.output_dir = dir.display().to_string();
    }

    let options = workflow::SessionOptions {
        ticks: if cli.ticks == 0 { None } else { Some(cli.ticks) },
        offline: cli.offline,
    };

    workflow::run_monitoring_session(&config, &options)
}
