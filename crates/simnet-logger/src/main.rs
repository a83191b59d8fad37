//! SimNet Logger
//!
//! Simulates three network interfaces (`eth0`, `wlan0`, `lo`), perturbs their
//! counters with time-of-day weighted random traffic every few seconds,
//! prints a status table each cycle, and appends every interface's state to
//! a CSV log for later analysis with `simnet-analyze`.
//!
//! Runs until Ctrl+C. The cycle in progress when the signal arrives always
//! completes before the logger exits.

use std::fs::File;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use simnet_sim::clock::SystemClock;
use simnet_sim::config::{SimConfig, SimConfigInput};
use simnet_sim::draw::SeededDraw;
use simnet_sim::interface::Registry;
use simnet_sim::report::StatusReporter;
use simnet_sim::runner::CycleRunner;
use simnet_sim::sink::CsvSink;

/// Network interface traffic simulator.
#[derive(Parser, Debug)]
#[command(name = "simnet-logger", about = "Network interface traffic simulator")]
struct Cli {
    /// TOML file with `output`, `interval_secs`, `seed`, `max_cycles`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// CSV log path (truncated on start).
    #[arg(long)]
    output: Option<PathBuf>,

    /// Seconds between cycles.
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Seed for the traffic generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many cycles instead of waiting for Ctrl+C.
    #[arg(long)]
    max_cycles: Option<u64>,
}

impl Cli {
    fn resolve(self) -> anyhow::Result<SimConfig> {
        let file = match &self.config {
            Some(path) => SimConfigInput::from_path(path)?,
            None => SimConfigInput::default(),
        };
        let flags = SimConfigInput {
            output: self.output,
            interval_secs: self.interval_secs,
            seed: self.seed,
            max_cycles: self.max_cycles,
        };
        Ok(file.overlay(flags).resolve()?)
    }
}

/// Open (and truncate) the run's log. Failure here ends the process with exit code 1.
fn open_log(config: &SimConfig) -> anyhow::Result<CsvSink<File>> {
    Ok(CsvSink::create(&config.output)?)
}

fn main() -> anyhow::Result<()> {
    // ── Logging ─────────────────────────────────────────────────
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .compact()
        .init();

    let config = Cli::parse().resolve()?;

    let mut reporter = StatusReporter::new(std::io::stdout());
    reporter.banner()?;

    // ── Graceful shutdown ───────────────────────────────────────
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            println!("\nShutting down SimNet Logger...");
            tracing::info!("shutting down...");
            running.store(false, Ordering::Relaxed);
        })
        .context("failed to install Ctrl+C handler")?;
    }

    // ── Log sink ────────────────────────────────────────────────
    let sink = open_log(&config)?;

    let registry = Registry::standard();
    reporter.startup(&config.output, registry.len(), config.interval)?;

    let draw = match config.seed {
        Some(seed) => SeededDraw::new(seed),
        None => SeededDraw::from_entropy(),
    };

    tracing::info!(
        output = %config.output.display(),
        interval_s = config.interval.as_secs(),
        seed = draw.seed(),
        max_cycles = ?config.max_cycles,
        "simnet-logger starting"
    );

    // ── Main loop ───────────────────────────────────────────────
    let mut runner = CycleRunner::new(
        registry,
        draw,
        SystemClock,
        sink,
        reporter,
        config.interval,
    )
    .with_max_cycles(config.max_cycles)
    .with_running_flag(running);

    let summary = runner.run();
    runner
        .finish(Some(&config.output))
        .with_context(|| format!("failed to close {}", config.output.display()))?;

    tracing::info!(cycles = summary.cycles, "simnet-logger stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use simnet_sim::SimError;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("simnet-logger").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_override_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("simnet.toml");
        std::fs::write(&cfg, "interval_secs = 9\nseed = 3\n").unwrap();

        let config = cli(&["--config", cfg.to_str().unwrap(), "--seed", "11"])
            .resolve()
            .unwrap();
        assert_eq!(config.interval.as_secs(), 9);
        assert_eq!(config.seed, Some(11));
        assert_eq!(config.output, PathBuf::from("simnet_data.csv"));
    }

    #[test]
    fn unopenable_log_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("missing").join("simnet_data.csv");

        let config = cli(&["--output", output.to_str().unwrap(), "--max-cycles", "1"])
            .resolve()
            .unwrap();
        let err = open_log(&config).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<SimError>(),
            Some(SimError::OpenLog { path, .. }) if *path == output
        ));
        assert!(err.to_string().starts_with("could not create log file"));
        assert!(!output.exists());
    }
}
