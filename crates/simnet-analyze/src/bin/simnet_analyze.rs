//! # SimNet Analyzer
//!
//! Prints a per-interface analysis and summary report of a SimNet CSV log
//! and draws it as a four-panel PNG.
//!
//! ```bash
//! simnet-analyze                   # reads ./simnet_data.csv
//! simnet-analyze /tmp/run.csv --charts /tmp/run.png
//! ```

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use simnet_analyze::DEFAULT_CHARTS;
use simnet_sim::config::DEFAULT_OUTPUT;

#[derive(Parser, Debug)]
#[command(name = "simnet-analyze", about = "Analyze a SimNet CSV log")]
struct Cli {
    /// Log written by simnet-logger.
    #[arg(default_value = DEFAULT_OUTPUT)]
    path: PathBuf,

    /// PNG file for the charts (overwritten).
    #[arg(long, default_value = DEFAULT_CHARTS)]
    charts: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cli = Cli::parse();

    simnet_analyze::render_banner(&mut std::io::stdout())?;
    let rows = match simnet_analyze::load(&cli.path) {
        Ok(rows) => rows,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    println!("✓ Loaded {} data points", rows.len());

    let mut stdout = std::io::stdout().lock();
    simnet_analyze::render_interfaces(&mut stdout, &rows)?;

    // ── Charts ──────────────────────────────────────────────────
    writeln!(stdout, "\n=== CREATING CHARTS ===")?;
    let charted = match simnet_analyze::render_charts(&rows, &cli.charts) {
        Ok(()) => {
            writeln!(stdout, "✓ Saved charts as '{}'", cli.charts.display())?;
            true
        }
        Err(e) => {
            tracing::warn!(path = %cli.charts.display(), error = %e, "charts not written");
            writeln!(stdout, "⚠ Charts not saved: {e}")?;
            false
        }
    };

    simnet_analyze::render_summary(&mut stdout, &rows)?;
    writeln!(stdout, "\nAnalysis complete!")?;
    if charted {
        writeln!(stdout, "Generated: {}", cli.charts.display())?;
    }
    Ok(())
}
