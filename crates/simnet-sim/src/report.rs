//! Console output: startup banner, per-cycle status table, link-state
//! notifications, and the shutdown summary.

use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use crate::generator::Transition;
use crate::interface::{Interface, Registry};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Bytes as binary megabytes with two decimals.
pub fn megabytes(bytes: i64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_MB)
}

/// One status-table row.
pub fn format_row(iface: &Interface) -> String {
    format!(
        "{:<9} | {:<6} | {:>9} | {:>9} | {:>7} | {:>7} | {}/{}",
        iface.name(),
        iface.status.as_str(),
        iface.rx_bytes,
        iface.tx_bytes,
        iface.rx_packets,
        iface.tx_packets,
        iface.rx_errors,
        iface.tx_errors,
    )
}

/// Human-readable reporter over any writer (stdout in production).
pub struct StatusReporter<W: Write> {
    out: W,
}

impl<W: Write> StatusReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn banner(&mut self) -> io::Result<()> {
        writeln!(self.out, "╔══════════════════════════════════════════════════════════════╗")?;
        writeln!(self.out, "║                      SimNet Logger                           ║")?;
        writeln!(self.out, "║              Network Interface Traffic Simulator             ║")?;
        writeln!(self.out, "╚══════════════════════════════════════════════════════════════╝")?;
        writeln!(self.out)
    }

    /// Lines printed once the log is open and the registry is built.
    pub fn startup(&mut self, log_path: &Path, interfaces: usize, interval: Duration) -> io::Result<()> {
        writeln!(self.out, "✓ Created {} for data logging", log_path.display())?;
        writeln!(self.out, "✓ Initialized {interfaces} network interfaces")?;
        writeln!(self.out, "Starting network simulation...")?;
        writeln!(
            self.out,
            "Logging data every {} seconds (Press Ctrl+C to stop)",
            interval.as_secs()
        )?;
        writeln!(self.out)?;
        self.out.flush()
    }

    pub fn notify(&mut self, name: &str, transition: Transition) -> io::Result<()> {
        match transition {
            Transition::WentDown => writeln!(self.out, "WARNING: {name} went down!")?,
            Transition::CameUp => writeln!(self.out, "INFO: {name} is back up!")?,
        }
        self.out.flush()
    }

    /// Status table for `cycle` plus totals over the interfaces that are up.
    pub fn snapshot(&mut self, cycle: u64, registry: &Registry) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== SimNet Logger - Cycle #{cycle} ===")?;
        writeln!(
            self.out,
            "Interface | Status | RX Bytes  | TX Bytes  | RX Pkts | TX Pkts | Errors"
        )?;
        writeln!(
            self.out,
            "----------|--------|-----------|-----------|---------|---------|--------"
        )?;
        for iface in registry {
            writeln!(self.out, "{}", format_row(iface))?;
        }

        let totals = registry.totals();
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Total Traffic: RX={} MB, TX={} MB",
            megabytes(totals.rx_bytes),
            megabytes(totals.tx_bytes)
        )?;
        self.out.flush()
    }

    pub fn summary(&mut self, cycles: u64, log_path: Option<&Path>) -> io::Result<()> {
        writeln!(self.out)?;
        if let Some(path) = log_path {
            writeln!(self.out, "✓ Data logged to {}", path.display())?;
        }
        writeln!(self.out, "Simulation complete! Total cycles: {cycles}")?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
