//! Offline analysis of SimNet CSV logs.
//!
//! Reads the log written by `simnet-logger`, reports the final counters of
//! every interface, and summarizes the run: cycle count, busiest interface,
//! and total error count. [`render_charts`] draws the same log as a
//! four-panel PNG.

use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use simnet_sim::sink::LogRow;

mod charts;

pub use charts::{render_charts, DEFAULT_CHARTS};

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

// ── Errors ──────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("malformed log: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("chart rendering failed: {0}")]
    Chart(String),
}

// ── Loading ─────────────────────────────────────────────────────────

/// Parse every row of the log at `path`.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<LogRow>, AnalyzeError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => AnalyzeError::NotFound(path.display().to_string()),
        _ => AnalyzeError::Io(e),
    })?;
    let rows = read_rows(file)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "log loaded");
    Ok(rows)
}

/// Parse log rows from any reader. The first line must be the header.
pub fn read_rows<R: io::Read>(reader: R) -> Result<Vec<LogRow>, AnalyzeError> {
    let mut reader = csv::Reader::from_reader(reader);
    let rows = reader.deserialize().collect::<Result<Vec<LogRow>, _>>()?;
    Ok(rows)
}

// ── Analysis ────────────────────────────────────────────────────────

/// Final state of one interface, taken from its last log row.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceReport {
    pub name: String,
    pub rx_bytes: i64,
    pub tx_bytes: i64,
    pub rx_errors: u64,
    pub tx_errors: u64,
}

impl InterfaceReport {
    pub fn total_bytes(&self) -> i64 {
        self.rx_bytes + self.tx_bytes
    }

    pub fn total_mb(&self) -> f64 {
        self.total_bytes() as f64 / BYTES_PER_MB
    }

    pub fn total_errors(&self) -> u64 {
        self.rx_errors + self.tx_errors
    }
}

/// Run-level summary.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub cycles: u64,
    pub interfaces: usize,
    /// Empty when no interface carried any traffic.
    pub busiest: String,
    pub busiest_bytes: i64,
    pub total_errors: u64,
}

impl Summary {
    pub fn is_healthy(&self) -> bool {
        self.total_errors == 0
    }
}

/// One report per interface, in order of first appearance in the log.
pub fn analyze(rows: &[LogRow]) -> Vec<InterfaceReport> {
    let mut reports: Vec<InterfaceReport> = Vec::new();
    for row in rows {
        let report = InterfaceReport {
            name: row.interface.clone(),
            rx_bytes: row.rx_bytes,
            tx_bytes: row.tx_bytes,
            rx_errors: row.rx_errors,
            tx_errors: row.tx_errors,
        };
        match reports.iter_mut().find(|r| r.name == row.interface) {
            Some(existing) => *existing = report,
            None => reports.push(report),
        }
    }
    reports
}

pub fn summarize(rows: &[LogRow]) -> Summary {
    let reports = analyze(rows);

    let mut busiest = String::new();
    let mut busiest_bytes = 0;
    for r in &reports {
        if r.total_bytes() > busiest_bytes {
            busiest_bytes = r.total_bytes();
            busiest = r.name.clone();
        }
    }

    Summary {
        cycles: rows.iter().map(|r| r.cycle).max().unwrap_or(0),
        interfaces: reports.len(),
        busiest,
        busiest_bytes,
        total_errors: reports.iter().map(InterfaceReport::total_errors).sum(),
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// `1234567` → `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn render_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "SimNet Data Analyzer")?;
    writeln!(out, "Simple network data analysis\n")
}

/// Final counters of every interface.
pub fn render_interfaces<W: Write>(out: &mut W, rows: &[LogRow]) -> io::Result<()> {
    writeln!(out, "\n=== INTERFACE ANALYSIS ===")?;
    for r in analyze(rows) {
        writeln!(out, "\n{}:", r.name.to_uppercase())?;
        writeln!(out, "  Total RX: {} bytes", group_thousands(r.rx_bytes))?;
        writeln!(out, "  Total TX: {} bytes", group_thousands(r.tx_bytes))?;
        writeln!(out, "  RX Errors: {}", r.rx_errors)?;
        writeln!(out, "  TX Errors: {}", r.tx_errors)?;
        writeln!(out, "  Total Traffic: {:.2} MB", r.total_mb())?;
    }
    Ok(())
}

pub fn render_summary<W: Write>(out: &mut W, rows: &[LogRow]) -> io::Result<()> {
    let s = summarize(rows);
    writeln!(out, "\n=== SUMMARY REPORT ===")?;
    writeln!(out, "Simulation ran for {} cycles", s.cycles)?;
    writeln!(out, "Monitored {} network interfaces", s.interfaces)?;
    writeln!(out, "Busiest interface: {}", s.busiest)?;
    writeln!(
        out,
        "Total data transferred: {:.2} MB",
        s.busiest_bytes as f64 / BYTES_PER_MB
    )?;
    writeln!(out, "Total errors detected: {}", s.total_errors)?;
    if s.is_healthy() {
        writeln!(out, "✓ No network errors - system healthy!")?;
    } else {
        writeln!(out, "⚠ Some errors detected - monitoring recommended")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cycle: u64, name: &str, rx: i64, tx: i64, errs: (u64, u64)) -> LogRow {
        LogRow {
            timestamp: 0,
            cycle,
            interface: name.into(),
            rx_bytes: rx,
            tx_bytes: tx,
            rx_packets: 0,
            tx_packets: 0,
            rx_errors: errs.0,
            tx_errors: errs.1,
            status: 1,
            link_speed: 0.0,
        }
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1_500_000), "1,500,000");
        assert_eq!(group_thousands(-12_345), "-12,345");
    }

    #[test]
    fn analyze_keeps_last_row_in_first_seen_order() {
        let rows = vec![
            row(1, "eth0", 10, 5, (0, 0)),
            row(1, "lo", 1, 1, (0, 0)),
            row(2, "eth0", 20, 9, (1, 0)),
            row(2, "lo", 2, 2, (0, 0)),
        ];
        let reports = analyze(&rows);
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "eth0");
        assert_eq!(reports[0].total_bytes(), 29);
        assert_eq!(reports[0].rx_errors, 1);
        assert_eq!(reports[1].name, "lo");
    }

    #[test]
    fn summary_finds_busiest_and_errors() {
        let rows = vec![
            row(1, "eth0", 100, 50, (0, 0)),
            row(1, "wlan0", 300, 10, (2, 1)),
            row(2, "eth0", 200, 50, (1, 0)),
            row(2, "wlan0", 300, 20, (2, 1)),
        ];
        let s = summarize(&rows);
        assert_eq!(s.cycles, 2);
        assert_eq!(s.interfaces, 2);
        assert_eq!(s.busiest, "wlan0");
        assert_eq!(s.busiest_bytes, 320);
        assert_eq!(s.total_errors, 4);
        assert!(!s.is_healthy());
    }

    #[test]
    fn busiest_tie_keeps_first() {
        let rows = vec![row(1, "a", 10, 0, (0, 0)), row(1, "b", 5, 5, (0, 0))];
        assert_eq!(summarize(&rows).busiest, "a");
    }

    #[test]
    fn empty_log_summary() {
        let s = summarize(&[]);
        assert_eq!(s.cycles, 0);
        assert_eq!(s.interfaces, 0);
        assert!(s.busiest.is_empty());
        assert!(s.is_healthy());
    }

    #[test]
    fn banner_has_both_lines() {
        let mut out = Vec::new();
        render_banner(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "SimNet Data Analyzer\nSimple network data analysis\n\n"
        );
    }

    #[test]
    fn render_sections() {
        let rows = vec![row(3, "eth0", 1_048_576, 1_048_576, (0, 0))];
        let mut out = Vec::new();
        render_interfaces(&mut out, &rows).unwrap();
        render_summary(&mut out, &rows).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("=== INTERFACE ANALYSIS ===\n\nETH0:\n  Total RX: 1,048,576 bytes"));
        assert!(text.contains("  Total Traffic: 2.00 MB"));
        assert!(text.contains("Simulation ran for 3 cycles"));
        assert!(text.contains("Busiest interface: eth0"));
        assert!(text.contains("✓ No network errors - system healthy!"));
    }
}
