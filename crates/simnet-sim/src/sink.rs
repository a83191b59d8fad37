//! Append-only CSV log of interface state, one row per interface per cycle.
//!
//! The file is truncated on open and the header is written immediately, so a
//! run that is interrupted before its first cycle still leaves a valid log.
//! Every cycle is flushed as a unit.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::SimError;
use crate::interface::{Interface, Registry};

/// Column order of the log.
pub const HEADER: [&str; 11] = [
    "timestamp",
    "cycle",
    "interface",
    "rx_bytes",
    "tx_bytes",
    "rx_packets",
    "tx_packets",
    "rx_errors",
    "tx_errors",
    "status",
    "link_speed",
];

/// One log row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRow {
    pub timestamp: i64,
    pub cycle: u64,
    pub interface: String,
    pub rx_bytes: i64,
    pub tx_bytes: i64,
    pub rx_packets: i64,
    pub tx_packets: i64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    /// `1` up, `0` down.
    pub status: u8,
    #[serde(serialize_with = "one_decimal")]
    pub link_speed: f64,
}

impl LogRow {
    pub fn from_interface(timestamp: i64, cycle: u64, iface: &Interface) -> Self {
        Self {
            timestamp,
            cycle,
            interface: iface.name().to_string(),
            rx_bytes: iface.rx_bytes,
            tx_bytes: iface.tx_bytes,
            rx_packets: iface.rx_packets,
            tx_packets: iface.tx_packets,
            rx_errors: iface.rx_errors,
            tx_errors: iface.tx_errors,
            status: iface.status.as_flag(),
            link_speed: iface.link_speed_mbps(),
        }
    }

    pub fn is_up(&self) -> bool {
        self.status != 0
    }
}

fn one_decimal<S: Serializer>(value: &f64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format!("{value:.1}"))
}

/// CSV writer over any byte sink.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    rows: u64,
}

impl CsvSink<File> {
    /// Create (or truncate) the log file at `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| SimError::OpenLog {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "log file created");
        Self::new(file)
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap `inner` and write the header row.
    pub fn new(inner: W) -> Result<Self, SimError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(inner);
        writer.write_record(HEADER)?;
        writer.flush()?;
        Ok(Self { writer, rows: 0 })
    }

    /// Append one row per interface, then flush.
    pub fn record(&mut self, timestamp: i64, cycle: u64, registry: &Registry) -> Result<(), SimError> {
        for iface in registry {
            self.writer
                .serialize(LogRow::from_interface(timestamp, cycle, iface))?;
            self.rows += 1;
        }
        self.writer.flush()?;
        Ok(())
    }

    /// Data rows written so far (header excluded).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W, SimError> {
        self.writer
            .into_inner()
            .map_err(|e| SimError::Io(e.into_error()))
    }
}
