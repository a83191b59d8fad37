//! Synthetic network traffic simulation.
//!
//! Maintains a fixed set of simulated network interfaces and perturbs their
//! counters with time-of-day weighted random traffic once per cycle:
//!
//! - **Interfaces** — the fixed registry (`eth0`, `wlan0`, `lo`) and its counters
//! - **Generator** — per-profile traffic synthesis driven by a [`draw::Draw`] source
//! - **Runner** — the cycle loop: generate, persist, display, sleep
//! - **Sink** — append-only CSV log of every interface per cycle
//! - **Report** — console banner, status table, and transition notifications

pub mod clock;
pub mod config;
pub mod draw;
pub mod error;
pub mod generator;
pub mod interface;
pub mod report;
pub mod runner;
pub mod sink;

pub mod test_util;

pub use error::SimError;
