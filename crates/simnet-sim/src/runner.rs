//! Cycle runner — drives generate → persist → display → sleep until stopped.
//!
//! The stop flag is only polled at the top of each cycle, so a cycle that has
//! started always writes its rows and prints its table. A signal received
//! during the sleep takes effect once the sleep returns.

use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::clock::Clock;
use crate::draw::Draw;
use crate::error::SimError;
use crate::generator::{self, Transition};
use crate::interface::Registry;
use crate::report::StatusReporter;
use crate::sink::CsvSink;

/// Outcome of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
}

pub struct CycleRunner<D, C, L: Write, O: Write> {
    registry: Registry,
    draw: D,
    clock: C,
    sink: CsvSink<L>,
    reporter: StatusReporter<O>,
    interval: Duration,
    max_cycles: Option<u64>,
    running: Arc<AtomicBool>,
    cycle: u64,
}

impl<D: Draw, C: Clock, L: Write, O: Write> CycleRunner<D, C, L, O> {
    pub fn new(
        registry: Registry,
        draw: D,
        clock: C,
        sink: CsvSink<L>,
        reporter: StatusReporter<O>,
        interval: Duration,
    ) -> Self {
        Self {
            registry,
            draw,
            clock,
            sink,
            reporter,
            interval,
            max_cycles: None,
            running: Arc::new(AtomicBool::new(true)),
            cycle: 0,
        }
    }

    /// Stop after `max` cycles instead of running until signalled.
    pub fn with_max_cycles(mut self, max: Option<u64>) -> Self {
        self.max_cycles = max;
        self
    }

    /// Share the "keep running" flag with a signal handler.
    pub fn with_running_flag(mut self, running: Arc<AtomicBool>) -> Self {
        self.running = running;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn draw_mut(&mut self) -> &mut D {
        &mut self.draw
    }

    /// Cycles completed so far.
    pub fn cycles(&self) -> u64 {
        self.cycle
    }

    /// Run one full cycle without sleeping. Returns its 1-based number.
    pub fn run_cycle(&mut self) -> u64 {
        self.cycle += 1;
        let cycle = self.cycle;
        let hour = self.clock.hour();

        for iface in self.registry.iter_mut() {
            for transition in generator::step(iface, hour, &mut self.draw) {
                match transition {
                    Transition::WentDown => {
                        tracing::warn!(
                            interface = iface.name(),
                            profile = %iface.profile(),
                            cycle,
                            "interface went down"
                        )
                    }
                    Transition::CameUp => {
                        tracing::info!(
                            interface = iface.name(),
                            profile = %iface.profile(),
                            cycle,
                            "interface recovered"
                        )
                    }
                }
                if let Err(e) = self.reporter.notify(iface.name(), transition) {
                    tracing::warn!(error = %e, "console write failed");
                }
            }
        }

        let timestamp = self.clock.unix_seconds();
        if let Err(e) = self.sink.record(timestamp, cycle, &self.registry) {
            tracing::error!(error = %e, cycle, "failed to append log rows");
        }

        if let Err(e) = self.reporter.snapshot(cycle, &self.registry) {
            tracing::warn!(error = %e, "console write failed");
        }

        let totals = self.registry.totals();
        tracing::debug!(
            cycle,
            hour,
            rx_bytes = totals.rx_bytes,
            tx_bytes = totals.tx_bytes,
            rows = self.sink.rows(),
            "cycle complete"
        );
        cycle
    }

    /// Loop until the running flag clears or the cycle limit is reached.
    pub fn run(&mut self) -> RunSummary {
        while self.running.load(Ordering::Relaxed) {
            self.run_cycle();
            if self.max_cycles.is_some_and(|max| self.cycle >= max) {
                tracing::info!(cycles = self.cycle, "cycle limit reached");
                break;
            }
            self.clock.sleep(self.interval);
        }
        RunSummary { cycles: self.cycle }
    }

    /// Print the shutdown summary and release the log.
    ///
    /// Hands back the log writer and the console writer.
    pub fn finish(self, log_path: Option<&Path>) -> Result<(L, O), SimError> {
        let mut reporter = self.reporter;
        let log = self.sink.into_inner();
        if let Err(e) = reporter.summary(self.cycle, log_path) {
            tracing::warn!(error = %e, "console write failed");
        }
        tracing::info!(cycles = self.cycle, "simulation stopped");
        Ok((log?, reporter.into_inner()))
    }
}
