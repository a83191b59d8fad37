//! Deterministic doubles for driving the generator and runner in tests.

use std::cell::Cell;
use std::collections::HashSet;
use std::time::Duration;

use crate::clock::Clock;
use crate::draw::Draw;

/// Which end of each range a [`ScriptedDraw`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    Low,
    High,
}

/// Draw source that always picks one end of the requested range and fires
/// only the chance rolls whose odds were armed with [`ScriptedDraw::trigger`].
#[derive(Debug, Clone)]
pub struct ScriptedDraw {
    pick: Pick,
    armed: HashSet<u32>,
    draws: usize,
}

impl ScriptedDraw {
    pub fn new(pick: Pick) -> Self {
        Self {
            pick,
            armed: HashSet::new(),
            draws: 0,
        }
    }

    pub fn low() -> Self {
        Self::new(Pick::Low)
    }

    pub fn high() -> Self {
        Self::new(Pick::High)
    }

    /// Make every `one_in(odds)` roll fire.
    pub fn trigger(mut self, odds: u32) -> Self {
        self.armed.insert(odds);
        self
    }

    pub fn arm(&mut self, odds: u32) {
        self.armed.insert(odds);
    }

    pub fn disarm(&mut self, odds: u32) {
        self.armed.remove(&odds);
    }

    /// Number of draws consumed so far.
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl Draw for ScriptedDraw {
    fn between(&mut self, lo: i64, hi: i64) -> i64 {
        self.draws += 1;
        match self.pick {
            Pick::Low => lo,
            Pick::High => hi,
        }
    }

    fn one_in(&mut self, odds: u32) -> bool {
        self.draws += 1;
        self.armed.contains(&odds)
    }
}

/// Clock frozen at a given hour and epoch second. Sleeping only counts.
#[derive(Debug, Default)]
pub struct FixedClock {
    pub hour: u32,
    pub unix_seconds: i64,
    sleeps: Cell<u32>,
}

impl FixedClock {
    pub fn new(hour: u32, unix_seconds: i64) -> Self {
        Self {
            hour,
            unix_seconds,
            sleeps: Cell::new(0),
        }
    }

    pub fn sleeps(&self) -> u32 {
        self.sleeps.get()
    }
}

impl Clock for FixedClock {
    fn hour(&self) -> u32 {
        self.hour
    }

    fn unix_seconds(&self) -> i64 {
        self.unix_seconds
    }

    fn sleep(&self, _interval: Duration) {
        self.sleeps.set(self.sleeps.get() + 1);
    }
}
