//! Simulated network interfaces and the fixed registry that owns them.
//!
//! The registry is built once at startup and never grows or shrinks. Each
//! interface carries an explicit [`Profile`] tag that selects how the
//! generator synthesizes its traffic.

use std::ops::Add;

// ── Profile ─────────────────────────────────────────────────────────

/// Traffic behavior variant of an interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Steady traffic, very rare receive errors.
    Wired,
    /// Jittery traffic, more frequent errors, occasional link drops.
    Wireless,
    /// Small fixed-range traffic, independent of time of day, no errors.
    Loopback,
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Profile::Wired => write!(f, "wired"),
            Profile::Wireless => write!(f, "wireless"),
            Profile::Loopback => write!(f, "loopback"),
        }
    }
}

// ── Link status ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    #[default]
    Up,
    Down,
}

impl LinkStatus {
    pub fn is_up(self) -> bool {
        self == LinkStatus::Up
    }

    /// `1` for up, `0` for down, as written to the log.
    pub fn as_flag(self) -> u8 {
        match self {
            LinkStatus::Up => 1,
            LinkStatus::Down => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LinkStatus::Up => "UP",
            LinkStatus::Down => "DOWN",
        }
    }
}

// ── Interface ───────────────────────────────────────────────────────

/// Per-cycle counter increments. Components may be negative (wireless jitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deltas {
    pub rx_bytes: i64,
    pub tx_bytes: i64,
    pub rx_packets: i64,
    pub tx_packets: i64,
}

impl Deltas {
    /// Multiply every component by `factor`.
    pub fn scaled(self, factor: i64) -> Self {
        Deltas {
            rx_bytes: self.rx_bytes * factor,
            tx_bytes: self.tx_bytes * factor,
            rx_packets: self.rx_packets * factor,
            tx_packets: self.tx_packets * factor,
        }
    }
}

impl Add for Deltas {
    type Output = Deltas;

    fn add(self, rhs: Deltas) -> Deltas {
        Deltas {
            rx_bytes: self.rx_bytes + rhs.rx_bytes,
            tx_bytes: self.tx_bytes + rhs.tx_bytes,
            rx_packets: self.rx_packets + rhs.rx_packets,
            tx_packets: self.tx_packets + rhs.tx_packets,
        }
    }
}

/// One simulated NIC with cumulative counters.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    name: String,
    profile: Profile,
    link_speed_mbps: f64,
    pub rx_bytes: i64,
    pub tx_bytes: i64,
    pub rx_packets: i64,
    pub tx_packets: i64,
    pub rx_errors: u64,
    pub tx_errors: u64,
    pub status: LinkStatus,
}

impl Interface {
    /// A new interface with zeroed counters, status up.
    pub fn new(name: impl Into<String>, profile: Profile, link_speed_mbps: f64) -> Self {
        Self {
            name: name.into(),
            profile,
            link_speed_mbps,
            rx_bytes: 0,
            tx_bytes: 0,
            rx_packets: 0,
            tx_packets: 0,
            rx_errors: 0,
            tx_errors: 0,
            status: LinkStatus::Up,
        }
    }

    fn with_counters(mut self, bytes: (i64, i64), packets: (i64, i64), errors: (u64, u64)) -> Self {
        (self.rx_bytes, self.tx_bytes) = bytes;
        (self.rx_packets, self.tx_packets) = packets;
        (self.rx_errors, self.tx_errors) = errors;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    /// Static capacity rating in Mbps.
    pub fn link_speed_mbps(&self) -> f64 {
        self.link_speed_mbps
    }

    pub fn is_up(&self) -> bool {
        self.status.is_up()
    }

    /// Add `d` to the byte and packet counters. No clamping.
    pub fn apply(&mut self, d: Deltas) {
        self.rx_bytes += d.rx_bytes;
        self.tx_bytes += d.tx_bytes;
        self.rx_packets += d.rx_packets;
        self.tx_packets += d.tx_packets;
    }
}

// ── Registry ────────────────────────────────────────────────────────

/// Byte totals over the interfaces that are currently up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TrafficTotals {
    pub rx_bytes: i64,
    pub tx_bytes: i64,
}

/// Ordered, fixed-size set of simulated interfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    interfaces: Vec<Interface>,
}

impl Registry {
    /// The standard three-interface setup: `eth0`, `wlan0`, `lo`.
    pub fn standard() -> Self {
        Self {
            interfaces: vec![
                Interface::new("eth0", Profile::Wired, 1000.0).with_counters(
                    (1_500_000, 800_000),
                    (1200, 900),
                    (0, 0),
                ),
                Interface::new("wlan0", Profile::Wireless, 150.0).with_counters(
                    (2_400_000, 1_200_000),
                    (1800, 1100),
                    (2, 1),
                ),
                Interface::new("lo", Profile::Loopback, 0.0).with_counters(
                    (45_000, 45_000),
                    (120, 120),
                    (0, 0),
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interfaces.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Interface> {
        self.interfaces.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, Interface> {
        self.interfaces.iter_mut()
    }

    pub fn get(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.iter_mut().find(|i| i.name == name)
    }

    /// Sum of rx/tx bytes across interfaces whose status is up.
    pub fn totals(&self) -> TrafficTotals {
        self.interfaces
            .iter()
            .filter(|i| i.is_up())
            .fold(TrafficTotals::default(), |acc, i| TrafficTotals {
                rx_bytes: acc.rx_bytes + i.rx_bytes,
                tx_bytes: acc.tx_bytes + i.tx_bytes,
            })
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Interface;
    type IntoIter = std::slice::Iter<'a, Interface>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
