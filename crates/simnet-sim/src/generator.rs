//! Traffic generator — one randomized counter update per interface per cycle.
//!
//! The hour of day selects a traffic multiplier that scales a random base
//! load; the interface's [`Profile`] then decides how that load lands on the
//! counters and which error or link-state rolls apply. An interface that is
//! down when its step starts is left untouched apart from the recovery roll.

use crate::draw::Draw;
use crate::interface::{Deltas, Interface, LinkStatus, Profile};

/// Wired: 1 in N steps adds a receive error.
pub const WIRED_RX_ERROR_ODDS: u32 = 100;
/// Wireless: 1 in N steps adds a receive error.
pub const WIRELESS_RX_ERROR_ODDS: u32 = 50;
/// Wireless: 1 in N steps adds a transmit error.
pub const WIRELESS_TX_ERROR_ODDS: u32 = 60;
/// Wireless: 1 in N steps drops the link.
pub const WIRELESS_DROP_ODDS: u32 = 200;
/// Any profile: 1 in N steps brings a down link back up.
pub const RECOVERY_ODDS: u32 = 20;

/// A link-state change produced by a generator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    WentDown,
    CameUp,
}

/// Inclusive multiplier range for an hour of the day (0-23).
pub fn multiplier_range(hour: u32) -> (i64, i64) {
    match hour {
        9..=17 => (2, 4),
        18..=22 => (1, 2),
        _ => (0, 1),
    }
}

/// Draw the time-of-day traffic multiplier.
pub fn traffic_multiplier<D: Draw + ?Sized>(hour: u32, draw: &mut D) -> i64 {
    let (lo, hi) = multiplier_range(hour);
    draw.between(lo, hi)
}

/// Multiplier followed by the four base draws, scaled.
fn base_load<D: Draw + ?Sized>(hour: u32, draw: &mut D) -> Deltas {
    let multiplier = traffic_multiplier(hour, draw);
    Deltas {
        rx_bytes: draw.between(1000, 5999),
        tx_bytes: draw.between(500, 3499),
        rx_packets: draw.between(10, 59),
        tx_packets: draw.between(5, 34),
    }
    .scaled(multiplier)
}

fn wireless_jitter<D: Draw + ?Sized>(draw: &mut D) -> Deltas {
    Deltas {
        rx_bytes: draw.between(-1000, 999),
        tx_bytes: draw.between(-750, 749),
        rx_packets: draw.between(-10, 9),
        tx_packets: draw.between(-7, 6),
    }
}

fn loopback_load<D: Draw + ?Sized>(draw: &mut D) -> Deltas {
    Deltas {
        rx_bytes: draw.between(100, 299),
        tx_bytes: draw.between(100, 299),
        rx_packets: draw.between(1, 5),
        tx_packets: draw.between(1, 5),
    }
}

/// Advance one interface by one cycle.
///
/// Returns the link-state transitions in the order they happened. A wireless
/// link can drop and recover within the same step, yielding both.
pub fn step<D: Draw + ?Sized>(iface: &mut Interface, hour: u32, draw: &mut D) -> Vec<Transition> {
    let mut transitions = Vec::new();

    if iface.is_up() {
        match iface.profile() {
            Profile::Wired => {
                iface.apply(base_load(hour, draw));
                if draw.one_in(WIRED_RX_ERROR_ODDS) {
                    iface.rx_errors += 1;
                }
            }
            Profile::Wireless => {
                let base = base_load(hour, draw);
                iface.apply(base + wireless_jitter(draw));
                if draw.one_in(WIRELESS_RX_ERROR_ODDS) {
                    iface.rx_errors += 1;
                }
                if draw.one_in(WIRELESS_TX_ERROR_ODDS) {
                    iface.tx_errors += 1;
                }
                if draw.one_in(WIRELESS_DROP_ODDS) {
                    iface.status = LinkStatus::Down;
                    transitions.push(Transition::WentDown);
                }
            }
            Profile::Loopback => iface.apply(loopback_load(draw)),
        }
    }

    if !iface.is_up() && draw.one_in(RECOVERY_ODDS) {
        iface.status = LinkStatus::Up;
        transitions.push(Transition::CameUp);
    }

    transitions
}
