//! Indicator derivation — gauge levels the host UI renders as icons.
//!
//! Pure functions from the latest readings plus config to a small
//! gauge descriptor. The UI maps `level` onto its level-list drawable
//! and `active` onto full/dimmed alpha; none of that rendering lives
//! here.

use crate::poll::calls::LimitState;

/// A gauge the UI renders: discrete level plus active/dimmed flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gauge {
    pub level: u8,
    pub active: bool,
}

impl Gauge {
    /// Dimmed gauge shown before any reading has arrived.
    pub const UNKNOWN: Gauge = Gauge {
        level: 0,
        active: false,
    };
}

/// Cylinder gauge levels.
pub const CYLINDER_EMPTY: u8 = 1;
pub const CYLINDER_PARTIAL: u8 = 2;
pub const CYLINDER_FULL: u8 = 3;

/// Map a battery voltage onto a 0-100 gauge.
///
/// A non-positive voltage means "no reading yet" (the clients reset
/// their value to 0.0 on shutdown) and yields the dimmed unknown
/// gauge. Otherwise the gauge is active: level 1 below `min_voltage`,
/// 100 above `max_voltage`, linear in between.
pub fn battery_gauge(voltage: f32, min_voltage: f32, max_voltage: f32) -> Gauge {
    if voltage <= 0.0 {
        return Gauge::UNKNOWN;
    }

    let level = if voltage < min_voltage {
        1
    } else if voltage > max_voltage {
        100
    } else {
        let span = max_voltage - min_voltage;
        ((voltage - min_voltage) / span * 100.0).round() as u8
    };

    Gauge {
        level,
        active: true,
    }
}

/// Map the limit-switch state onto the cylinder gauge.
///
/// `None` means no reading yet. `invert` swaps the empty/full switches
/// for vehicles wired the other way around. The empty switch wins when
/// both read set.
pub fn cylinder_gauge(limits: Option<LimitState>, invert: bool) -> Gauge {
    let Some(limits) = limits else {
        return Gauge::UNKNOWN;
    };

    let (empty, full) = if invert {
        (limits.analog2, limits.analog1)
    } else {
        (limits.analog1, limits.analog2)
    };

    let level = if empty {
        CYLINDER_EMPTY
    } else if full {
        CYLINDER_FULL
    } else {
        CYLINDER_PARTIAL
    };

    Gauge {
        level,
        active: true,
    }
}
