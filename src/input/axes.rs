//! Joystick-to-axes mapping for the periodic joy frame.
//!
//! The joy push endpoint takes a fixed 8-slot axes array. Each
//! joystick is assigned an (x, y) slot pair; unassigned joysticks land
//! on the default slots 0/1. Assignments live in a fixed-size table,
//! no heap.

use super::joystick::Position;

/// Number of axis slots in a joy frame.
pub const AXIS_COUNT: usize = 8;

/// Maximum joysticks the map tracks.
pub const MAX_JOYSTICKS: usize = 2;

/// Default (x, y) slot pair for unassigned joysticks.
const DEFAULT_SLOTS: (usize, usize) = (0, 1);

/// Maps joystick positions into the shared axes frame.
pub struct AxisMap {
    axes: [f32; AXIS_COUNT],
    assignments: [Option<(usize, usize)>; MAX_JOYSTICKS],
}

impl AxisMap {
    pub fn new() -> Self {
        Self {
            axes: [0.0; AXIS_COUNT],
            assignments: [None; MAX_JOYSTICKS],
        }
    }

    /// Assign a joystick to an (x, y) slot pair. Out-of-range ids or
    /// slots are rejected.
    pub fn assign(&mut self, joystick: usize, x_slot: usize, y_slot: usize) -> bool {
        if joystick >= MAX_JOYSTICKS || x_slot >= AXIS_COUNT || y_slot >= AXIS_COUNT {
            return false;
        }
        self.assignments[joystick] = Some((x_slot, y_slot));
        true
    }

    /// Write a joystick's position into its slots.
    pub fn apply(&mut self, joystick: usize, position: Position) {
        if joystick >= MAX_JOYSTICKS {
            return;
        }
        let (x_slot, y_slot) = self.assignments[joystick].unwrap_or(DEFAULT_SLOTS);
        self.axes[x_slot] = position.x;
        self.axes[y_slot] = position.y;
    }

    /// Snapshot of the current frame, the payload of the joy push.
    pub fn frame(&self) -> [f32; AXIS_COUNT] {
        self.axes
    }

    /// Zero every slot (used on shutdown).
    pub fn reset(&mut self) {
        self.axes = [0.0; AXIS_COUNT];
    }
}

impl Default for AxisMap {
    fn default() -> Self {
        Self::new()
    }
}
