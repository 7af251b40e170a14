//! Dual-axis virtual joystick state.
//!
//! The normalization pipeline, in order: locked axes are forced to 0,
//! each axis is clamped to [-1, 1] independently, then the vector is
//! rescaled to unit length only when its magnitude exceeds 1 — the
//! circular clamp that preserves direction while capping magnitude.
//! A new position is only reported as a change when the stored value
//! actually differs, which keeps redundant frames off the wire.

/// Normalized stick position, both axes in [-1, 1] with |v| <= 1.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn magnitude(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Per-axis lock. A locked axis reads exactly 0 regardless of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisLock {
    pub x: bool,
    pub y: bool,
}

/// Virtual joystick state machine.
pub struct Joystick {
    position: Position,
    lock: AxisLock,
}

impl Joystick {
    pub fn new() -> Self {
        Self {
            position: Position::default(),
            lock: AxisLock::default(),
        }
    }

    /// Apply a raw position. Returns `true` when the stored position
    /// changed (callers publish only on change).
    pub fn set_position(&mut self, x: f32, y: f32) -> bool {
        let mut x = if self.lock.x { 0.0 } else { x };
        let mut y = if self.lock.y { 0.0 } else { y };

        x = x.clamp(-1.0, 1.0);
        y = y.clamp(-1.0, 1.0);

        let norm = (x * x + y * y).sqrt();
        if norm > 1.0 {
            x /= norm;
            y /= norm;
        }

        if self.position.x != x || self.position.y != y {
            self.position = Position { x, y };
            true
        } else {
            false
        }
    }

    /// Touch released: the stick snaps back to center.
    pub fn release(&mut self) -> bool {
        self.set_position(0.0, 0.0)
    }

    /// Change the lock and re-apply the current position so a freshly
    /// locked axis zeroes out immediately.
    pub fn set_lock(&mut self, lock: AxisLock) -> bool {
        if self.lock == lock {
            return false;
        }
        self.lock = lock;
        let current = self.position;
        self.set_position(current.x, current.y)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn lock(&self) -> AxisLock {
        self.lock
    }
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrange_axis_clamps() {
        let mut j = Joystick::new();
        assert!(j.set_position(1.5, 0.0));
        assert_eq!(j.position(), Position::new(1.0, 0.0));
    }

    #[test]
    fn diagonal_rescales_to_unit_magnitude() {
        let mut j = Joystick::new();
        j.set_position(0.8, 0.8);
        let p = j.position();
        assert!(p.magnitude() <= 1.0 + 1e-6);
        assert!((p.x - p.y).abs() < 1e-6);
        // 0.8 / sqrt(0.8^2 + 0.8^2)
        assert!((p.x - 0.707_106_8).abs() < 1e-4);
    }

    #[test]
    fn inside_unit_circle_untouched() {
        let mut j = Joystick::new();
        j.set_position(0.3, 0.4);
        assert_eq!(j.position(), Position::new(0.3, 0.4));
    }

    #[test]
    fn locked_y_forces_zero() {
        let mut j = Joystick::new();
        j.set_lock(AxisLock { x: false, y: true });
        j.set_position(0.3, 0.9);
        assert_eq!(j.position(), Position::new(0.3, 0.0));
    }

    #[test]
    fn locking_zeroes_current_position() {
        let mut j = Joystick::new();
        j.set_position(0.5, 0.5);
        assert!(j.set_lock(AxisLock { x: true, y: false }));
        assert_eq!(j.position(), Position::new(0.0, 0.5));
    }

    #[test]
    fn unchanged_position_suppressed() {
        let mut j = Joystick::new();
        assert!(j.set_position(0.2, 0.2));
        assert!(!j.set_position(0.2, 0.2));
        // Clamps to the same stored value: still suppressed.
        assert!(j.set_position(2.0, 0.0));
        assert!(!j.set_position(1.7, 0.0));
    }

    #[test]
    fn release_snaps_to_center() {
        let mut j = Joystick::new();
        j.set_position(0.9, -0.4);
        assert!(j.release());
        assert_eq!(j.position(), Position::default());
        assert!(!j.release());
    }

    #[test]
    fn same_lock_is_noop() {
        let mut j = Joystick::new();
        assert!(!j.set_lock(AxisLock::default()));
    }
}
