//! Single-axis virtual slider state.
//!
//! The slider feeds the speed setpoint: its value is clamped to
//! [-1, 1] directly (no circular normalization on one axis) and only
//! reported as changed when the stored value differs.

/// Virtual slider state machine.
pub struct Slider {
    value: f32,
}

impl Slider {
    pub fn new() -> Self {
        Self { value: 0.0 }
    }

    /// Apply a raw deflection. Returns `true` when the stored value
    /// changed.
    pub fn set_value(&mut self, value: f32) -> bool {
        let clamped = value.clamp(-1.0, 1.0);
        if self.value != clamped {
            self.value = clamped;
            true
        } else {
            false
        }
    }

    /// Touch released: the slider snaps back to center.
    pub fn release(&mut self) -> bool {
        self.set_value(0.0)
    }

    pub fn value(&self) -> f32 {
        self.value
    }
}

impl Default for Slider {
    fn default() -> Self {
        Self::new()
    }
}
