//! Inbound input events to the teleop service.
//!
//! Every host UI callback (touch handlers, lock toggles, settings
//! changes) becomes one of these explicit messages, delivered to
//! [`TeleopService::handle_input`](super::service::TeleopService::handle_input).
//! The core never registers listeners with the toolkit.

use crate::config::TeleopConfig;
use crate::input::joystick::AxisLock;

/// Messages the host UI sends into the teleop core.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Joystick drag moved to a raw (unclamped) position.
    JoystickMoved { joystick: usize, x: f32, y: f32 },

    /// Joystick touch released; the stick snaps to center.
    JoystickReleased { joystick: usize },

    /// Axis lock toggled on a joystick.
    JoystickLock { joystick: usize, lock: AxisLock },

    /// Slider dragged to a raw deflection.
    SliderMoved { value: f32 },

    /// Slider touch released; the setpoint snaps to zero.
    SliderReleased,

    /// The host reloaded its settings; swap in the new configuration.
    /// Takes effect for gauge derivation immediately and for endpoint
    /// names on the next restart.
    ReloadConfig(TeleopConfig),
}
