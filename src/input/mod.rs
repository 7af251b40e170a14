//! Operator input normalization — pure math, zero toolkit code.
//!
//! The host UI translates its touch callbacks into
//! [`InputEvent`](crate::app::commands::InputEvent) messages; these
//! modules hold the state and the clamp/normalize rules that decide
//! what actually gets published to the vehicle.

pub mod axes;
pub mod joystick;
pub mod slider;
