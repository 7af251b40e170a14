//! Teleoperation configuration parameters
//!
//! All tunable parameters for the rovctl client core.
//! Values come from the host application's settings store and are
//! threaded into [`TeleopService`](crate::app::service::TeleopService)
//! at construction; reloads are explicit (see
//! [`InputEvent::ReloadConfig`](crate::app::commands::InputEvent)).

use serde::{Deserialize, Serialize};

use crate::app::ports::ConfigError;

/// Bounded service-name string. Remote endpoint names are short path
/// segments; 48 bytes covers every name the vehicle stack advertises.
pub type ServiceName = heapless::String<48>;

/// Core teleoperation configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeleopConfig {
    // --- Endpoint identity ---
    /// Namespace all service names are resolved under
    pub namespace: ServiceName,
    /// Voltage query service name
    pub voltage_service: ServiceName,
    /// Limit-switch query service name
    pub limits_service: ServiceName,
    /// Speed command service name
    pub speed_service: ServiceName,
    /// Joy-axes push endpoint name
    pub joy_service: ServiceName,

    // --- Poll cadence ---
    /// Speed command push interval (milliseconds)
    pub speed_interval_ms: u32,
    /// Joy-axes push interval (milliseconds)
    pub joy_interval_ms: u32,
    /// Limit-switch query interval (milliseconds)
    pub limits_interval_ms: u32,
    /// Voltage query interval (milliseconds)
    pub voltage_interval_ms: u32,

    // --- Call policy ---
    /// Maximum concurrent in-flight calls per client (>= 1).
    /// A due tick with the budget exhausted is skipped, not queued.
    pub max_in_flight: u8,

    // --- Battery gauge ---
    /// Voltage mapped to gauge level 1 (near-empty)
    pub battery_min_voltage: f32,
    /// Voltage mapped to gauge level 100 (full)
    pub battery_max_voltage: f32,

    // --- Cylinder gauge ---
    /// Swap the empty/full limit switches (wiring-dependent)
    pub invert_limits: bool,
}

fn name(s: &str) -> ServiceName {
    let mut out = ServiceName::new();
    // push_str fails atomically on overflow; an empty name is then
    // rejected by validate().
    let _ = out.push_str(s);
    out
}

impl Default for TeleopConfig {
    fn default() -> Self {
        Self {
            namespace: name("rov"),
            voltage_service: name("get_voltage"),
            limits_service: name("get_limits"),
            speed_service: name("set_speed"),
            joy_service: name("joy"),

            speed_interval_ms: 100,    // 10 Hz command push
            joy_interval_ms: 100,      // 10 Hz axes push
            limits_interval_ms: 250,   // 4 Hz state query
            voltage_interval_ms: 1000, // 1 Hz measurement query

            max_in_flight: 1,

            battery_min_voltage: 10.0,
            battery_max_voltage: 14.0,

            invert_limits: false,
        }
    }
}

impl TeleopConfig {
    /// Range-check every field. Invalid values are rejected, not
    /// clamped, so a corrupted settings store cannot silently produce
    /// a client that hammers the transport with a zero interval.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.namespace.is_empty() {
            return Err(ConfigError::ValidationFailed("namespace is empty"));
        }
        for svc in [
            &self.voltage_service,
            &self.limits_service,
            &self.speed_service,
            &self.joy_service,
        ] {
            if svc.is_empty() {
                return Err(ConfigError::ValidationFailed("service name is empty"));
            }
        }
        for interval in [
            self.speed_interval_ms,
            self.joy_interval_ms,
            self.limits_interval_ms,
            self.voltage_interval_ms,
        ] {
            if interval == 0 {
                return Err(ConfigError::ValidationFailed("poll interval is zero"));
            }
        }
        if self.max_in_flight == 0 {
            return Err(ConfigError::ValidationFailed("max_in_flight must be >= 1"));
        }
        if self.battery_min_voltage >= self.battery_max_voltage {
            return Err(ConfigError::ValidationFailed(
                "battery_min_voltage must be below battery_max_voltage",
            ));
        }
        Ok(())
    }
}
