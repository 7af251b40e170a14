//! Outbound teleop events.
//!
//! The [`TeleopService`](super::service::TeleopService) emits these
//! through the [`DeliverySink`](super::ports::DeliverySink) port. The
//! adapter on the other side decides what to do with them — update
//! icon state, log, forward to a dashboard.

use crate::poll::calls::{LimitState, ServiceId};

/// Structured events emitted by the teleop core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TeleopEvent {
    /// The service started; clients are resolving/polling.
    Started,

    /// The service stopped; readings reset to defaults.
    Stopped,

    /// A client's endpoint could not be resolved; that client is
    /// disabled until a full restart.
    ClientDisabled(ServiceId),

    /// Fresh battery voltage reading (volts).
    VoltageUpdated(f32),

    /// Fresh cylinder limit-switch reading.
    LimitsUpdated(LimitState),
}
