//! Port traits — the hexagonal boundary between the teleop core and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ TeleopService (domain)
//! ```
//!
//! Driven adapters (the middleware transport, the UI delivery channel)
//! implement these traits. The
//! [`TeleopService`](super::service::TeleopService) consumes them via
//! generics, so the core never touches the middleware runtime or the UI
//! toolkit directly.
//!
//! ## Failure policy
//!
//! - **RpcTransport** resolution failure is permanent for a client's
//!   lifetime: the client disables itself instead of failing hard, so
//!   the surrounding application stays usable with the vehicle offline.
//! - Per-call failure is transient and silently discarded; the next
//!   scheduled tick is the retry.

use crate::app::events::TeleopEvent;
use crate::poll::calls::{CallToken, RpcRequest};

// ───────────────────────────────────────────────────────────────
// RPC transport port (driven adapter: domain → middleware)
// ───────────────────────────────────────────────────────────────

/// Remote-procedure transport supplied by the environment.
///
/// `call` is asynchronous from the caller's point of view: it queues the
/// request and returns. The completion — success payload or remote
/// failure — arrives later on a transport-owned thread, and the adapter
/// forwards it to
/// [`TeleopService::complete`](super::service::TeleopService::complete)
/// tagged with the original [`CallToken`].
pub trait RpcTransport {
    /// Opaque resolved endpoint handle.
    type Endpoint;

    /// Resolve `service` within `namespace` into a callable handle.
    fn resolve(&mut self, namespace: &str, service: &str)
    -> Result<Self::Endpoint, ResolveError>;

    /// Issue `request` against a resolved endpoint without blocking on
    /// the reply. An `Err` here means the call never left the transport
    /// (treated like a transient remote failure by the core).
    fn call(
        &mut self,
        endpoint: &mut Self::Endpoint,
        token: CallToken,
        request: RpcRequest,
    ) -> Result<(), CallError>;
}

// ───────────────────────────────────────────────────────────────
// Delivery sink port (driven adapter: domain → UI)
// ───────────────────────────────────────────────────────────────

/// The core hands decoded results and lifecycle events to the UI
/// through this port. Implementations must make the hand-off safe to
/// consume from the UI's single-threaded context — typically by
/// enqueueing onto an ordered channel rather than mutating shared
/// state (see [`ChannelSink`](crate::poll::channels::ChannelSink)).
///
/// One sink per service instance; registering a new one replaces the
/// previous (last registration wins, no fan-out).
pub trait DeliverySink {
    fn deliver(&mut self, event: &TeleopEvent);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from endpoint resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveError {
    /// The named service is not advertised in the namespace.
    NotFound,
    /// The transport itself is not connected.
    Disconnected,
}

/// Errors from issuing or completing a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallError {
    /// The remote side reported a failure.
    RemoteFailure,
    /// The call could not be sent (transport backpressure or teardown).
    SendFailed,
    /// The reply did not decode into the expected response type.
    MalformedReply,
}

/// Errors from configuration handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl core::fmt::Display for ResolveError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "service not found"),
            Self::Disconnected => write!(f, "transport disconnected"),
        }
    }
}

impl core::fmt::Display for CallError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::RemoteFailure => write!(f, "remote call failed"),
            Self::SendFailed => write!(f, "call send failed"),
            Self::MalformedReply => write!(f, "malformed reply"),
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}

impl core::error::Error for ResolveError {}
impl core::error::Error for CallError {}
impl core::error::Error for ConfigError {}
