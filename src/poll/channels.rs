//! Inter-task communication channels.
//!
//! Uses `embassy-sync` bounded channels to bridge the UI thread, the
//! transport's callback context, and the control loop. All three share
//! these static channels without heap allocation.
//!
//! ```text
//! ┌──────────┐  InputEvent    ┌──────────────┐  TeleopEvent  ┌──────────┐
//! │ UI thread │──────────────▶│ Control Loop │──────────────▶│ UI thread │
//! └──────────┘                └──────────────┘               └──────────┘
//!                                    ▲
//!                    CompletionMsg   │
//!                  (transport callback thread)
//! ```
//!
//! The delivery channel is consumed from the UI context only — a
//! single consumer reading an ordered queue, which is what makes the
//! hand-off safe without shared mutable state.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use log::warn;

use crate::app::commands::InputEvent;
use crate::app::events::TeleopEvent;
use crate::app::ports::{CallError, DeliverySink};

use super::calls::{CallToken, RpcResponse};

/// A call completion reported by the transport adapter.
#[derive(Debug, Clone)]
pub struct CompletionMsg {
    /// Token the call was issued under.
    pub token: CallToken,
    /// Decoded reply, or the remote failure.
    pub result: Result<RpcResponse, CallError>,
}

/// Channel depth for UI input messages.
const INPUT_DEPTH: usize = 16;

/// Channel depth for transport completions.
const COMPLETION_DEPTH: usize = 16;

/// Channel depth for UI-bound delivery events.
const DELIVERY_DEPTH: usize = 32;

/// UI → control loop.
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputEvent, INPUT_DEPTH> =
    Channel::new();

/// Transport callback → control loop.
pub static COMPLETION_CHANNEL: Channel<CriticalSectionRawMutex, CompletionMsg, COMPLETION_DEPTH> =
    Channel::new();

/// Control loop → UI.
pub static DELIVERY_CHANNEL: Channel<CriticalSectionRawMutex, TeleopEvent, DELIVERY_DEPTH> =
    Channel::new();

/// Shutdown request for the control loop.
pub static SHUTDOWN: Signal<CriticalSectionRawMutex, ()> = Signal::new();

// ── Producer-side helpers ────────────────────────────────────

/// Send a UI input message to the control loop. Safe from any thread;
/// drops with a warning when the channel is full.
pub fn send_input(event: InputEvent) {
    if INPUT_CHANNEL.try_send(event).is_err() {
        warn!("input channel full, dropping event");
    }
}

/// Report a call completion from the transport's callback context.
pub fn send_completion(msg: CompletionMsg) {
    if COMPLETION_CHANNEL.try_send(msg).is_err() {
        warn!("completion channel full, dropping reply");
    }
}

/// Ask the control loop to stop polling and exit.
pub fn request_shutdown() {
    SHUTDOWN.signal(());
}

// ── Consumer-side helpers ────────────────────────────────────

/// Try to receive a delivery event. Called from the UI context — the
/// single consumer of the delivery channel.
pub fn try_recv_event() -> Option<TeleopEvent> {
    DELIVERY_CHANNEL.try_receive().ok()
}

// ── Channel-backed delivery sink ─────────────────────────────

/// [`DeliverySink`] that enqueues onto [`DELIVERY_CHANNEL`]. This is
/// the ordered message send the concurrency model calls for: the core
/// writes, the UI reads, nobody shares mutable state.
pub struct ChannelSink;

impl DeliverySink for ChannelSink {
    fn deliver(&mut self, event: &TeleopEvent) {
        if DELIVERY_CHANNEL.try_send(*event).is_err() {
            warn!("delivery channel full, dropping {:?}", event);
        }
    }
}
