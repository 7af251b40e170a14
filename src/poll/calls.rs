//! Call identity, request/response payloads, and reply decoding.
//!
//! The wire encoding of these values is the transport adapter's
//! business; the core only deals in the typed forms below.

// ───────────────────────────────────────────────────────────────
// Service identity
// ───────────────────────────────────────────────────────────────

/// The four remote endpoints the teleop core talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ServiceId {
    /// Scalar measurement query (battery voltage).
    Voltage = 0,
    /// Boolean-state query (cylinder limit switches).
    Limits = 1,
    /// Speed setpoint push (fire-and-forget).
    Speed = 2,
    /// Joy-axes frame push (fire-and-forget).
    Joy = 3,
}

/// Correlation token carried through the transport and back.
///
/// `generation` identifies the client incarnation that issued the
/// call (it advances on every service start); `seq` is unique within
/// that incarnation. A completion whose generation does not match the
/// current incarnation is dropped — the late reply of a previous run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallToken {
    pub service: ServiceId,
    pub generation: u32,
    pub seq: u32,
}

// ───────────────────────────────────────────────────────────────
// Request / response payloads
// ───────────────────────────────────────────────────────────────

/// Typed request issued on a poll tick. Query requests are empty;
/// command requests snapshot the locally-held setpoint at tick time.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcRequest {
    GetVoltage,
    GetLimits,
    SetSpeed { speed: f32, start: bool },
    PushJoy { axes: [f32; 8] },
}

/// Typed reply from the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcResponse {
    /// Battery voltage in volts.
    Voltage(f32),
    /// Raw limit status word (decoded via [`LimitState::from_status_word`]).
    Limits(u16),
    /// Bare acknowledgement for command pushes.
    Ack,
}

// ───────────────────────────────────────────────────────────────
// Limit-switch decoding
// ───────────────────────────────────────────────────────────────

/// Decoded cylinder limit-switch state: two independent flags pulled
/// out of bit flags in the status word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LimitState {
    /// First analog limit switch (cylinder empty, unless inverted).
    pub analog1: bool,
    /// Second analog limit switch (cylinder full, unless inverted).
    pub analog2: bool,
}

impl LimitState {
    /// Bit mask of the first analog switch in the status word.
    pub const ANALOG1: u16 = 1 << 0;
    /// Bit mask of the second analog switch in the status word.
    pub const ANALOG2: u16 = 1 << 1;

    pub fn from_status_word(word: u16) -> Self {
        Self {
            analog1: (word & Self::ANALOG1) != 0,
            analog2: (word & Self::ANALOG2) != 0,
        }
    }
}
