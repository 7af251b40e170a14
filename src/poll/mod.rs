//! Fixed-cadence polling clients.
//!
//! One [`PollingClient`] per remote endpoint. Each owns its endpoint
//! handle, its tick accumulator, and its in-flight budget; the
//! [`TeleopService`](crate::app::service::TeleopService) drives all of
//! them from a single `advance` call.
//!
//! ```text
//! {Unstarted} ──start()──▶ resolve ──ok──▶ {Polling}
//!                              └──err──▶ {Disabled}
//! {Polling}  ──stop()──▶ {Unstarted}
//! {Disabled} ──stop()──▶ {Unstarted}
//! ```
//!
//! There is no path from {Disabled} back to {Polling} without a full
//! restart. Per-call failures never change the phase: the next
//! scheduled tick is the retry.

pub mod calls;
pub mod channels;
pub mod task;

use log::{debug, info};

use crate::app::ports::RpcTransport;
use calls::{CallToken, ServiceId};

// ---------------------------------------------------------------------------
// Client phase
// ---------------------------------------------------------------------------

/// Lifecycle phase of a polling client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientPhase {
    /// Constructed or stopped; no endpoint, no ticks.
    Unstarted,
    /// Endpoint resolved; ticks fire calls.
    Polling,
    /// Resolution failed; every tick is a no-op until restart.
    Disabled,
}

// ---------------------------------------------------------------------------
// Polling client
// ---------------------------------------------------------------------------

/// Best-effort fixed-cadence synchronization of one remote quantity.
///
/// Generic over the transport's opaque endpoint handle so the core
/// never names a concrete middleware type.
pub struct PollingClient<E> {
    service: ServiceId,
    interval_ms: u32,
    max_in_flight: u8,
    /// Incarnation the owner stamped this client with; tokens carry it
    /// so replies from a previous incarnation can be told apart.
    generation: u32,
    phase: ClientPhase,
    endpoint: Option<E>,
    in_flight: u8,
    /// Milliseconds accumulated towards the next fire.
    elapsed_ms: u32,
    next_seq: u32,
}

impl<E> PollingClient<E> {
    pub fn new(service: ServiceId, interval_ms: u32, max_in_flight: u8, generation: u32) -> Self {
        Self {
            service,
            interval_ms,
            max_in_flight,
            generation,
            phase: ClientPhase::Unstarted,
            endpoint: None,
            in_flight: 0,
            elapsed_ms: 0,
            next_seq: 0,
        }
    }

    /// Resolve the endpoint and enter {Polling}, or {Disabled} on a
    /// resolution failure. The first tick is due immediately after a
    /// successful start (zero initial delay).
    pub fn start<T>(&mut self, transport: &mut T, namespace: &str, service_name: &str)
    where
        T: RpcTransport<Endpoint = E>,
    {
        match transport.resolve(namespace, service_name) {
            Ok(endpoint) => {
                self.endpoint = Some(endpoint);
                self.phase = ClientPhase::Polling;
                self.elapsed_ms = self.interval_ms;
                info!("poll[{:?}]: resolved {}/{}", self.service, namespace, service_name);
            }
            Err(e) => {
                self.endpoint = None;
                self.phase = ClientPhase::Disabled;
                info!(
                    "poll[{:?}]: {}/{} unavailable ({}), client disabled",
                    self.service, namespace, service_name, e
                );
            }
        }
    }

    /// Accumulate `dt_ms` and report whether a call should fire now.
    ///
    /// At most one fire per `advance` call regardless of how many
    /// intervals elapsed — missed ticks are skipped, never queued.
    /// A due tick with the in-flight budget exhausted is also skipped.
    pub fn advance(&mut self, dt_ms: u32) -> bool {
        if self.phase != ClientPhase::Polling {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(dt_ms);
        if self.elapsed_ms < self.interval_ms {
            return false;
        }
        // Carry the remainder; collapse any backlog into one fire.
        self.elapsed_ms %= self.interval_ms;

        if self.in_flight >= self.max_in_flight {
            debug!("poll[{:?}]: tick skipped, {} call(s) in flight", self.service, self.in_flight);
            return false;
        }
        true
    }

    /// Allocate a correlation token and count the call as in flight.
    pub fn begin_call(&mut self) -> CallToken {
        self.in_flight += 1;
        let token = CallToken {
            service: self.service,
            generation: self.generation,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        token
    }

    /// The call never left the transport; release its budget slot.
    pub fn abort_call(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Account for a completion. Returns `false` when the completion
    /// must be dropped: the client is stopped, or the token was issued
    /// by a previous incarnation — either way a late reply, tolerated
    /// but never applied, and never freeing this incarnation's budget.
    pub fn complete(&mut self, token: CallToken) -> bool {
        if self.phase != ClientPhase::Polling || token.generation != self.generation {
            return false;
        }
        self.in_flight = self.in_flight.saturating_sub(1);
        true
    }

    /// Cancel polling and release the endpoint. Idempotent; safe to
    /// call from any phase, including before `start`.
    pub fn stop(&mut self) {
        self.phase = ClientPhase::Unstarted;
        self.endpoint = None;
        self.in_flight = 0;
        self.elapsed_ms = 0;
    }

    pub fn phase(&self) -> ClientPhase {
        self.phase
    }

    pub fn service(&self) -> ServiceId {
        self.service
    }

    pub fn in_flight(&self) -> u8 {
        self.in_flight
    }

    /// The resolved endpoint handle, for issuing the actual call.
    pub fn endpoint_mut(&mut self) -> Option<&mut E> {
        self.endpoint.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ports::{CallError, ResolveError};
    use crate::poll::calls::RpcRequest;

    /// Transport whose resolution outcome is scripted per test.
    struct FakeTransport {
        resolves: bool,
    }

    impl RpcTransport for FakeTransport {
        type Endpoint = u8;

        fn resolve(&mut self, _ns: &str, _svc: &str) -> Result<u8, ResolveError> {
            if self.resolves { Ok(7) } else { Err(ResolveError::NotFound) }
        }

        fn call(
            &mut self,
            _endpoint: &mut u8,
            _token: CallToken,
            _request: RpcRequest,
        ) -> Result<(), CallError> {
            Ok(())
        }
    }

    fn client() -> PollingClient<u8> {
        PollingClient::new(ServiceId::Voltage, 1000, 1, 1)
    }

    #[test]
    fn starts_unstarted() {
        let c = client();
        assert_eq!(c.phase(), ClientPhase::Unstarted);
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn resolve_success_enters_polling() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        assert_eq!(c.phase(), ClientPhase::Polling);
        assert!(c.endpoint_mut().is_some());
    }

    #[test]
    fn resolve_failure_enters_disabled() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: false }, "rov", "get_voltage");
        assert_eq!(c.phase(), ClientPhase::Disabled);
        assert!(c.endpoint_mut().is_none());
    }

    #[test]
    fn disabled_never_fires() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: false }, "rov", "get_voltage");
        for _ in 0..100 {
            assert!(!c.advance(1000));
        }
    }

    #[test]
    fn first_tick_due_immediately_after_start() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        assert!(c.advance(0));
    }

    #[test]
    fn fires_once_per_interval() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        assert!(c.advance(0));
        let token = c.begin_call();
        assert_eq!(token.seq, 0);
        assert!(c.complete(token));

        // 999 ms in: not due yet.
        assert!(!c.advance(999));
        // 1 ms more: due.
        assert!(c.advance(1));
    }

    #[test]
    fn backlog_collapses_into_one_fire() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        assert!(c.advance(0));
        let t0 = c.begin_call();
        assert!(c.complete(t0));

        // Five intervals elapse at once; only one call fires.
        assert!(c.advance(5000));
        let t1 = c.begin_call();
        assert!(c.complete(t1));
        assert!(!c.advance(0));
    }

    #[test]
    fn tick_skipped_while_budget_exhausted() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        assert!(c.advance(0));
        let token = c.begin_call();

        // Reply never arrives; subsequent due ticks are skipped.
        assert!(!c.advance(1000));
        assert!(!c.advance(1000));

        // Completion frees the slot; next due tick fires again.
        assert!(c.complete(token));
        assert!(c.advance(1000));
    }

    #[test]
    fn raised_budget_allows_overlap() {
        let mut c = PollingClient::<u8>::new(ServiceId::Limits, 250, 2, 1);
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_limits");
        assert!(c.advance(0));
        let _ = c.begin_call();
        assert!(c.advance(250));
        let _ = c.begin_call();
        assert_eq!(c.in_flight(), 2);
        assert!(!c.advance(250));
    }

    #[test]
    fn stop_is_idempotent() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        let _ = c.advance(0);
        let _ = c.begin_call();

        c.stop();
        assert_eq!(c.phase(), ClientPhase::Unstarted);
        assert_eq!(c.in_flight(), 0);

        c.stop();
        assert_eq!(c.phase(), ClientPhase::Unstarted);
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn stop_before_start_is_safe() {
        let mut c = client();
        c.stop();
        assert_eq!(c.phase(), ClientPhase::Unstarted);
    }

    #[test]
    fn late_completion_after_stop_dropped() {
        let mut c = client();
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        let _ = c.advance(0);
        let token = c.begin_call();
        c.stop();
        assert!(!c.complete(token));
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn previous_incarnation_completion_dropped() {
        let mut c = PollingClient::<u8>::new(ServiceId::Voltage, 1000, 1, 1);
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        let _ = c.advance(0);
        let stale = c.begin_call();

        // Restart rebuilds the client under the next generation while
        // the old reply is still in flight.
        let mut c = PollingClient::<u8>::new(ServiceId::Voltage, 1000, 1, 2);
        c.start(&mut FakeTransport { resolves: true }, "rov", "get_voltage");
        let _ = c.advance(0);
        let fresh = c.begin_call();

        // The stale reply is dropped and must not free the budget slot
        // held by the fresh call.
        assert!(!c.complete(stale));
        assert_eq!(c.in_flight(), 1);
        assert!(!c.advance(1000));

        assert!(c.complete(fresh));
        assert_eq!(c.in_flight(), 0);
    }

    #[test]
    fn tokens_are_sequential() {
        let mut c = PollingClient::<u8>::new(ServiceId::Speed, 100, 4, 3);
        c.start(&mut FakeTransport { resolves: true }, "rov", "set_speed");
        let t0 = c.begin_call();
        let t1 = c.begin_call();
        assert_eq!(t0.service, ServiceId::Speed);
        assert_eq!((t0.generation, t1.generation), (3, 3));
        assert_eq!((t0.seq, t1.seq), (0, 1));
    }
}
