//! Teleoperation service — the hexagonal core.
//!
//! [`TeleopService`] owns the four polling clients, the operator input
//! state, and the latest readings. It exposes a clean,
//! middleware-agnostic API. All I/O flows through port traits injected
//! at call sites, making the entire service testable with mock
//! adapters.
//!
//! ```text
//!  InputEvent ──▶ ┌────────────────────────┐ ──▶ DeliverySink
//!                 │     TeleopService       │
//! RpcTransport ◀──│  poll · input · status  │
//!                 └────────────────────────┘
//! ```

use log::{debug, info, warn};

use crate::config::TeleopConfig;
use crate::input::axes::{AXIS_COUNT, AxisMap, MAX_JOYSTICKS};
use crate::input::joystick::Joystick;
use crate::input::slider::Slider;
use crate::poll::calls::{CallToken, LimitState, RpcRequest, RpcResponse, ServiceId};
use crate::poll::{ClientPhase, PollingClient};
use crate::status::{Gauge, battery_gauge, cylinder_gauge};

use super::commands::InputEvent;
use super::events::TeleopEvent;
use super::ports::{CallError, ConfigError, DeliverySink, RpcTransport};

// ───────────────────────────────────────────────────────────────
// TeleopService
// ───────────────────────────────────────────────────────────────

/// The teleop service orchestrates all domain logic.
pub struct TeleopService<T: RpcTransport> {
    config: TeleopConfig,

    voltage_client: PollingClient<T::Endpoint>,
    limits_client: PollingClient<T::Endpoint>,
    speed_client: PollingClient<T::Endpoint>,
    joy_client: PollingClient<T::Endpoint>,

    joysticks: [Joystick; MAX_JOYSTICKS],
    slider: Slider,
    axes: AxisMap,

    /// Latest decoded voltage; 0.0 until the first reply and after stop.
    voltage: f32,
    /// Latest decoded limits; `None` until the first reply and after stop.
    limits: Option<LimitState>,

    /// Incarnation counter, bumped on every start. Stamped into call
    /// tokens so a reply issued before a restart cannot be mistaken
    /// for the current run's.
    generation: u32,

    running: bool,
}

impl<T: RpcTransport> TeleopService<T> {
    /// Construct the service from a validated configuration.
    ///
    /// Does **not** resolve anything — call [`start`](Self::start) next.
    pub fn new(config: TeleopConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let clients = Self::build_clients(&config, 0);
        Ok(Self {
            config,
            voltage_client: clients.0,
            limits_client: clients.1,
            speed_client: clients.2,
            joy_client: clients.3,
            joysticks: [Joystick::new(), Joystick::new()],
            slider: Slider::new(),
            axes: AxisMap::new(),
            voltage: 0.0,
            limits: None,
            generation: 0,
            running: false,
        })
    }

    fn build_clients(
        config: &TeleopConfig,
        generation: u32,
    ) -> (
        PollingClient<T::Endpoint>,
        PollingClient<T::Endpoint>,
        PollingClient<T::Endpoint>,
        PollingClient<T::Endpoint>,
    ) {
        let budget = config.max_in_flight;
        (
            PollingClient::new(ServiceId::Voltage, config.voltage_interval_ms, budget, generation),
            PollingClient::new(ServiceId::Limits, config.limits_interval_ms, budget, generation),
            PollingClient::new(ServiceId::Speed, config.speed_interval_ms, budget, generation),
            PollingClient::new(ServiceId::Joy, config.joy_interval_ms, budget, generation),
        )
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Resolve every endpoint and begin polling. Clients whose service
    /// is absent are disabled individually; the rest keep running, so
    /// the application stays usable with parts of the vehicle offline.
    ///
    /// Fires the first round of due calls before returning (zero
    /// initial delay, like the original timers).
    pub fn start(&mut self, transport: &mut T, sink: &mut impl DeliverySink) {
        info!("teleop starting in namespace '{}'", self.config.namespace);

        // Rebuild so a config reload takes effect across restarts; the
        // new incarnation's tokens outdate any still-pending replies.
        self.generation = self.generation.wrapping_add(1);
        let clients = Self::build_clients(&self.config, self.generation);
        self.voltage_client = clients.0;
        self.limits_client = clients.1;
        self.speed_client = clients.2;
        self.joy_client = clients.3;

        self.voltage_client
            .start(transport, &self.config.namespace, &self.config.voltage_service);
        self.limits_client
            .start(transport, &self.config.namespace, &self.config.limits_service);
        self.speed_client
            .start(transport, &self.config.namespace, &self.config.speed_service);
        self.joy_client
            .start(transport, &self.config.namespace, &self.config.joy_service);

        for client in [
            &self.voltage_client,
            &self.limits_client,
            &self.speed_client,
            &self.joy_client,
        ] {
            if client.phase() == ClientPhase::Disabled {
                sink.deliver(&TeleopEvent::ClientDisabled(client.service()));
            }
        }

        self.running = true;
        sink.deliver(&TeleopEvent::Started);

        self.advance(0, transport);
    }

    /// Cancel all polling, release endpoints, and reset every reading
    /// and setpoint to its default. Idempotent; safe even if `start`
    /// never ran. In-flight calls are not cancelled — their late
    /// completions are dropped by [`complete`](Self::complete).
    pub fn stop(&mut self, sink: &mut impl DeliverySink) {
        self.voltage_client.stop();
        self.limits_client.stop();
        self.speed_client.stop();
        self.joy_client.stop();

        self.voltage = 0.0;
        self.limits = None;
        self.slider.release();
        for joystick in &mut self.joysticks {
            joystick.release();
        }
        self.axes.reset();

        if self.running {
            self.running = false;
            info!("teleop stopped");
            sink.deliver(&TeleopEvent::Stopped);
        }
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Advance all poll timers by `dt_ms` and issue every due call.
    ///
    /// Command clients snapshot their setpoint at this moment; a later
    /// input change affects the next tick, not this one.
    pub fn advance(&mut self, dt_ms: u32, transport: &mut T) {
        if self.voltage_client.advance(dt_ms) {
            Self::fire(&mut self.voltage_client, transport, RpcRequest::GetVoltage);
        }
        if self.limits_client.advance(dt_ms) {
            Self::fire(&mut self.limits_client, transport, RpcRequest::GetLimits);
        }
        if self.speed_client.advance(dt_ms) {
            let request = RpcRequest::SetSpeed {
                speed: self.slider.value(),
                start: true,
            };
            Self::fire(&mut self.speed_client, transport, request);
        }
        if self.joy_client.advance(dt_ms) {
            let request = RpcRequest::PushJoy {
                axes: self.axes.frame(),
            };
            Self::fire(&mut self.joy_client, transport, request);
        }
    }

    fn fire(client: &mut PollingClient<T::Endpoint>, transport: &mut T, request: RpcRequest) {
        let token = client.begin_call();
        match client.endpoint_mut() {
            Some(endpoint) => {
                if let Err(e) = transport.call(endpoint, token, request) {
                    // Best effort: the next tick retries.
                    debug!("poll[{:?}]: send failed ({})", token.service, e);
                    client.abort_call();
                }
            }
            None => client.abort_call(),
        }
    }

    // ── Completion path ───────────────────────────────────────

    /// Feed a call completion back into the core. Called by the
    /// transport adapter (from any thread context the driver bridges)
    /// with the token the call was issued under.
    ///
    /// Completions are applied in arrival order — there is no reorder
    /// guard, so with an in-flight budget above 1 the latest arrival
    /// wins, whatever the issue order was.
    pub fn complete(
        &mut self,
        token: CallToken,
        result: Result<RpcResponse, CallError>,
        sink: &mut impl DeliverySink,
    ) {
        let client = match token.service {
            ServiceId::Voltage => &mut self.voltage_client,
            ServiceId::Limits => &mut self.limits_client,
            ServiceId::Speed => &mut self.speed_client,
            ServiceId::Joy => &mut self.joy_client,
        };

        if !client.complete(token) {
            debug!("poll[{:?}]: late completion dropped", token.service);
            return;
        }

        match result {
            Ok(response) => match (token.service, response) {
                (ServiceId::Voltage, RpcResponse::Voltage(voltage)) => {
                    self.voltage = voltage;
                    sink.deliver(&TeleopEvent::VoltageUpdated(voltage));
                }
                (ServiceId::Limits, RpcResponse::Limits(word)) => {
                    let limits = LimitState::from_status_word(word);
                    self.limits = Some(limits);
                    sink.deliver(&TeleopEvent::LimitsUpdated(limits));
                }
                (ServiceId::Speed | ServiceId::Joy, RpcResponse::Ack) => {
                    // Fire-and-forget; nothing to deliver.
                }
                (service, response) => {
                    warn!("poll[{:?}]: mismatched reply {:?}", service, response);
                }
            },
            Err(e) => {
                // Deliberate silent discard; the reading stays stale
                // until the next successful tick.
                debug!("poll[{:?}]: call failed ({})", token.service, e);
            }
        }
    }

    // ── Input handling ────────────────────────────────────────

    /// Process one host UI input message.
    pub fn handle_input(&mut self, event: InputEvent) {
        match event {
            InputEvent::JoystickMoved { joystick, x, y } => {
                if joystick >= MAX_JOYSTICKS {
                    warn!("input: joystick {} out of range", joystick);
                    return;
                }
                if self.joysticks[joystick].set_position(x, y) {
                    self.axes.apply(joystick, self.joysticks[joystick].position());
                }
            }
            InputEvent::JoystickReleased { joystick } => {
                if joystick >= MAX_JOYSTICKS {
                    return;
                }
                if self.joysticks[joystick].release() {
                    self.axes.apply(joystick, self.joysticks[joystick].position());
                }
            }
            InputEvent::JoystickLock { joystick, lock } => {
                if joystick >= MAX_JOYSTICKS {
                    return;
                }
                if self.joysticks[joystick].set_lock(lock) {
                    self.axes.apply(joystick, self.joysticks[joystick].position());
                }
            }
            InputEvent::SliderMoved { value } => {
                self.slider.set_value(value);
            }
            InputEvent::SliderReleased => {
                self.slider.release();
            }
            InputEvent::ReloadConfig(config) => match config.validate() {
                Ok(()) => {
                    info!("configuration reloaded");
                    self.config = config;
                }
                Err(e) => warn!("config reload rejected: {}", e),
            },
        }
    }

    /// Assign a joystick to axis slots in the joy frame.
    pub fn assign_axes(&mut self, joystick: usize, x_slot: usize, y_slot: usize) -> bool {
        self.axes.assign(joystick, x_slot, y_slot)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn voltage(&self) -> f32 {
        self.voltage
    }

    pub fn limits(&self) -> Option<LimitState> {
        self.limits
    }

    pub fn speed_setpoint(&self) -> f32 {
        self.slider.value()
    }

    pub fn joy_frame(&self) -> [f32; AXIS_COUNT] {
        self.axes.frame()
    }

    /// Battery gauge derived from the latest voltage and config range.
    pub fn battery(&self) -> Gauge {
        battery_gauge(
            self.voltage,
            self.config.battery_min_voltage,
            self.config.battery_max_voltage,
        )
    }

    /// Cylinder gauge derived from the latest limit switches.
    pub fn cylinder(&self) -> Gauge {
        cylinder_gauge(self.limits, self.config.invert_limits)
    }

    /// Lifecycle phase of one polling client.
    pub fn client_phase(&self, service: ServiceId) -> ClientPhase {
        match service {
            ServiceId::Voltage => self.voltage_client.phase(),
            ServiceId::Limits => self.limits_client.phase(),
            ServiceId::Speed => self.speed_client.phase(),
            ServiceId::Joy => self.joy_client.phase(),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &TeleopConfig {
        &self.config
    }
}
