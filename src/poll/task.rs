//! Async control-loop task — reactor-driven poll scheduler.
//!
//! Runs in a dedicated thread using `edge-executor` for cooperative
//! multi-task scheduling and `async-io-mini` for reactor-driven timers
//! (no busy-spinning). Three concurrent futures plus a shutdown guard:
//!
//! 1. **Tick** — advances every poll timer at a fixed 10 ms cadence
//! 2. **Input** — truly async via `INPUT_CHANNEL.receive().await`
//!    (wakes instantly when the UI pushes an input event)
//! 3. **Completion** — truly async via `COMPLETION_CHANNEL.receive().await`
//!    (wakes instantly when the transport reports a reply)
//!
//! ```text
//!  ┌────────────────────────────────────────────────────────────┐
//!  │  Control-loop thread                                       │
//!  │  ┌──────────────────────────────────────────────────────┐  │
//!  │  │  futures_lite::block_on (drives reactor + futures)   │  │
//!  │  │  ┌──────────────────────────────────────────────────┐│  │
//!  │  │  │  edge_executor::LocalExecutor                    ││  │
//!  │  │  │                                                  ││  │
//!  │  │  │  ┌────────┐  ┌─────────┐  ┌───────────────────┐ ││  │
//!  │  │  │  │ Tick   │  │ Input   │  │ Completion        │ ││  │
//!  │  │  │  │ 10ms ⏱ │  │ wake-on │  │ wake-on-send      │ ││  │
//!  │  │  │  └────────┘  └─────────┘  └───────────────────┘ ││  │
//!  │  │  └──────────────────────────────────────────────────┘│  │
//!  │  └──────────────────────────────────────────────────────┘  │
//!  └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The thread owns the transport and the [`TeleopService`]; everything
//! crosses the boundary through the static channels in
//! [`channels`](super::channels).

use core::cell::RefCell;
use core::time::Duration;
use std::rc::Rc;

use log::{info, warn};

use crate::app::ports::RpcTransport;
use crate::app::service::TeleopService;
use crate::config::TeleopConfig;

use super::channels::{COMPLETION_CHANNEL, ChannelSink, INPUT_CHANNEL, SHUTDOWN};

/// Base cadence of the tick future. Fine enough that the slowest
/// drift on a 100 ms poll interval stays under one frame.
const TICK_MS: u32 = 10;

type Shared<T> = Rc<RefCell<T>>;

// ── Futures ──────────────────────────────────────────────────

/// Tick task — advances all poll timers at the base cadence.
async fn tick_loop<T: RpcTransport>(service: Shared<TeleopService<T>>, transport: Shared<T>) {
    loop {
        async_io_mini::Timer::after(Duration::from_millis(u64::from(TICK_MS))).await;
        service
            .borrow_mut()
            .advance(TICK_MS, &mut transport.borrow_mut());
    }
}

/// Input task — wakes instantly when the UI sends an input event.
async fn input_loop<T: RpcTransport>(service: Shared<TeleopService<T>>) {
    loop {
        let event = INPUT_CHANNEL.receive().await;
        service.borrow_mut().handle_input(event);
    }
}

/// Completion task — wakes instantly when the transport reports a
/// reply, and feeds it back into the core with the delivery sink.
async fn completion_loop<T: RpcTransport>(service: Shared<TeleopService<T>>) {
    let mut sink = ChannelSink;
    loop {
        let msg = COMPLETION_CHANNEL.receive().await;
        service
            .borrow_mut()
            .complete(msg.token, msg.result, &mut sink);
    }
}

/// Shutdown guard — resolves when a shutdown is requested, stopping
/// the service before the executor is torn down.
async fn shutdown_guard<T: RpcTransport>(service: Shared<TeleopService<T>>) {
    SHUTDOWN.wait().await;
    let mut sink = ChannelSink;
    service.borrow_mut().stop(&mut sink);
    info!("control loop shutting down");
}

// ── Entry points ─────────────────────────────────────────────

/// Run the control loop on the current thread until shutdown.
fn run_control_loop<T: RpcTransport>(transport: T, config: TeleopConfig) -> anyhow::Result<()> {
    let service = TeleopService::<T>::new(config)
        .map_err(|e| anyhow::anyhow!("invalid teleop config: {e}"))?;

    let executor: edge_executor::LocalExecutor<'_, 8> = edge_executor::LocalExecutor::new();

    let service: Shared<TeleopService<T>> = Rc::new(RefCell::new(service));
    let transport: Shared<T> = Rc::new(RefCell::new(transport));

    {
        let mut sink = ChannelSink;
        service
            .borrow_mut()
            .start(&mut transport.borrow_mut(), &mut sink);
    }

    executor
        .spawn(tick_loop(service.clone(), transport.clone()))
        .detach();
    executor.spawn(input_loop(service.clone())).detach();
    executor.spawn(completion_loop(service.clone())).detach();

    info!("control loop started (tick {} ms)", TICK_MS);

    // block_on drives the reactor timers while the executor drives the
    // three detached tasks; the guard future ends the whole loop.
    futures_lite::future::block_on(executor.run(shutdown_guard(service.clone())));

    Ok(())
}

/// Spawn the control loop in a dedicated thread.
///
/// Takes ownership of the transport. The thread exits after
/// [`request_shutdown`](super::channels::request_shutdown).
pub fn spawn<T>(transport: T, config: TeleopConfig) -> anyhow::Result<std::thread::JoinHandle<()>>
where
    T: RpcTransport + Send + 'static,
{
    let handle = std::thread::Builder::new()
        .name("teleop-poll".into())
        .spawn(move || {
            if let Err(e) = run_control_loop(transport, config) {
                warn!("control loop exited: {e:#}");
            }
        })?;
    Ok(handle)
}
