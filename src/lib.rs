//! rovctl teleoperation client library.
//!
//! Pure-logic core of a vehicle teleoperation front-end: polling RPC
//! clients, operator input normalization, and indicator derivation.
//! The host UI toolkit and the middleware runtime plug in through the
//! port traits in [`app::ports`]; the driver thread in [`poll::task`]
//! bridges the two over bounded channels.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod input;
pub mod poll;
pub mod status;
