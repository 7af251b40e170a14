//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules for the teleop client:
//! polling orchestration, input routing, and reading bookkeeping.
//! All interaction with the middleware and the UI happens through
//! **port traits** defined in [`ports`], keeping this layer fully
//! testable without a live vehicle.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
