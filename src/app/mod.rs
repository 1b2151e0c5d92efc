//! Application core — pure domain orchestration, zero I/O.
//!
//! This module wires the shutter domain logic (gate + reconciler) to the
//! outside world. All interaction with hardware and the accessory protocol
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals or a paired controller.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
