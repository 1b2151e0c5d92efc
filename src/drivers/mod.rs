//! Hardware drivers.
//!
//! Thin, dumb actuator/sensor wrappers over the raw GPIO helpers in
//! [`hw_init`]. Policy (debounce, lock checks, fault handling) lives in the
//! domain layer; these drivers only move pins.

pub mod contact;
pub mod hw_init;
pub mod relay;
