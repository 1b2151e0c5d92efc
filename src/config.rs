//! Controller configuration.
//!
//! Serialized with postcard into an NVS blob by
//! [`NvsAdapter`](crate::adapters::nvs::NvsAdapter); the JSON derive is
//! kept for host-side tooling and tests. Field ranges are enforced by the
//! config port on save, not here.

use heapless::String;
use serde::{Deserialize, Serialize};

/// Persistent controller configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShutterConfig {
    /// Relay hold time for one simulated button press, in milliseconds.
    pub switch_hold_ms: u32,
    /// Contact sensor poll cadence, in milliseconds.
    pub poll_interval_ms: u32,
    /// Expose the lock mechanism accessory (also makes the lock start
    /// engaged).
    pub enable_lock_mechanism: bool,
    /// Expose the companion on/off switch shadowing the lock.
    pub enable_lock_switch: bool,
    /// Expose the contact sensor accessory.
    pub enable_contact_sensor: bool,
    /// Engage the lock whenever the shutter is confirmed fully closed.
    pub lock_when_closed: bool,
    /// Pulse the close relay when a lock command arrives.
    pub close_when_locked: bool,
    /// Accessory name announced to the protocol layer.
    pub name: String<32>,
    /// Manufacturer string announced to the protocol layer.
    pub manufacturer: String<32>,
    /// Serial number announced to the protocol layer.
    pub serial: String<32>,
}

impl Default for ShutterConfig {
    fn default() -> Self {
        Self {
            switch_hold_ms: 500,
            poll_interval_ms: 1_000,
            enable_lock_mechanism: true,
            enable_lock_switch: true,
            enable_contact_sensor: true,
            lock_when_closed: true,
            close_when_locked: false,
            name: String::try_from("Garage Shutter").unwrap_or_default(),
            manufacturer: String::try_from("generic").unwrap_or_default(),
            serial: String::try_from("0001").unwrap_or_default(),
        }
    }
}
