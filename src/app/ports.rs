//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ShutterService (domain)
//! ```
//!
//! Driven adapters (contact inputs, relay outputs, the HAP transport,
//! config storage, log sinks) implement these traits. The service consumes
//! them via generics, so the domain core never touches hardware or the
//! protocol layer directly.

use crate::config::ShutterConfig;
use crate::error::SensorError;
use crate::hap::{ContactState, DoorState, DoorTarget, LockState};
use crate::shutter::ContactReadings;

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: the reconciler calls this once per tick.
pub trait SensorPort {
    /// Sample both contact inputs. `Err` means the sensor hardware is
    /// unavailable, which the caller treats as a position fault.
    fn read_contacts(&mut self) -> Result<ContactReadings, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Relay port (driven adapter: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The two momentary relay outputs wired to the motor controller's
/// push-button inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relay {
    OpenButton,
    CloseButton,
}

/// Write-side port: emulate a momentary button press.
///
/// A pulse blocks for `hold_ms` and is best-effort — implementations log
/// assert/deassert failures instead of returning them, because the motor
/// side of the relay is unobservable anyway. Callers must not hold the
/// shared-state lock across a pulse.
pub trait RelayPort {
    fn pulse(&mut self, relay: Relay, hold_ms: u32);
}

// ───────────────────────────────────────────────────────────────
// HAP bridge (driven adapter: domain → protocol layer)
// ───────────────────────────────────────────────────────────────

/// Outbound characteristic updates toward the accessory protocol layer.
///
/// The transport implements this; the firmware ships a log-only
/// placeholder ([`LogBridge`](crate::adapters::hap_log::LogBridge)).
/// Inbound remote updates travel the other way as
/// [`ShutterCommand`](super::commands::ShutterCommand)s on the command
/// queue.
pub trait HapBridge {
    fn door_current(&mut self, state: DoorState);
    fn door_target(&mut self, target: DoorTarget);
    fn lock_current(&mut self, state: LockState);
    fn lock_target(&mut self, state: LockState);
    fn switch_on(&mut self, on: bool);
    fn contact_state(&mut self, state: ContactState);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port. Adapters decide where they go (serial log, a future
/// telemetry channel, a test recorder).
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Configuration port (driven adapter: domain ↔ persistent config)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the controller configuration.
///
/// Implementations MUST validate before persisting. Invalid ranges are
/// rejected with [`ConfigError::ValidationFailed`], not silently clamped.
pub trait ConfigPort {
    /// Load configuration from persistent storage.
    /// Returns [`ShutterConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<ShutterConfig, ConfigError>;

    /// Validate and persist configuration.
    fn save(&self, config: &ShutterConfig) -> Result<(), ConfigError>;
}

/// Errors from [`ConfigPort`] operations.
#[derive(Debug)]
pub enum ConfigError {
    /// No config found in storage (first boot).
    NotFound,
    /// Stored config failed integrity / deserialization check.
    Corrupted,
    /// A config field failed range validation.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotFound => write!(f, "config not found"),
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
