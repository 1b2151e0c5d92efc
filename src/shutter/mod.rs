//! Shutter domain core — physical position model and shared controller state.
//!
//! The shutter is sensed through two contact inputs (fully-closed and
//! fully-open). [`decode_position`] turns one pair of readings into a
//! [`ShutterState`]; [`ShutterShared`] is the single mutable record that the
//! command gate and the reconciler poll loop coordinate through (behind one
//! mutex owned by [`ShutterService`](crate::app::service::ShutterService)).

pub mod gate;
pub mod reconciler;

use crate::hap::Accessories;
use crate::hap::LockState;

// ---------------------------------------------------------------------------
// Physical state
// ---------------------------------------------------------------------------

/// Physical shutter position as derived from the contact sensors, plus the
/// transitional/sentinel values the controller tracks between samples.
///
/// `Unset` is the only valid initial value; `Fault` is entered whenever the
/// sensor readings are contradictory or the sensor hardware is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterState {
    Fault,
    Unset,
    Stopped,
    Closed,
    Closing,
    Opening,
    Moving,
    Open,
}

impl ShutterState {
    /// Lowercase label used in structured log lines.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Fault => "fault",
            Self::Unset => "unset",
            Self::Stopped => "stopped",
            Self::Closed => "closed",
            Self::Closing => "closing",
            Self::Opening => "opening",
            Self::Moving => "moving",
            Self::Open => "open",
        }
    }
}

/// One sample of the two contact inputs. `true` means the contact is made
/// (the shutter edge is at that end of travel).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactReadings {
    pub closed: bool,
    pub open: bool,
}

/// Decode a pair of contact readings into a physical position.
///
/// | closed | open | result  |
/// |--------|------|---------|
/// | false  | false| Moving  |
/// | false  | true | Open    |
/// | true   | false| Closed  |
/// | true   | true | Fault   |
///
/// Both contacts made at once is physically impossible and reported as a
/// sensor fault. Pure and non-blocking.
pub fn decode_position(readings: ContactReadings) -> ShutterState {
    match (readings.closed, readings.open) {
        (false, false) => ShutterState::Moving,
        (false, true) => ShutterState::Open,
        (true, false) => ShutterState::Closed,
        (true, true) => ShutterState::Fault,
    }
}

// ---------------------------------------------------------------------------
// Shared controller state
// ---------------------------------------------------------------------------

/// Mutable state shared between the command gate (main loop) and the
/// reconciler (poll thread). Protected by one mutex; neither the relay
/// outputs nor the contact inputs live here — only bookkeeping.
pub struct ShutterShared {
    /// Last position derived purely from the sensors; mutated only by the
    /// reconciler (the gate writes the optimistic `Opening`/`Closing`).
    pub physical: ShutterState,
    /// Earliest uptime (ms) at which a new open/close command is accepted.
    debounce_until_ms: u64,
    /// Earliest uptime (ms) at which the reconciler may overwrite the
    /// externally reported door state again.
    suppress_until_ms: u64,
    /// Lock policy state, independent of shutter motion; mutated by
    /// lock/unlock commands only.
    pub lock: LockState,
    /// Accessory state models mirrored to the protocol layer.
    pub accessories: Accessories,
}

impl ShutterShared {
    /// `lock_engaged` is the initial lock state (`Secured` when the lock
    /// mechanism accessory is enabled, `Unsecured` otherwise — an absent
    /// lock must not render the door inoperable).
    pub fn new(accessories: Accessories, lock_engaged: bool) -> Self {
        Self {
            physical: ShutterState::Unset,
            debounce_until_ms: 0,
            suppress_until_ms: 0,
            lock: if lock_engaged {
                LockState::Secured
            } else {
                LockState::Unsecured
            },
            accessories,
        }
    }

    /// Whether an open/close command arriving at `now_ms` is still debounced.
    pub fn is_debounced(&self, now_ms: u64) -> bool {
        now_ms < self.debounce_until_ms
    }

    /// Whether the reconciler must skip reporting at `now_ms`.
    pub fn is_suppressed(&self, now_ms: u64) -> bool {
        now_ms < self.suppress_until_ms
    }

    /// Extend the command debounce window. Forward-only: a later extension
    /// never retreats the deadline.
    pub fn extend_debounce(&mut self, until_ms: u64) {
        if until_ms > self.debounce_until_ms {
            self.debounce_until_ms = until_ms;
        }
    }

    /// Extend the report-suppression window. Forward-only.
    pub fn extend_suppress(&mut self, until_ms: u64) {
        if until_ms > self.suppress_until_ms {
            self.suppress_until_ms = until_ms;
        }
    }

    #[cfg(test)]
    pub(crate) fn debounce_until_ms(&self) -> u64 {
        self.debounce_until_ms
    }

    #[cfg(test)]
    pub(crate) fn suppress_until_ms(&self) -> u64 {
        self.suppress_until_ms
    }
}
