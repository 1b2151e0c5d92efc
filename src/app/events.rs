//! Outbound application events.
//!
//! The service emits these through the [`EventSink`](super::ports::EventSink)
//! port. Adapters on the other side decide what to do with them — log to
//! serial, feed a telemetry channel, or record them in tests.

use super::commands::ShutterCommand;
use crate::hap::{DoorState, LockState};
use crate::shutter::gate::RejectReason;
use crate::shutter::ShutterState;

/// Structured events emitted by the controller core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// The controller has started (carries the initial physical state).
    Started(ShutterState),

    /// A remote command passed the gate and was acted on.
    CommandAccepted(ShutterCommand),

    /// A remote command was rejected; the prior reported state will be
    /// restored after the fixed delay.
    CommandRejected {
        command: ShutterCommand,
        reason: RejectReason,
    },

    /// The reconciler changed the externally reported door state.
    DoorReported(DoorState),

    /// A lock/unlock command or the lock-when-closed policy changed the
    /// lock state.
    LockReported(LockState),

    /// Contradictory or missing sensor readings; contact sensor reported
    /// fail-safe closed.
    SensorFault,

    /// The main loop is draining for process shutdown.
    ShuttingDown,
}
