//! Command gate — debounce and lock-policy checks for remote requests.
//!
//! [`dispatch`] runs entirely inside the shared-state critical section and
//! returns a [`GateOutcome`] describing the side effects the caller must
//! perform *after* releasing the lock (relay pulses, the delayed rejection
//! restore). The already-advanced debounce window is what keeps a second
//! command out while the pulse itself sleeps.

use log::info;

use crate::app::commands::ShutterCommand;
use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, HapBridge, Relay};
use crate::hap::{DoorSnapshot, LockState};

use super::{ShutterShared, ShutterState};

/// Cooldown applied to open/close commands. Fixed: repeated motion
/// commands within this window reject with `debounce`.
pub const COMMAND_DEBOUNCE_MS: u64 = 5_000;

/// Assumed transition time after an accepted command, during which the
/// reconciler defers to the optimistic state instead of the sensors.
pub const REPORT_SUPPRESS_MS: u64 = 5_000;

/// Delay before a rejected command's prior state is restored, so the
/// reject-then-restore is visible to a remote observer instead of looking
/// like a dropped write.
pub const REJECT_RESTORE_DELAY_MS: u64 = 1_000;

/// Why a motion command was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Debounce,
    Locked,
}

impl RejectReason {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Debounce => "debounce",
            Self::Locked => "locked",
        }
    }
}

/// Deferred side effects decided by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateOutcome {
    /// Command accepted: pulse this relay.
    Pulse(Relay),
    /// Lock applied; pulse the close relay too when the close-when-locked
    /// policy is on (bypasses the debounce gate by design).
    Locked { pulse_close: bool },
    /// Unlock applied; nothing further to do.
    Unlocked,
    /// Command rejected: restore `prior` after
    /// [`REJECT_RESTORE_DELAY_MS`]. Rejections never touch the windows.
    Rejected {
        reason: RejectReason,
        prior: DoorSnapshot,
    },
}

/// Route one remote command. Must be called with the shared-state lock held.
pub fn dispatch(
    shared: &mut ShutterShared,
    command: ShutterCommand,
    now_ms: u64,
    close_when_locked: bool,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) -> GateOutcome {
    match command {
        ShutterCommand::Open => request_open(shared, now_ms, bridge, sink),
        ShutterCommand::Close => request_close(shared, now_ms, bridge, sink),
        ShutterCommand::Lock => request_lock(shared, close_when_locked, bridge, sink),
        ShutterCommand::Unlock => request_unlock(shared, bridge, sink),
    }
}

fn request_open(
    shared: &mut ShutterShared,
    now_ms: u64,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) -> GateOutcome {
    info!("GarageDoorOpener request: target=open");

    if shared.is_debounced(now_ms) {
        return reject(shared, ShutterCommand::Open, RejectReason::Debounce, sink);
    }
    if shared.lock == LockState::Secured {
        return reject(shared, ShutterCommand::Open, RejectReason::Locked, sink);
    }

    shared.extend_debounce(now_ms + COMMAND_DEBOUNCE_MS);

    info!("Shutter remote: signal=open");
    shared.physical = ShutterState::Opening;
    shared.accessories.door.begin_opening(bridge);
    shared.extend_suppress(now_ms + REPORT_SUPPRESS_MS);

    sink.emit(&AppEvent::CommandAccepted(ShutterCommand::Open));
    GateOutcome::Pulse(Relay::OpenButton)
}

fn request_close(
    shared: &mut ShutterShared,
    now_ms: u64,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) -> GateOutcome {
    info!("GarageDoorOpener request: target=close");

    // Closing is always permitted regardless of lock state; only the
    // debounce window applies.
    if shared.is_debounced(now_ms) {
        return reject(shared, ShutterCommand::Close, RejectReason::Debounce, sink);
    }

    shared.extend_debounce(now_ms + COMMAND_DEBOUNCE_MS);

    info!("Shutter remote: signal=close");
    shared.physical = ShutterState::Closing;
    shared.accessories.door.begin_closing(bridge);
    shared.extend_suppress(now_ms + REPORT_SUPPRESS_MS);

    sink.emit(&AppEvent::CommandAccepted(ShutterCommand::Close));
    GateOutcome::Pulse(Relay::CloseButton)
}

fn request_lock(
    shared: &mut ShutterShared,
    close_when_locked: bool,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) -> GateOutcome {
    info!("LockMechanism request: signal=lock");

    shared.lock = LockState::Secured;
    if let Some(lock) = shared.accessories.lock.as_mut() {
        lock.secure(bridge);
    }
    if let Some(switch) = shared.accessories.lock_switch.as_mut() {
        switch.set_on(true, bridge);
    }

    if close_when_locked {
        info!("Shutter remote: source=lock signal=close");
    }

    sink.emit(&AppEvent::CommandAccepted(ShutterCommand::Lock));
    sink.emit(&AppEvent::LockReported(LockState::Secured));
    GateOutcome::Locked {
        pulse_close: close_when_locked,
    }
}

fn request_unlock(
    shared: &mut ShutterShared,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) -> GateOutcome {
    info!("LockMechanism request: signal=unlock");

    shared.lock = LockState::Unsecured;
    if let Some(lock) = shared.accessories.lock.as_mut() {
        lock.unsecure(bridge);
    }
    if let Some(switch) = shared.accessories.lock_switch.as_mut() {
        switch.set_on(false, bridge);
    }

    sink.emit(&AppEvent::CommandAccepted(ShutterCommand::Unlock));
    sink.emit(&AppEvent::LockReported(LockState::Unsecured));
    GateOutcome::Unlocked
}

fn reject(
    shared: &ShutterShared,
    command: ShutterCommand,
    reason: RejectReason,
    sink: &mut impl EventSink,
) -> GateOutcome {
    info!(
        "GarageDoorOpener request: target={} current={} status=rejected reason={}",
        command.label(),
        shared.physical.label(),
        reason.label(),
    );
    sink.emit(&AppEvent::CommandRejected { command, reason });
    GateOutcome::Rejected {
        reason,
        prior: shared.accessories.door.snapshot(),
    }
}
