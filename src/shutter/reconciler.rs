//! Sensor reconciler — folds decoded contact readings into the accessory
//! state.
//!
//! Runs once per poll tick with the shared-state lock held, but only when
//! the report-suppression window has elapsed. The reconciler owns
//! `ShutterShared::physical` outside of the gate's optimistic writes; every
//! external report goes through the deduping accessory setters, so a steady
//! position produces no characteristic traffic.

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::{EventSink, HapBridge};
use crate::hap::{DoorState, DoorTarget, LockState};

use super::{ShutterShared, ShutterState};

/// Fold one decoded position sample into the shared state.
///
/// `lock_when_closed` is the policy flag: a confirmed fully-closed position
/// also engages the lock. Must be called with the shared-state lock held.
pub fn reconcile(
    shared: &mut ShutterShared,
    position: ShutterState,
    lock_when_closed: bool,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) {
    match position {
        ShutterState::Open => on_open(shared, bridge, sink),
        ShutterState::Closed => on_closed(shared, lock_when_closed, bridge, sink),
        ShutterState::Moving => on_moving(shared, bridge, sink),
        _ => on_fault(shared, bridge, sink),
    }
}

fn note_physical(shared: &mut ShutterShared, position: ShutterState) {
    if shared.physical != position {
        info!("Shutter position: source=hardware state={}", position.label());
        shared.physical = position;
    }
}

fn on_open(shared: &mut ShutterShared, bridge: &mut impl HapBridge, sink: &mut impl EventSink) {
    note_physical(shared, ShutterState::Open);
    if let Some(contact) = shared.accessories.contact.as_mut() {
        contact.set_open(bridge);
    }
    if !shared.accessories.door.is_open() {
        report_door(shared, DoorState::Open, bridge, sink);
    }
}

fn on_closed(
    shared: &mut ShutterShared,
    lock_when_closed: bool,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) {
    note_physical(shared, ShutterState::Closed);
    if let Some(contact) = shared.accessories.contact.as_mut() {
        contact.set_closed(bridge);
    }
    if shared.accessories.door.is_closed() {
        return;
    }
    report_door(shared, DoorState::Closed, bridge, sink);

    // A confirmed closed position engages the lock when the policy is on.
    if lock_when_closed && shared.lock != LockState::Secured {
        shared.lock = LockState::Secured;
        if let Some(lock) = shared.accessories.lock.as_mut() {
            lock.secure(bridge);
        }
        if let Some(switch) = shared.accessories.lock_switch.as_mut() {
            switch.set_on(true, bridge);
        }
        sink.emit(&AppEvent::LockReported(LockState::Secured));
    }
}

fn on_moving(shared: &mut ShutterShared, bridge: &mut impl HapBridge, sink: &mut impl EventSink) {
    note_physical(shared, ShutterState::Moving);
    // A door in motion is no longer fully closed; the contact sensor opens
    // as soon as either end-of-travel contact breaks.
    if let Some(contact) = shared.accessories.contact.as_mut() {
        contact.set_open(bridge);
    }
    // Neither contact made. If we already report a transition, keep it; a
    // relay pulse that started this movement set the direction before the
    // suppression window even let us in here. Otherwise the movement was
    // started manually and the direction is inferred from the last target:
    // a door targeted closed that starts moving must be opening.
    if shared.accessories.door.is_moving() {
        return;
    }
    if shared.accessories.door.target() == DoorTarget::Closed {
        info!("Shutter movement: source=hardware direction=opening");
        shared.accessories.door.begin_opening(bridge);
        sink.emit(&AppEvent::DoorReported(DoorState::Opening));
    } else {
        info!("Shutter movement: source=hardware direction=closing");
        shared.accessories.door.begin_closing(bridge);
        sink.emit(&AppEvent::DoorReported(DoorState::Closing));
    }
}

fn on_fault(shared: &mut ShutterShared, bridge: &mut impl HapBridge, sink: &mut impl EventSink) {
    // Logged and emitted once per fault episode, not once per tick.
    if shared.physical != ShutterState::Fault {
        warn!("Shutter position: source=hardware state=fault");
        sink.emit(&AppEvent::SensorFault);
    }
    shared.physical = ShutterState::Fault;
    // Fail safe: report the contact sensor closed so a fault cannot mask an
    // open door as all-clear. Door and lock keep their last reported state.
    if let Some(contact) = shared.accessories.contact.as_mut() {
        contact.set_closed(bridge);
    }
}

/// Push a confirmed end-of-travel state to the door accessory. For `Open`
/// and `Closed` the target follows along unless the opener was stopped
/// mid-travel.
fn report_door(
    shared: &mut ShutterShared,
    state: DoorState,
    bridge: &mut impl HapBridge,
    sink: &mut impl EventSink,
) {
    if shared.accessories.door.current() == state {
        return;
    }
    info!("Door state: source=hardware current={}", state.label());
    let target = match state {
        DoorState::Open => Some(DoorTarget::Open),
        DoorState::Closed => Some(DoorTarget::Closed),
        _ => None,
    };
    if let Some(target) = target {
        if shared.accessories.door.current() != DoorState::Stopped {
            shared.accessories.door.set_target(target, bridge);
        }
    }
    shared.accessories.door.set_current(state, bridge);
    sink.emit(&AppEvent::DoorReported(state));
}
