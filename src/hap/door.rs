//! Garage door opener accessory model.
//!
//! Holds the `CurrentDoorState`/`TargetDoorState` pair the protocol layer
//! exposes. Setters dedupe: a write of the value already held pushes
//! nothing, so noisy sensors cannot flap the characteristic.

use log::info;

use crate::app::ports::HapBridge;

use super::{DoorSnapshot, DoorState, DoorTarget};

pub struct DoorAccessory {
    current: DoorState,
    target: DoorTarget,
}

impl DoorAccessory {
    /// HAP convention: a freshly announced opener reports closed. The
    /// `Closed` initial target is also what makes manual movement after
    /// boot report as `Opening` (see the reconciler's direction inference).
    pub fn new() -> Self {
        Self {
            current: DoorState::Closed,
            target: DoorTarget::Closed,
        }
    }

    pub fn current(&self) -> DoorState {
        self.current
    }

    pub fn target(&self) -> DoorTarget {
        self.target
    }

    pub fn is_open(&self) -> bool {
        self.current == DoorState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.current == DoorState::Closed
    }

    /// Whether the reported state is a transition (`Opening` or `Closing`).
    pub fn is_moving(&self) -> bool {
        matches!(self.current, DoorState::Opening | DoorState::Closing)
    }

    pub fn snapshot(&self) -> DoorSnapshot {
        DoorSnapshot {
            target: self.target,
            current: self.current,
        }
    }

    pub fn set_current(&mut self, state: DoorState, bridge: &mut impl HapBridge) {
        if self.current == state {
            return;
        }
        self.current = state;
        bridge.door_current(state);
    }

    pub fn set_target(&mut self, target: DoorTarget, bridge: &mut impl HapBridge) {
        if self.target == target {
            return;
        }
        self.target = target;
        bridge.door_target(target);
    }

    /// Report an accepted or inferred opening transition:
    /// `target=open current=opening`.
    pub fn begin_opening(&mut self, bridge: &mut impl HapBridge) {
        info!("GarageDoorOpener update: target=open current=opening");
        self.set_target(DoorTarget::Open, bridge);
        self.set_current(DoorState::Opening, bridge);
    }

    /// Report an accepted or inferred closing transition:
    /// `target=closed current=closing`.
    pub fn begin_closing(&mut self, bridge: &mut impl HapBridge) {
        info!("GarageDoorOpener update: target=closed current=closing");
        self.set_target(DoorTarget::Closed, bridge);
        self.set_current(DoorState::Closing, bridge);
    }

    /// Put target and current back to the pair captured before a rejected
    /// command.
    pub fn restore(&mut self, prior: DoorSnapshot, bridge: &mut impl HapBridge) {
        self.set_target(prior.target, bridge);
        self.set_current(prior.current, bridge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullBridge {
        pushes: usize,
    }
    impl HapBridge for NullBridge {
        fn door_current(&mut self, _: DoorState) {
            self.pushes += 1;
        }
        fn door_target(&mut self, _: DoorTarget) {
            self.pushes += 1;
        }
        fn lock_current(&mut self, _: super::super::LockState) {}
        fn lock_target(&mut self, _: super::super::LockState) {}
        fn switch_on(&mut self, _: bool) {}
        fn contact_state(&mut self, _: super::super::ContactState) {}
    }

    #[test]
    fn duplicate_writes_push_nothing() {
        let mut door = DoorAccessory::new();
        let mut bridge = NullBridge { pushes: 0 };

        door.set_current(DoorState::Closed, &mut bridge); // already closed
        assert_eq!(bridge.pushes, 0);

        door.set_current(DoorState::Open, &mut bridge);
        door.set_current(DoorState::Open, &mut bridge);
        assert_eq!(bridge.pushes, 1);
    }

    #[test]
    fn begin_opening_sets_both_characteristics() {
        let mut door = DoorAccessory::new();
        let mut bridge = NullBridge { pushes: 0 };
        door.begin_opening(&mut bridge);
        assert_eq!(door.target(), DoorTarget::Open);
        assert_eq!(door.current(), DoorState::Opening);
        assert!(door.is_moving());
        assert_eq!(bridge.pushes, 2);
    }

    #[test]
    fn restore_round_trips_snapshot() {
        let mut door = DoorAccessory::new();
        let mut bridge = NullBridge { pushes: 0 };
        let prior = door.snapshot();
        door.begin_opening(&mut bridge);
        door.restore(prior, &mut bridge);
        assert_eq!(door.snapshot(), prior);
    }
}
