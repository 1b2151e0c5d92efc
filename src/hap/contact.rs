//! Contact sensor accessory model.
//!
//! `set_open`/`set_closed` are idempotent: writing the state already held
//! produces no push and no log line. The reconciler calls these every
//! tick, so without the dedupe a steady-state door would chatter the
//! protocol layer once per second.

use log::info;

use crate::app::ports::HapBridge;

use super::ContactState;

pub struct ContactSensor {
    state: ContactState,
}

impl ContactSensor {
    pub fn new() -> Self {
        // Contact detected (closed) until the first sensor sample says
        // otherwise — the same fail-safe default the fault path uses.
        Self {
            state: ContactState::Closed,
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == ContactState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == ContactState::Closed
    }

    pub fn set_open(&mut self, bridge: &mut impl HapBridge) {
        if self.is_open() {
            return;
        }
        info!("ContactSensor update: source=hardware contact=open");
        self.state = ContactState::Open;
        bridge.contact_state(ContactState::Open);
    }

    pub fn set_closed(&mut self, bridge: &mut impl HapBridge) {
        if self.is_closed() {
            return;
        }
        info!("ContactSensor update: source=hardware contact=closed");
        self.state = ContactState::Closed;
        bridge.contact_state(ContactState::Closed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hap::{DoorState, DoorTarget, LockState};

    struct CountBridge {
        contact_pushes: usize,
    }
    impl HapBridge for CountBridge {
        fn door_current(&mut self, _: DoorState) {}
        fn door_target(&mut self, _: DoorTarget) {}
        fn lock_current(&mut self, _: LockState) {}
        fn lock_target(&mut self, _: LockState) {}
        fn switch_on(&mut self, _: bool) {}
        fn contact_state(&mut self, _: ContactState) {
            self.contact_pushes += 1;
        }
    }

    #[test]
    fn set_open_is_idempotent() {
        let mut sensor = ContactSensor::new();
        let mut bridge = CountBridge { contact_pushes: 0 };

        sensor.set_open(&mut bridge);
        sensor.set_open(&mut bridge);
        assert_eq!(bridge.contact_pushes, 1);

        sensor.set_closed(&mut bridge);
        sensor.set_closed(&mut bridge);
        assert_eq!(bridge.contact_pushes, 2);
    }
}
