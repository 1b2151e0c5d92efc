//! Lock mechanism accessory model.

use log::info;

use crate::app::ports::HapBridge;

use super::LockState;

pub struct LockAccessory {
    current: LockState,
}

impl LockAccessory {
    /// A freshly announced lock reports secured; the shared lock state in
    /// [`ShutterShared`](crate::shutter::ShutterShared) starts the same way
    /// when this accessory is enabled.
    pub fn new() -> Self {
        Self {
            current: LockState::Secured,
        }
    }

    pub fn current(&self) -> LockState {
        self.current
    }

    pub fn is_secured(&self) -> bool {
        self.current == LockState::Secured
    }

    pub fn secure(&mut self, bridge: &mut impl HapBridge) {
        info!(
            "LockMechanism update: target=secured current={}",
            self.current.label()
        );
        self.current = LockState::Secured;
        bridge.lock_target(LockState::Secured);
        bridge.lock_current(LockState::Secured);
    }

    pub fn unsecure(&mut self, bridge: &mut impl HapBridge) {
        info!(
            "LockMechanism update: target=unsecured current={}",
            self.current.label()
        );
        self.current = LockState::Unsecured;
        bridge.lock_target(LockState::Unsecured);
        bridge.lock_current(LockState::Unsecured);
    }
}
