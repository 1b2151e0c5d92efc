//! Log-only accessory bridge.
//!
//! Implements [`HapBridge`] by writing every characteristic push to the
//! serial log. Stands in for a real accessory-protocol transport; swapping
//! one in means implementing the same trait and feeding remote writes into
//! the command queue.

use log::debug;

use crate::app::ports::HapBridge;
use crate::hap::{ContactState, DoorState, DoorTarget, LockState};

pub struct LogBridge;

impl LogBridge {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl HapBridge for LogBridge {
    fn door_current(&mut self, state: DoorState) {
        debug!("HAP push: characteristic=door_current value={}", state.label());
    }

    fn door_target(&mut self, target: DoorTarget) {
        debug!("HAP push: characteristic=door_target value={}", target.label());
    }

    fn lock_current(&mut self, state: LockState) {
        debug!("HAP push: characteristic=lock_current value={}", state.label());
    }

    fn lock_target(&mut self, state: LockState) {
        debug!("HAP push: characteristic=lock_target value={}", state.label());
    }

    fn switch_on(&mut self, on: bool) {
        debug!(
            "HAP push: characteristic=switch_on value={}",
            if on { "on" } else { "off" }
        );
    }

    fn contact_state(&mut self, state: ContactState) {
        debug!(
            "HAP push: characteristic=contact_state value={}",
            match state {
                ContactState::Open => "open",
                ContactState::Closed => "closed",
            }
        );
    }
}
