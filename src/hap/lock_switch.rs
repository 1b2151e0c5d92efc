//! Companion lock switch accessory model.
//!
//! A plain on/off switch shadowing the lock mechanism for UIs that cannot
//! render a lock service.

use log::info;

use crate::app::ports::HapBridge;

pub struct LockSwitch {
    on: bool,
}

impl LockSwitch {
    pub fn new() -> Self {
        // Mirrors the lock mechanism's secured initial state.
        Self { on: true }
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    pub fn set_on(&mut self, on: bool, bridge: &mut impl HapBridge) {
        info!("Switch update: value={}", if on { "on" } else { "off" });
        self.on = on;
        bridge.switch_on(on);
    }
}
