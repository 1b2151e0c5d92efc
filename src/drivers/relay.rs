//! Momentary relay driver.
//!
//! Each relay shorts one push-button input of the motor controller.
//! A pulse emulates a human press: assert, hold, release. The motor side
//! is unobservable, so drive failures are logged and not propagated — the
//! reconciler will notice if the shutter did not move.

use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::drivers::hw_init;

pub struct RelayDriver {
    gpio: i32,
    label: &'static str,
}

impl RelayDriver {
    pub fn new(gpio: i32, label: &'static str) -> Self {
        Self { gpio, label }
    }

    /// Emulate one button press. Blocks for `hold_ms`; never call with the
    /// shared-state lock held.
    pub fn pulse(&mut self, hold_ms: u32) {
        info!("Relay pulse: relay={} hold_ms={}", self.label, hold_ms);
        if let Err(err) = hw_init::gpio_try_write(self.gpio, true) {
            warn!("Relay assert failed: relay={} error={}", self.label, err);
        }
        thread::sleep(Duration::from_millis(u64::from(hold_ms)));
        if let Err(err) = hw_init::gpio_try_write(self.gpio, false) {
            warn!("Relay release failed: relay={} error={}", self.label, err);
        }
    }
}
