//! End-of-travel contact input.
//!
//! One reed switch per end of travel, active HIGH (internal pull-down
//! holds the line low when the switch is open).

use crate::drivers::hw_init;
use crate::error::SensorError;

pub struct ContactInput {
    gpio: i32,
}

impl ContactInput {
    pub fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    /// Sample the contact. `true` means the contact is made.
    pub fn read(&self) -> Result<bool, SensorError> {
        Ok(hw_init::gpio_read(self.gpio))
    }
}
