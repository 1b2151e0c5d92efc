//! GPIO-backed implementations of the sensor and relay ports.

use crate::app::ports::{Relay, RelayPort, SensorPort};
use crate::drivers::contact::ContactInput;
use crate::drivers::hw_init;
use crate::drivers::relay::RelayDriver;
use crate::error::{Error, SensorError};
use crate::pins;
use crate::shutter::ContactReadings;

/// The two momentary relays, owned by the main command loop.
pub struct RelayBank {
    open: RelayDriver,
    close: RelayDriver,
}

impl RelayBank {
    pub fn new() -> Self {
        Self {
            open: RelayDriver::new(pins::OPEN_RELAY_GPIO, "open"),
            close: RelayDriver::new(pins::CLOSE_RELAY_GPIO, "close"),
        }
    }
}

impl Default for RelayBank {
    fn default() -> Self {
        Self::new()
    }
}

impl RelayPort for RelayBank {
    fn pulse(&mut self, relay: Relay, hold_ms: u32) {
        match relay {
            Relay::OpenButton => self.open.pulse(hold_ms),
            Relay::CloseButton => self.close.pulse(hold_ms),
        }
    }
}

/// The two end-of-travel contacts, owned by the poll thread.
pub struct ContactBank {
    open: ContactInput,
    closed: ContactInput,
}

impl ContactBank {
    pub fn new() -> Self {
        Self {
            open: ContactInput::new(pins::OPEN_CONTACT_GPIO),
            closed: ContactInput::new(pins::CLOSE_CONTACT_GPIO),
        }
    }
}

impl Default for ContactBank {
    fn default() -> Self {
        Self::new()
    }
}

impl SensorPort for ContactBank {
    fn read_contacts(&mut self) -> Result<ContactReadings, SensorError> {
        Ok(ContactReadings {
            closed: self.closed.read()?,
            open: self.open.read()?,
        })
    }
}

/// Configure all GPIO once at boot. Fatal on failure — the controller is
/// useless without its pins.
pub fn init_hardware() -> crate::error::Result<()> {
    hw_init::init_peripherals().map_err(|_| Error::Init("GPIO config failed"))
}
