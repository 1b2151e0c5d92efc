//! Accessory state models — the in-firmware shadow of the HAP services.
//!
//! Each accessory holds the characteristic values the protocol layer
//! exposes (door opener, lock mechanism, lock switch, contact sensor) and
//! pushes every change through the [`HapBridge`](crate::app::ports::HapBridge)
//! port. The transport itself (pairing, encryption, wire encoding) is not
//! part of this crate; it attaches behind the bridge.

pub mod contact;
pub mod door;
pub mod lock;
pub mod lock_switch;

pub use contact::ContactSensor;
pub use door::DoorAccessory;
pub use lock::LockAccessory;
pub use lock_switch::LockSwitch;

use crate::config::ShutterConfig;

// ---------------------------------------------------------------------------
// Characteristic value enums
// ---------------------------------------------------------------------------

/// Reported door state (HAP `CurrentDoorState`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorState {
    Open,
    Closed,
    Opening,
    Closing,
    Stopped,
}

impl DoorState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Opening => "opening",
            Self::Closing => "closing",
            Self::Stopped => "stopped",
        }
    }
}

/// Commanded door state (HAP `TargetDoorState`) — only the two terminal
/// positions are valid targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorTarget {
    Open,
    Closed,
}

impl DoorTarget {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

/// Lock mechanism state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LockState {
    Unsecured,
    Secured,
}

impl LockState {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Unsecured => "unsecured",
            Self::Secured => "secured",
        }
    }
}

/// Contact sensor state. `Closed` means contact detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    Open,
    Closed,
}

/// Door target + current pair captured before a command, used to restore
/// the reported state when the command is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoorSnapshot {
    pub target: DoorTarget,
    pub current: DoorState,
}

// ---------------------------------------------------------------------------
// Accessory set
// ---------------------------------------------------------------------------

/// All accessories the controller drives. The door opener is always
/// present; the rest are constructed from the config enable flags, and
/// policy side effects skip absent ones.
pub struct Accessories {
    pub door: DoorAccessory,
    pub lock: Option<LockAccessory>,
    pub lock_switch: Option<LockSwitch>,
    pub contact: Option<ContactSensor>,
}

impl Accessories {
    pub fn from_config(config: &ShutterConfig) -> Self {
        Self {
            door: DoorAccessory::new(),
            lock: config.enable_lock_mechanism.then(LockAccessory::new),
            lock_switch: config.enable_lock_switch.then(LockSwitch::new),
            contact: config.enable_contact_sensor.then(ContactSensor::new),
        }
    }

    /// Number of accessories exposed to the protocol layer.
    pub fn count(&self) -> usize {
        1 + usize::from(self.lock.is_some())
            + usize::from(self.lock_switch.is_some())
            + usize::from(self.contact.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessory_count_follows_enable_flags() {
        let mut config = ShutterConfig::default();
        assert_eq!(Accessories::from_config(&config).count(), 4);

        config.enable_lock_switch = false;
        config.enable_contact_sensor = false;
        assert_eq!(Accessories::from_config(&config).count(), 2);
    }
}
