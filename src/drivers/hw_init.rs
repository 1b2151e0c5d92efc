//! One-shot hardware peripheral initialization.
//!
//! Configures GPIO directions using raw ESP-IDF sys calls. Called once from
//! `main()` before the loops start.
//!
//! On host builds the pin levels live in an in-memory bitmask so tests can
//! drive the contact inputs and observe the relay outputs.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

use crate::error::ActuatorError;
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
        }
    }
}

// ── Init ──────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the loops start; single-threaded.
    unsafe {
        init_gpio_inputs()?;
        init_gpio_outputs()?;
    }
    info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs() -> Result<(), HwInitError> {
    // Reed contacts pull the line HIGH when made; idle level is defined by
    // the internal pull-down.
    let input_pins = [pins::OPEN_CONTACT_GPIO, pins::CLOSE_CONTACT_GPIO];

    for &pin in &input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_ENABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs() -> Result<(), HwInitError> {
    let output_pins = [pins::OPEN_RELAY_GPIO, pins::CLOSE_RELAY_GPIO];

    for &pin in &output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // Relays must come up released.
        unsafe { gpio_set_level(pin, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

// ── GPIO access ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from any task.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(target_os = "espidf")]
pub fn gpio_try_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_gpio_outputs().
    let ret = unsafe { gpio_set_level(pin, if high { 1 } else { 0 }) };
    if ret != ESP_OK as i32 {
        return Err(ActuatorError::GpioWriteFailed(ret));
    }
    Ok(())
}

/// Best-effort: drive both relay outputs released. Used on shutdown and
/// after a fatal error; failures are ignored because there is nothing
/// further to do with them.
pub fn release_outputs() {
    let _ = gpio_try_write(pins::OPEN_RELAY_GPIO, false);
    let _ = gpio_try_write(pins::CLOSE_RELAY_GPIO, false);
}

// ── Host simulation ───────────────────────────────────────────

#[cfg(not(target_os = "espidf"))]
mod sim {
    use core::sync::atomic::{AtomicU64, Ordering};

    /// One bit per GPIO number; bit set = level HIGH.
    pub(super) static LEVELS: AtomicU64 = AtomicU64::new(0);

    pub(super) fn get(pin: i32) -> bool {
        LEVELS.load(Ordering::Acquire) & (1u64 << pin) != 0
    }

    pub(super) fn set(pin: i32, high: bool) {
        if high {
            LEVELS.fetch_or(1u64 << pin, Ordering::AcqRel);
        } else {
            LEVELS.fetch_and(!(1u64 << pin), Ordering::AcqRel);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(pin: i32) -> bool {
    sim::get(pin)
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_try_write(pin: i32, high: bool) -> Result<(), ActuatorError> {
    sim::set(pin, high);
    Ok(())
}

/// Test hook: force a simulated input level.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_level(pin: i32, high: bool) {
    sim::set(pin, high);
}
