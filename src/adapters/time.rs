//! Monotonic time adapter.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses a process-wide
//!   `std::time::Instant` epoch, so every clone in every thread agrees on
//!   the same timeline.

#[cfg(not(target_os = "espidf"))]
use std::sync::OnceLock;
#[cfg(not(target_os = "espidf"))]
use std::time::Instant;

#[cfg(not(target_os = "espidf"))]
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Monotonic milliseconds-since-boot source.
#[derive(Clone, Copy, Default)]
pub struct TimeAdapter;

impl TimeAdapter {
    pub fn new() -> Self {
        #[cfg(not(target_os = "espidf"))]
        EPOCH.get_or_init(Instant::now);
        Self
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(target_os = "espidf")]
    pub fn uptime_ms(&self) -> u64 {
        (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000
    }

    /// Milliseconds since boot (monotonic).
    #[cfg(not(target_os = "espidf"))]
    pub fn uptime_ms(&self) -> u64 {
        EPOCH.get_or_init(Instant::now).elapsed().as_millis() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uptime_is_monotonic() {
        let time = TimeAdapter::new();
        let a = time.uptime_ms();
        let b = time.uptime_ms();
        assert!(b >= a);
    }

    #[test]
    fn clones_share_the_epoch() {
        let a = TimeAdapter::new();
        let b = a;
        assert!(b.uptime_ms().abs_diff(a.uptime_ms()) < 100);
    }
}
