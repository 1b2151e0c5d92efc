//! Port adapters.
//!
//! Each adapter implements one of the port traits in
//! [`crate::app::ports`] against a concrete backend: real GPIO via the
//! drivers, NVS for config persistence, the serial log for events and for
//! the accessory-protocol placeholder.

pub mod hap_log;
pub mod hardware;
pub mod log_sink;
pub mod nvs;
pub mod time;
