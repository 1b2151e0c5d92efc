//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! A future telemetry adapter would implement the same trait.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LogEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started(state) => {
                info!("START | initial_state={}", state.label());
            }
            AppEvent::CommandAccepted(command) => {
                info!("CMD   | accepted {}", command.label());
            }
            AppEvent::CommandRejected { command, reason } => {
                info!("CMD   | rejected {} reason={}", command.label(), reason.label());
            }
            AppEvent::DoorReported(state) => {
                info!("DOOR  | {}", state.label());
            }
            AppEvent::LockReported(state) => {
                info!("LOCK  | {}", state.label());
            }
            AppEvent::SensorFault => {
                info!("FAULT | contact sensors contradictory or unavailable");
            }
            AppEvent::ShuttingDown => {
                info!("STOP  | draining for shutdown");
            }
        }
    }
}
