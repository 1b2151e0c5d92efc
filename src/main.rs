//! Garage shutter controller — main entry point.
//!
//! Hexagonal architecture with two loops sharing one mutex-protected
//! state record:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  RelayBank      ContactBank    LogBridge      NvsAdapter       │
//! │  (RelayPort)    (SensorPort)   (HapBridge)    (ConfigPort)     │
//! │  LogEventSink   TimeAdapter                                    │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │            ShutterService (pure logic)                 │    │
//! │  │  gate · reconciler · accessory models                  │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  main loop (commands + relays) · poll thread (contacts)        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Module declarations ───────────────────────────────────────
pub mod config;
mod error;
mod events;
mod pins;

pub mod app;
mod adapters;
mod drivers;
pub mod hap;
pub mod shutter;

// ── Imports ───────────────────────────────────────────────────
use std::thread;
use std::time::Duration;

use anyhow::Result;
use log::{info, warn};

use adapters::hap_log::LogBridge;
use adapters::hardware::{ContactBank, RelayBank};
use adapters::log_sink::LogEventSink;
use adapters::nvs::NvsAdapter;
use adapters::time::TimeAdapter;
use app::events::AppEvent;
use app::ports::{ConfigPort, EventSink};
use app::service::ShutterService;
use config::ShutterConfig;
use hap::Accessories;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Garage Shutter v{}               ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Initialise hardware peripherals ────────────────────
    if let Err(e) = adapters::hardware::init_hardware() {
        // Peripheral init failure is critical — log and halt.
        // In production this triggers the watchdog reset after timeout.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    // ── 3. Load config from NVS (or defaults) ─────────────────
    let config = match NvsAdapter::new().and_then(|nvs| nvs.load()) {
        Ok(cfg) => {
            info!("Config loaded from NVS");
            cfg
        }
        Err(e) => {
            warn!("NVS config load failed ({}), using defaults", e);
            ShutterConfig::default()
        }
    };

    info!(
        "Accessory identity: name={} manufacturer={} serial={}",
        config.name, config.manufacturer, config.serial
    );

    // ── 4. Construct adapters and the service ─────────────────
    let time = TimeAdapter::new();
    let mut relays = RelayBank::new();
    let mut bridge = LogBridge::new();
    let mut log_sink = LogEventSink::new();

    let accessories = Accessories::from_config(&config);
    let poll_interval_ms = config.poll_interval_ms;
    let service = ShutterService::new(config, accessories);
    service.start(&mut log_sink);

    // ── 5. Poll thread — owns the contact inputs ──────────────
    let poller = {
        let service = service.clone();
        thread::Builder::new()
            .name("shutter-poll".into())
            .spawn(move || {
                let mut sensors = ContactBank::new();
                let mut bridge = LogBridge::new();
                let mut sink = LogEventSink::new();
                while !events::shutdown_requested() {
                    service.poll_tick(time.uptime_ms(), &mut sensors, &mut bridge, &mut sink);
                    thread::sleep(Duration::from_millis(u64::from(poll_interval_ms)));
                }
            })?
    };

    info!("System ready. Entering command loop.");

    // ── 6. Command loop — owns the relays ─────────────────────
    while !events::shutdown_requested() {
        events::drain_commands(|command| {
            service.handle_command(
                command,
                time.uptime_ms(),
                &mut relays,
                &mut bridge,
                &mut log_sink,
            );
        });
        thread::sleep(Duration::from_millis(50));
    }

    // ── 7. Shutdown — relays released, poller drained ─────────
    log_sink.emit(&AppEvent::ShuttingDown);
    if poller.join().is_err() {
        warn!("Poll thread panicked during shutdown");
    }
    drivers::hw_init::release_outputs();
    info!("Shutdown complete");
    Ok(())
}
