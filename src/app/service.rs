//! Controller service — glues the gate and the reconciler to the ports.
//!
//! The service owns the shared state behind one mutex. The main loop calls
//! [`ShutterService::handle_command`] for every queued remote command; a
//! dedicated poll thread calls [`ShutterService::poll_tick`] once per
//! configured interval. Relay pulses and the rejection-restore delay run
//! with the lock released; the gate's already-advanced debounce window is
//! what keeps concurrent commands out in the meantime.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::config::ShutterConfig;
use crate::hap::{Accessories, DoorSnapshot, LockState};
use crate::shutter::gate::{self, GateOutcome, REJECT_RESTORE_DELAY_MS};
use crate::shutter::{decode_position, reconciler, ShutterShared, ShutterState};

use super::commands::ShutterCommand;
use super::events::AppEvent;
use super::ports::{EventSink, HapBridge, Relay, RelayPort, SensorPort};

/// Orchestrates the shutter controller. Cheap to clone; clones share the
/// same state.
pub struct ShutterService {
    shared: Arc<Mutex<ShutterShared>>,
    config: ShutterConfig,
}

impl Clone for ShutterService {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
            config: self.config.clone(),
        }
    }
}

impl ShutterService {
    pub fn new(config: ShutterConfig, accessories: Accessories) -> Self {
        let lock_engaged = config.enable_lock_mechanism;
        Self {
            shared: Arc::new(Mutex::new(ShutterShared::new(accessories, lock_engaged))),
            config,
        }
    }

    pub fn config(&self) -> &ShutterConfig {
        &self.config
    }

    /// Currently reported door target/current pair.
    pub fn door_snapshot(&self) -> DoorSnapshot {
        self.locked().accessories.door.snapshot()
    }

    /// Current lock policy state.
    pub fn lock_state(&self) -> LockState {
        self.locked().lock
    }

    /// Acquire the shared state, recovering from a poisoned mutex. A panic
    /// in one loop must not brick the other one on a live garage door.
    fn locked(&self) -> MutexGuard<'_, ShutterShared> {
        self.shared
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Announce startup.
    pub fn start(&self, sink: &mut impl EventSink) {
        let shared = self.locked();
        info!(
            "Shutter controller: accessories={} lock={} state={}",
            shared.accessories.count(),
            shared.lock.label(),
            shared.physical.label(),
        );
        sink.emit(&AppEvent::Started(shared.physical));
    }

    /// Process one remote command end to end: gate under the lock, then the
    /// deferred side effects (pulses, rejection restore) with it released.
    pub fn handle_command(
        &self,
        command: ShutterCommand,
        now_ms: u64,
        relays: &mut impl RelayPort,
        bridge: &mut impl HapBridge,
        sink: &mut impl EventSink,
    ) {
        let outcome = {
            let mut shared = self.locked();
            gate::dispatch(
                &mut shared,
                command,
                now_ms,
                self.config.close_when_locked,
                bridge,
                sink,
            )
        };

        match outcome {
            GateOutcome::Pulse(relay) => {
                relays.pulse(relay, self.config.switch_hold_ms);
            }
            GateOutcome::Locked { pulse_close: true } => {
                relays.pulse(Relay::CloseButton, self.config.switch_hold_ms);
            }
            GateOutcome::Locked { pulse_close: false } | GateOutcome::Unlocked => {}
            GateOutcome::Rejected { prior, .. } => {
                // Let the rejected target write land remotely, then put the
                // prior pair back. Sleeping without the lock held keeps the
                // poll thread running.
                thread::sleep(Duration::from_millis(REJECT_RESTORE_DELAY_MS));
                let mut shared = self.locked();
                shared.accessories.door.restore(prior, bridge);
            }
        }
    }

    /// One reconciler tick: sample, decode, fold into the accessory state.
    /// Skipped entirely while the post-command suppression window is open.
    pub fn poll_tick(
        &self,
        now_ms: u64,
        sensors: &mut impl SensorPort,
        bridge: &mut impl HapBridge,
        sink: &mut impl EventSink,
    ) {
        let mut shared = self.locked();
        if shared.is_suppressed(now_ms) {
            info!("Poll door state: delayed");
            return;
        }

        let position = match sensors.read_contacts() {
            Ok(readings) => decode_position(readings),
            Err(err) => {
                warn!("Contact read failed: {}", err);
                ShutterState::Fault
            }
        };
        reconciler::reconcile(
            &mut shared,
            position,
            self.config.lock_when_closed,
            bridge,
            sink,
        );
    }
}
