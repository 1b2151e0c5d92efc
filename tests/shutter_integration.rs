//! End-to-end scenarios for the shutter controller service.
//!
//! Exercises the gate and the reconciler through `ShutterService` with
//! mock ports, the way the firmware's command loop and poll thread drive
//! it. No hardware, no accessory transport.

use garage_shutter::app::commands::ShutterCommand;
use garage_shutter::app::events::AppEvent;
use garage_shutter::app::ports::{EventSink, HapBridge, Relay, RelayPort, SensorPort};
use garage_shutter::app::service::ShutterService;
use garage_shutter::config::ShutterConfig;
use garage_shutter::error::SensorError;
use garage_shutter::hap::{Accessories, ContactState, DoorState, DoorTarget, LockState};
use garage_shutter::shutter::gate::{RejectReason, COMMAND_DEBOUNCE_MS, REPORT_SUPPRESS_MS};
use garage_shutter::shutter::ContactReadings;

// ── Mock ports ────────────────────────────────────────────────

struct MockRelays {
    pulses: Vec<(Relay, u32)>,
}

impl MockRelays {
    fn new() -> Self {
        Self { pulses: Vec::new() }
    }
}

impl RelayPort for MockRelays {
    fn pulse(&mut self, relay: Relay, hold_ms: u32) {
        self.pulses.push((relay, hold_ms));
    }
}

struct MockSensors {
    readings: Result<ContactReadings, SensorError>,
}

impl MockSensors {
    fn reading(closed: bool, open: bool) -> Self {
        Self {
            readings: Ok(ContactReadings { closed, open }),
        }
    }

    fn set(&mut self, closed: bool, open: bool) {
        self.readings = Ok(ContactReadings { closed, open });
    }
}

impl SensorPort for MockSensors {
    fn read_contacts(&mut self) -> Result<ContactReadings, SensorError> {
        self.readings
    }
}

/// Records every characteristic push in order.
#[derive(Default)]
struct RecBridge {
    door_current: Vec<DoorState>,
    door_target: Vec<DoorTarget>,
    lock_current: Vec<LockState>,
    switch_on: Vec<bool>,
    contact: Vec<ContactState>,
}

impl HapBridge for RecBridge {
    fn door_current(&mut self, state: DoorState) {
        self.door_current.push(state);
    }
    fn door_target(&mut self, target: DoorTarget) {
        self.door_target.push(target);
    }
    fn lock_current(&mut self, state: LockState) {
        self.lock_current.push(state);
    }
    fn lock_target(&mut self, _state: LockState) {}
    fn switch_on(&mut self, on: bool) {
        self.switch_on.push(on);
    }
    fn contact_state(&mut self, state: ContactState) {
        self.contact.push(state);
    }
}

#[derive(Default)]
struct RecSink {
    events: Vec<AppEvent>,
}

impl EventSink for RecSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

fn service(config: ShutterConfig) -> ShutterService {
    let accessories = Accessories::from_config(&config);
    ShutterService::new(config, accessories)
}

fn unlocked_config() -> ShutterConfig {
    ShutterConfig {
        enable_lock_mechanism: false,
        enable_lock_switch: false,
        lock_when_closed: false,
        ..ShutterConfig::default()
    }
}

// ── Command gating ────────────────────────────────────────────

#[test]
fn second_command_within_debounce_window_does_not_pulse() {
    let svc = service(unlocked_config());
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    svc.handle_command(ShutterCommand::Open, 1_000, &mut relays, &mut bridge, &mut sink);
    // Second request 2 s later, well inside the 5 s window. This one
    // incurs the 1 s reject-then-restore delay.
    svc.handle_command(ShutterCommand::Close, 3_000, &mut relays, &mut bridge, &mut sink);

    assert_eq!(relays.pulses, vec![(Relay::OpenButton, 500)]);
    assert!(sink.events.contains(&AppEvent::CommandRejected {
        command: ShutterCommand::Close,
        reason: RejectReason::Debounce,
    }));

    // The restore put target/current back to the accepted command's pair.
    svc_door_is(&svc, DoorState::Opening, DoorTarget::Open);

    // Once the window elapses a new command pulses again.
    svc.handle_command(
        ShutterCommand::Close,
        1_000 + COMMAND_DEBOUNCE_MS,
        &mut relays,
        &mut bridge,
        &mut sink,
    );
    assert_eq!(relays.pulses.len(), 2);
    assert_eq!(relays.pulses[1], (Relay::CloseButton, 500));
}

#[test]
fn open_while_locked_is_rejected_and_restored() {
    // Lock mechanism enabled: lock starts engaged.
    let svc = service(ShutterConfig::default());
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    svc.handle_command(ShutterCommand::Open, 1_000, &mut relays, &mut bridge, &mut sink);

    assert!(relays.pulses.is_empty());
    assert!(sink.events.contains(&AppEvent::CommandRejected {
        command: ShutterCommand::Open,
        reason: RejectReason::Locked,
    }));
    // Restored to the pre-request pair (fresh boot: closed/closed).
    svc_door_is(&svc, DoorState::Closed, DoorTarget::Closed);
}

#[test]
fn close_is_never_blocked_by_the_lock() {
    let svc = service(ShutterConfig::default());
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    svc.handle_command(ShutterCommand::Close, 1_000, &mut relays, &mut bridge, &mut sink);

    assert_eq!(relays.pulses, vec![(Relay::CloseButton, 500)]);
    assert!(sink.events.contains(&AppEvent::CommandAccepted(ShutterCommand::Close)));
}

#[test]
fn unlock_then_open_succeeds() {
    let svc = service(ShutterConfig::default());
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    svc.handle_command(ShutterCommand::Unlock, 1_000, &mut relays, &mut bridge, &mut sink);
    svc.handle_command(ShutterCommand::Open, 1_100, &mut relays, &mut bridge, &mut sink);

    assert_eq!(relays.pulses, vec![(Relay::OpenButton, 500)]);
    assert!(sink.events.contains(&AppEvent::LockReported(LockState::Unsecured)));
}

#[test]
fn lock_with_close_policy_pulses_close_while_open() {
    let config = ShutterConfig {
        close_when_locked: true,
        lock_when_closed: false,
        ..ShutterConfig::default()
    };
    let svc = service(config);
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    // Bring the door to open first.
    svc.handle_command(ShutterCommand::Unlock, 0, &mut relays, &mut bridge, &mut sink);
    let mut sensors = MockSensors::reading(false, true);
    svc.poll_tick(100, &mut sensors, &mut bridge, &mut sink);
    relays.pulses.clear();

    svc.handle_command(ShutterCommand::Lock, 1_000, &mut relays, &mut bridge, &mut sink);

    assert_eq!(relays.pulses, vec![(Relay::CloseButton, 500)]);
    assert!(sink.events.contains(&AppEvent::LockReported(LockState::Secured)));
    assert_eq!(bridge.lock_current.last(), Some(&LockState::Secured));
    assert_eq!(bridge.switch_on.last(), Some(&true));
}

// ── Reconciliation ────────────────────────────────────────────

#[test]
fn suppression_window_delays_sensor_reports() {
    let svc = service(unlocked_config());
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    svc.handle_command(ShutterCommand::Open, 1_000, &mut relays, &mut bridge, &mut sink);

    // While the window is open the poller defers entirely — even a
    // contradictory "still closed" sample changes nothing.
    let mut sensors = MockSensors::reading(true, false);
    svc.poll_tick(2_000, &mut sensors, &mut bridge, &mut sink);
    svc.poll_tick(4_000, &mut sensors, &mut bridge, &mut sink);
    assert!(!sink.events.iter().any(|e| matches!(e, AppEvent::DoorReported(_))));
    svc_door_is(&svc, DoorState::Opening, DoorTarget::Open);

    // Window elapsed: the open contact is made and the state converges.
    sensors.set(false, true);
    svc.poll_tick(1_000 + REPORT_SUPPRESS_MS, &mut sensors, &mut bridge, &mut sink);
    assert!(sink.events.contains(&AppEvent::DoorReported(DoorState::Open)));
    assert_eq!(bridge.contact.last(), Some(&ContactState::Open));
}

#[test]
fn steady_state_produces_no_characteristic_traffic() {
    let svc = service(unlocked_config());
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();
    let mut sensors = MockSensors::reading(false, true);

    svc.poll_tick(0, &mut sensors, &mut bridge, &mut sink);
    let pushes = bridge.door_current.len() + bridge.door_target.len() + bridge.contact.len();

    for tick in 1..=10u64 {
        svc.poll_tick(tick * 1_000, &mut sensors, &mut bridge, &mut sink);
    }
    let pushes_after = bridge.door_current.len() + bridge.door_target.len() + bridge.contact.len();
    assert_eq!(pushes, pushes_after);
}

#[test]
fn confirmed_close_engages_lock_when_policy_on() {
    // Defaults: lock mechanism + lock_when_closed on.
    let svc = service(ShutterConfig::default());
    let mut relays = MockRelays::new();
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    // Unlock and open so the later closed sample is a real transition.
    svc.handle_command(ShutterCommand::Unlock, 0, &mut relays, &mut bridge, &mut sink);
    let mut sensors = MockSensors::reading(false, true);
    svc.poll_tick(100, &mut sensors, &mut bridge, &mut sink);

    sensors.set(true, false);
    svc.poll_tick(1_000, &mut sensors, &mut bridge, &mut sink);

    assert!(sink.events.contains(&AppEvent::DoorReported(DoorState::Closed)));
    assert!(sink.events.contains(&AppEvent::LockReported(LockState::Secured)));
    assert_eq!(bridge.switch_on.last(), Some(&true));

    // And the re-engaged lock blocks the next open.
    svc.handle_command(ShutterCommand::Open, 2_000, &mut relays, &mut bridge, &mut sink);
    assert!(relays.pulses.is_empty());
}

#[test]
fn manual_movement_direction_is_inferred_from_target() {
    let svc = service(unlocked_config());
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    // Fresh boot, target closed: movement with no command reports opening,
    // and the contact sensor flips open the moment the door leaves closed.
    let mut sensors = MockSensors::reading(false, false);
    svc.poll_tick(0, &mut sensors, &mut bridge, &mut sink);
    assert!(sink.events.contains(&AppEvent::DoorReported(DoorState::Opening)));
    assert_eq!(bridge.contact.last(), Some(&ContactState::Open));

    // Reaches open, then starts moving again: now it must be closing.
    sensors.set(false, true);
    svc.poll_tick(1_000, &mut sensors, &mut bridge, &mut sink);
    sensors.set(false, false);
    svc.poll_tick(2_000, &mut sensors, &mut bridge, &mut sink);
    assert!(sink.events.contains(&AppEvent::DoorReported(DoorState::Closing)));
}

#[test]
fn contradictory_contacts_fault_once_and_fail_safe() {
    let svc = service(unlocked_config());
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    // Open first so the fail-safe contact write is observable.
    let mut sensors = MockSensors::reading(false, true);
    svc.poll_tick(0, &mut sensors, &mut bridge, &mut sink);

    // Both contacts made: physically impossible.
    sensors.set(true, true);
    for tick in 1..=5u64 {
        svc.poll_tick(tick * 1_000, &mut sensors, &mut bridge, &mut sink);
    }

    let faults = sink
        .events
        .iter()
        .filter(|e| matches!(e, AppEvent::SensorFault))
        .count();
    assert_eq!(faults, 1);
    assert_eq!(bridge.contact.last(), Some(&ContactState::Closed));
    // Door keeps its last reported state through the fault.
    svc_door_is(&svc, DoorState::Open, DoorTarget::Open);
}

#[test]
fn sensor_read_failure_is_a_fault() {
    let svc = service(unlocked_config());
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();
    let mut sensors = MockSensors {
        readings: Err(SensorError::NotPresent),
    };

    svc.poll_tick(0, &mut sensors, &mut bridge, &mut sink);
    assert!(sink.events.contains(&AppEvent::SensorFault));

    // Recovery: a sane sample resumes normal reporting.
    sensors.set(false, true);
    svc.poll_tick(1_000, &mut sensors, &mut bridge, &mut sink);
    assert!(sink.events.contains(&AppEvent::DoorReported(DoorState::Open)));
}

#[test]
fn disabled_accessories_receive_no_pushes() {
    let config = ShutterConfig {
        enable_lock_mechanism: false,
        enable_lock_switch: false,
        enable_contact_sensor: false,
        lock_when_closed: true,
        ..ShutterConfig::default()
    };
    let svc = service(config);
    let mut bridge = RecBridge::default();
    let mut sink = RecSink::default();

    let mut sensors = MockSensors::reading(false, true);
    svc.poll_tick(0, &mut sensors, &mut bridge, &mut sink);
    sensors.set(true, false);
    svc.poll_tick(1_000, &mut sensors, &mut bridge, &mut sink);

    // Door still reports; the disabled lock/switch/contact stay silent.
    assert!(!bridge.door_current.is_empty());
    assert!(bridge.lock_current.is_empty());
    assert!(bridge.switch_on.is_empty());
    assert!(bridge.contact.is_empty());
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_emits_initial_state() {
    let svc = service(ShutterConfig::default());
    let mut sink = RecSink::default();
    svc.start(&mut sink);
    assert_eq!(
        sink.events,
        vec![AppEvent::Started(garage_shutter::shutter::ShutterState::Unset)]
    );
}

// ── Helpers ───────────────────────────────────────────────────

fn svc_door_is(svc: &ShutterService, current: DoorState, target: DoorTarget) {
    let snapshot = svc.door_snapshot();
    assert_eq!(snapshot.current, current);
    assert_eq!(snapshot.target, target);
}
