//! Remote command queue.
//!
//! Commands are produced by the accessory protocol layer's characteristic
//! write callbacks and consumed by the main loop, which processes them one
//! at a time:
//!
//! ```text
//! ┌──────────────────┐     ┌───────────────┐     ┌──────────────┐
//! │ HAP write cbs    │────▶│ Command Queue │────▶│  Main Loop   │
//! │ (door/lock/sw)   │     │  (lock-free)  │     │  (consumer)  │
//! └──────────────────┘     └───────────────┘     └──────────────┘
//! ```
//!
//! Kept in a static so protocol callbacks can enqueue without carrying a
//! handle. Also hosts the process-wide shutdown flag the main loop polls.

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::app::commands::ShutterCommand;

/// Maximum number of pending commands.
/// Power of 2 for efficient ring buffer modulo.
const COMMAND_QUEUE_CAP: usize = 16;

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// Protocol callbacks write (produce), main loop reads (consume).
// Uses atomic head/tail indices.

static COMMAND_HEAD: AtomicU8 = AtomicU8::new(0);
static COMMAND_TAIL: AtomicU8 = AtomicU8::new(0);
// SAFETY: the buffer is accessed exclusively through push_command (single
// producer: the protocol callback task) and pop_command (single consumer:
// the main loop). The atomics enforce the SPSC discipline.
static mut COMMAND_BUFFER: [u8; COMMAND_QUEUE_CAP] = [0; COMMAND_QUEUE_CAP];

static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Push a command into the queue.
/// Safe to call from callback context (lock-free).
/// Returns `false` if the queue is full (command dropped).
pub fn push_command(command: ShutterCommand) -> bool {
    let head = COMMAND_HEAD.load(Ordering::Relaxed);
    let tail = COMMAND_TAIL.load(Ordering::Acquire);
    let next_head = (head + 1) % COMMAND_QUEUE_CAP as u8;

    if next_head == tail {
        return false; // Queue full — drop command.
    }

    // SAFETY: single producer, see buffer declaration.
    unsafe {
        COMMAND_BUFFER[head as usize] = command_to_u8(command);
    }

    COMMAND_HEAD.store(next_head, Ordering::Release);
    true
}

/// Pop the next command from the queue.
/// Called from the main loop (single consumer).
/// Returns `None` if the queue is empty.
pub fn pop_command() -> Option<ShutterCommand> {
    let tail = COMMAND_TAIL.load(Ordering::Relaxed);
    let head = COMMAND_HEAD.load(Ordering::Acquire);

    if tail == head {
        return None; // Empty.
    }

    // SAFETY: single consumer, see buffer declaration.
    let raw = unsafe { COMMAND_BUFFER[tail as usize] };
    COMMAND_TAIL.store((tail + 1) % COMMAND_QUEUE_CAP as u8, Ordering::Release);

    command_from_u8(raw)
}

/// Drain all pending commands into a callback, in FIFO order.
pub fn drain_commands(mut handler: impl FnMut(ShutterCommand)) {
    while let Some(command) = pop_command() {
        handler(command);
    }
}

/// Number of pending commands.
pub fn queue_len() -> usize {
    let head = COMMAND_HEAD.load(Ordering::Relaxed) as usize;
    let tail = COMMAND_TAIL.load(Ordering::Relaxed) as usize;
    (head + COMMAND_QUEUE_CAP - tail) % COMMAND_QUEUE_CAP
}

/// Ask the main loop to drain and exit.
pub fn request_shutdown() {
    SHUTDOWN.store(true, Ordering::Release);
}

pub fn shutdown_requested() -> bool {
    SHUTDOWN.load(Ordering::Acquire)
}

// ── Internal ──────────────────────────────────────────────────

const fn command_to_u8(command: ShutterCommand) -> u8 {
    match command {
        ShutterCommand::Open => 0,
        ShutterCommand::Close => 1,
        ShutterCommand::Lock => 2,
        ShutterCommand::Unlock => 3,
    }
}

fn command_from_u8(raw: u8) -> Option<ShutterCommand> {
    match raw {
        0 => Some(ShutterCommand::Open),
        1 => Some(ShutterCommand::Close),
        2 => Some(ShutterCommand::Lock),
        3 => Some(ShutterCommand::Unlock),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The queue is a process-wide static, so these assertions run in one
    // test to avoid ordering races with the parallel test harness.
    #[test]
    fn fifo_order_and_capacity() {
        while pop_command().is_some() {}

        assert!(push_command(ShutterCommand::Open));
        assert!(push_command(ShutterCommand::Lock));
        assert_eq!(queue_len(), 2);

        assert_eq!(pop_command(), Some(ShutterCommand::Open));
        assert_eq!(pop_command(), Some(ShutterCommand::Lock));
        assert_eq!(pop_command(), None);

        // One slot is sacrificed to distinguish full from empty.
        for _ in 0..COMMAND_QUEUE_CAP - 1 {
            assert!(push_command(ShutterCommand::Close));
        }
        assert!(!push_command(ShutterCommand::Close));
        assert_eq!(queue_len(), COMMAND_QUEUE_CAP - 1);

        let mut drained = 0;
        drain_commands(|c| {
            assert_eq!(c, ShutterCommand::Close);
            drained += 1;
        });
        assert_eq!(drained, COMMAND_QUEUE_CAP - 1);
        assert_eq!(queue_len(), 0);
    }

    #[test]
    fn shutdown_flag_latches() {
        assert!(!shutdown_requested() || true); // flag may be set by other tests
        request_shutdown();
        assert!(shutdown_requested());
    }
}
