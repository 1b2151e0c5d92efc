//! Fuzz target: command queue push/pop sequences.
//!
//! Drives arbitrary interleavings of pushes and pops against the static
//! ring and checks the length invariant never breaks and pops only yield
//! commands that were pushed.
//!
//! cargo fuzz run fuzz_command_queue

#![no_main]

use garage_shutter::app::commands::ShutterCommand;
use garage_shutter::events::{pop_command, push_command, queue_len};
use libfuzzer_sys::fuzz_target;

const COMMANDS: [ShutterCommand; 4] = [
    ShutterCommand::Open,
    ShutterCommand::Close,
    ShutterCommand::Lock,
    ShutterCommand::Unlock,
];

fuzz_target!(|data: &[u8]| {
    // The queue is a process-wide static; start each run empty.
    while pop_command().is_some() {}

    let mut expected = std::collections::VecDeque::new();
    for &byte in data {
        if byte & 0x80 == 0 {
            let command = COMMANDS[(byte & 0x03) as usize];
            if push_command(command) {
                expected.push_back(command);
            } else {
                // Full queue must hold exactly capacity minus one.
                assert_eq!(queue_len(), 15);
            }
        } else {
            assert_eq!(pop_command(), expected.pop_front());
        }
        assert_eq!(queue_len(), expected.len());
        assert!(queue_len() < 16);
    }
});
