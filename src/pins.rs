//! GPIO pin assignments for the shutter controller board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Relay outputs (wired to the motor controller's push-button inputs)
// ---------------------------------------------------------------------------

/// Digital output: momentary "open" button relay (active HIGH).
pub const OPEN_RELAY_GPIO: i32 = 4;
/// Digital output: momentary "close" button relay (active HIGH).
pub const CLOSE_RELAY_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Contact inputs (end-of-travel reed switches)
// ---------------------------------------------------------------------------

/// Digital input: fully-open contact. HIGH = shutter edge at the top.
/// Internal pull-down; the switch pulls the line to 3V3 when made.
pub const OPEN_CONTACT_GPIO: i32 = 6;
/// Digital input: fully-closed contact. HIGH = shutter edge at the bottom.
pub const CLOSE_CONTACT_GPIO: i32 = 7;
