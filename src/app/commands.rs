//! Inbound commands to the controller.
//!
//! These represent remote-update requests arriving from the accessory
//! protocol layer (door target writes, lock target writes, switch writes).
//! The [`ShutterService`](super::service::ShutterService) interprets them;
//! its logic is identical whether a command is delivered by direct call
//! (tests) or through the queue in [`crate::events`] (firmware).

/// Remote requests the protocol layer can send into the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutterCommand {
    /// Door target set to open.
    Open,
    /// Door target set to closed.
    Close,
    /// Lock mechanism (or companion switch) secured.
    Lock,
    /// Lock mechanism (or companion switch) unsecured.
    Unlock,
}

impl ShutterCommand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Close => "close",
            Self::Lock => "lock",
            Self::Unlock => "unlock",
        }
    }
}
