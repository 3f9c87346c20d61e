//! Audio focus arbitration
//!
//! Wraps the host's exclusive-playback-rights mechanism. The arbiter only
//! answers synchronous request/release calls; asynchronous grant changes
//! reach the controller as [`ControllerEvent::FocusChanged`].
//!
//! [`ControllerEvent::FocusChanged`]: crate::ControllerEvent::FocusChanged

use crate::types::FocusGrant;

/// Requests and abandons exclusive playback focus from the host
pub trait FocusArbiter: Send {
    /// Request playback focus
    ///
    /// Returns the immediately-granted level: `Full` or `None`. Ducking is
    /// never granted synchronously; it only arrives as an asynchronous
    /// downgrade event.
    fn request(&mut self) -> FocusGrant;

    /// Abandon playback focus; idempotent
    ///
    /// Returns `true` when the abandon took effect. On `false` the caller
    /// must keep treating the focus as held.
    fn release(&mut self) -> bool;
}
