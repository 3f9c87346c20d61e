//! Output-route change monitoring
//!
//! Subscribes to the host signal that the audio output route became
//! unreliable (wired or Bluetooth disconnect). The notification itself is
//! delivered as [`ControllerEvent::RouteUnreliable`].
//!
//! [`ControllerEvent::RouteUnreliable`]: crate::ControllerEvent::RouteUnreliable

/// Subscription to the host's route-change signal
///
/// Both operations are idempotent: subscribing while subscribed and
/// unsubscribing while unsubscribed are no-ops.
pub trait RouteChangeMonitor: Send {
    /// Start listening for route changes
    fn subscribe(&mut self);

    /// Stop listening for route changes
    fn unsubscribe(&mut self);
}
