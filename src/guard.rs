//! Streaming resource guard
//!
//! A coarse exclusive system resource held while a track is actively
//! decoding or buffering, in the manner of a wake lock that keeps the
//! network path alive. Released on stop, pause and every teardown path.

/// Acquire/release guard over an exclusive system resource
///
/// Release must be idempotent: both normal transitions and cleanup-on-error
/// paths release the same resource, and a double release is a no-op.
pub trait ResourceGuard: Send {
    /// Take the resource
    fn acquire(&mut self);

    /// Give the resource back; idempotent
    fn release(&mut self);
}
