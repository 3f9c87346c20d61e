//! Error types for playback control

use crate::events::RendererFault;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The catalog has no entry for the requested track id
    #[error("track not found: {0}")]
    TrackNotFound(String),

    /// The underlying renderer reported a fault
    #[error(transparent)]
    Renderer(#[from] RendererFault),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
