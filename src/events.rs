//! Controller events
//!
//! All asynchronous notification sources (host focus changes, output-route
//! signals, renderer callbacks) feed the controller through one typed event
//! enum, applied in arrival order under the controller's critical section.

use crate::renderer::{RenderState, SessionId};
use crate::types::FocusGrant;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Events consumed by the playback controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// The host changed the audio focus grant
    FocusChanged(FocusGrant),

    /// The audio output route became unreliable (headphone unplug,
    /// Bluetooth disconnect)
    RouteUnreliable,

    /// An event from a renderer session
    ///
    /// Tagged with the originating session so late callbacks from a
    /// torn-down session can be dropped.
    Renderer {
        /// Session the event originated from
        session: SessionId,
        /// The renderer event itself
        event: RendererEvent,
    },
}

/// Events reported upward by a renderer session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RendererEvent {
    /// The renderer moved between idle/buffering/ready
    StateChanged {
        /// New renderer-internal state
        state: RenderState,
        /// Whether the renderer would advance when ready
        play_when_ready: bool,
    },

    /// The current source played to the end
    Ended,

    /// The renderer faulted
    Error(RendererFault),
}

/// Classified renderer fault
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{kind} error: {message}")]
pub struct RendererFault {
    /// Fault category
    pub kind: FaultKind,

    /// Renderer-reported message, passed through to the callback
    pub message: String,
}

impl RendererFault {
    /// Create a fault with the given category and message
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Renderer fault categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultKind {
    /// Source or demux failure (bad URI, unreadable container)
    Source,

    /// Decode or render failure
    Render,

    /// Anything the renderer could not classify
    Unexpected,
}

impl fmt::Display for FaultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FaultKind::Source => write!(f, "source"),
            FaultKind::Render => write!(f, "render"),
            FaultKind::Unexpected => write!(f, "unexpected"),
        }
    }
}
