//! Aura Player - Focus-Aware Playback Control
//!
//! Local audio-playback engine that mediates between a host application, the
//! host's exclusive audio-focus arbiter, and an underlying streaming media
//! renderer.
//!
//! This crate provides:
//! - The playback controller state machine (play/pause/stop/seek)
//! - Audio-focus reconciliation (full volume, ducked volume, forced pause)
//! - Output-route interruption handling (pause on headphone unplug)
//! - Resource-lifecycle discipline (focus grant, route subscription,
//!   wake-style resource guard) released in lockstep with playback state
//! - Stale-event protection across renderer session replacement
//!
//! # Architecture
//!
//! `aura-playback` is completely host-agnostic. Every capability it drives
//! is injected as a trait object:
//! - [`TrackResolver`] - id to playable source lookup
//! - [`FocusArbiter`] - exclusive playback rights
//! - [`RouteChangeMonitor`] - output-route interruption signal
//! - [`ResourceGuard`] - coarse exclusive system resource
//! - [`RendererFactory`] / [`MediaRenderer`] - the streaming renderer itself
//!
//! Commands and asynchronous host/renderer events all serialize through one
//! critical section per controller; state-change, completion and error
//! notifications surface through a registered [`PlaybackCallback`].
//!
//! # Example
//!
//! ```rust
//! use aura_playback::{
//!     ControllerEvent, FocusArbiter, FocusGrant, InMemoryTrackResolver, MediaRenderer,
//!     PlaybackConfig, PlaybackController, RendererFactory, ResourceGuard,
//!     RouteChangeMonitor, SessionId, TrackInfo,
//! };
//!
//! // Host-side adapters, normally backed by the platform's audio subsystem.
//! struct HostFocus;
//! impl FocusArbiter for HostFocus {
//!     fn request(&mut self) -> FocusGrant { FocusGrant::Full }
//!     fn release(&mut self) -> bool { true }
//! }
//!
//! struct HostRoutes;
//! impl RouteChangeMonitor for HostRoutes {
//!     fn subscribe(&mut self) {}
//!     fn unsubscribe(&mut self) {}
//! }
//!
//! struct NetworkLease;
//! impl ResourceGuard for NetworkLease {
//!     fn acquire(&mut self) {}
//!     fn release(&mut self) {}
//! }
//!
//! struct HostRenderer;
//! impl MediaRenderer for HostRenderer {
//!     fn prepare(&mut self, _uri: &str) {}
//!     fn set_play_when_ready(&mut self, _play: bool) {}
//!     fn set_volume(&mut self, _volume: f32) {}
//!     fn seek_to(&mut self, _position_ms: u64) {}
//!     fn position(&self) -> u64 { 0 }
//!     fn release(&mut self) {}
//! }
//!
//! struct HostRendererFactory;
//! impl RendererFactory for HostRendererFactory {
//!     fn create(&mut self, _session: SessionId) -> Box<dyn MediaRenderer> {
//!         Box::new(HostRenderer)
//!     }
//! }
//!
//! let mut catalog = InMemoryTrackResolver::new();
//! catalog.insert(TrackInfo {
//!     id: "track1".to_string(),
//!     source_uri: "http://music.example/track1.mp3".to_string(),
//!     title: "My Song".to_string(),
//!     artist: "Artist Name".to_string(),
//!     album: None,
//!     duration: None,
//! });
//!
//! let controller = PlaybackController::new(
//!     PlaybackConfig::default(),
//!     Box::new(catalog),
//!     Box::new(HostFocus),
//!     Box::new(HostRoutes),
//!     Box::new(NetworkLease),
//!     Box::new(HostRendererFactory),
//! );
//!
//! controller.play("track1").unwrap();
//! assert!(controller.is_playing());
//!
//! // Host delivers interruptions as events; losing focus pauses playback
//! // but remembers the intent to resume.
//! controller.handle_event(ControllerEvent::FocusChanged(FocusGrant::None));
//! controller.handle_event(ControllerEvent::FocusChanged(FocusGrant::Full));
//!
//! controller.stop();
//! assert!(!controller.is_playing());
//! ```

mod controller;
mod error;
mod events;
mod focus;
mod guard;
mod renderer;
mod resolver;
mod route;
pub mod types;

// Public exports
pub use controller::{PlaybackCallback, PlaybackController};
pub use error::{PlaybackError, Result};
pub use events::{ControllerEvent, FaultKind, RendererEvent, RendererFault};
pub use focus::FocusArbiter;
pub use guard::ResourceGuard;
pub use renderer::{
    map_render_state, MediaRenderer, RenderState, RendererFactory, RendererSession, SessionId,
};
pub use resolver::{InMemoryTrackResolver, TrackResolver};
pub use route::RouteChangeMonitor;
pub use types::{FocusGrant, PlaybackConfig, PlayerState, TrackInfo};
