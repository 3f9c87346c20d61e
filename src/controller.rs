//! Playback controller - core orchestration
//!
//! Composes the resolver, focus arbiter, route monitor, resource guard and
//! renderer session into one authoritative playback state machine. Commands
//! (play/pause/stop/seek) and asynchronous events (focus changes, route
//! signals, renderer callbacks) all serialize through a single critical
//! section per controller instance, so no two of them can interleave their
//! read-modify-write of shared state. Callbacks are delivered after the
//! critical section is left, from notifications collected while it was held.

use crate::{
    error::{PlaybackError, Result},
    events::{ControllerEvent, RendererEvent, RendererFault},
    focus::FocusArbiter,
    guard::ResourceGuard,
    renderer::{RendererFactory, RendererSession},
    resolver::TrackResolver,
    route::RouteChangeMonitor,
    types::{FocusGrant, PlaybackConfig, PlayerState},
};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Host-facing playback notifications
///
/// Registered via [`PlaybackController::set_callback`]. Invoked outside the
/// controller's critical section, in the order the notifications were
/// produced.
pub trait PlaybackCallback: Send + Sync {
    /// The observable player state changed
    fn on_playback_status_changed(&self, state: PlayerState);

    /// The current track played to the end
    fn on_completion(&self);

    /// A playback attempt failed; the message carries the classification
    fn on_error(&self, message: &str);
}

/// Notification produced under the critical section, delivered after it
enum Notification {
    Status(PlayerState),
    Completed,
    Error(String),
}

/// Focus-aware playback controller
///
/// Owns all of its collaborators exclusively; none are shared across
/// controller instances. Every mutation goes through one internal mutex.
pub struct PlaybackController {
    inner: Mutex<Inner>,
}

struct Inner {
    config: PlaybackConfig,
    resolver: Box<dyn TrackResolver>,
    arbiter: Box<dyn FocusArbiter>,
    monitor: Box<dyn RouteChangeMonitor>,
    guard: Box<dyn ResourceGuard>,
    session: RendererSession,

    focus: FocusGrant,
    current_track_id: Option<String>,
    play_on_focus_gain: bool,
    guard_held: bool,
    route_subscribed: bool,
    fault: Option<RendererFault>,

    callback: Option<Arc<dyn PlaybackCallback>>,
    pending: Vec<Notification>,
}

impl PlaybackController {
    /// Create a controller from its collaborators
    pub fn new(
        config: PlaybackConfig,
        resolver: Box<dyn TrackResolver>,
        arbiter: Box<dyn FocusArbiter>,
        monitor: Box<dyn RouteChangeMonitor>,
        guard: Box<dyn ResourceGuard>,
        factory: Box<dyn RendererFactory>,
    ) -> Self {
        Self {
            inner: Mutex::new(Inner {
                config,
                resolver,
                arbiter,
                monitor,
                guard,
                session: RendererSession::new(factory),
                focus: FocusGrant::None,
                current_track_id: None,
                play_on_focus_gain: false,
                guard_held: false,
                route_subscribed: false,
                fault: None,
                callback: None,
                pending: Vec::new(),
            }),
        }
    }

    /// Register the host callback
    pub fn set_callback(&self, callback: Arc<dyn PlaybackCallback>) {
        self.inner.lock().unwrap().callback = Some(callback);
    }

    /// Start (or resume) playback of the given track
    ///
    /// Returns once the load request has been issued; readiness surfaces
    /// later as a `Buffering` then `Playing` event sequence. A repeated call
    /// with the already-loaded track resumes in place without reloading.
    pub fn play(&self, track_id: &str) -> Result<()> {
        self.with_inner(|inner| inner.play(track_id))
    }

    /// Pause playback, keeping focus for a later resume
    pub fn pause(&self) {
        self.with_inner(Inner::pause);
    }

    /// Stop playback and release every held resource
    pub fn stop(&self) {
        self.with_inner(Inner::stop);
    }

    /// Seek within the loaded track; no-op if nothing is loaded
    pub fn seek_to(&self, position_ms: u64) {
        self.with_inner(|inner| inner.seek_to(position_ms));
    }

    /// Apply an asynchronous event from the host or the renderer
    pub fn handle_event(&self, event: ControllerEvent) {
        self.with_inner(|inner| inner.handle_event(event));
    }

    /// Whether playback is intended or audibly running
    ///
    /// Deliberately reports true while focus is temporarily denied but the
    /// user still wants playback, distinguishing intent from instantaneous
    /// renderer state.
    pub fn is_playing(&self) -> bool {
        self.inner.lock().unwrap().is_playing()
    }

    /// Observable player state
    pub fn state(&self) -> PlayerState {
        self.inner.lock().unwrap().state()
    }

    /// Current stream position in milliseconds, 0 if nothing is loaded
    pub fn position(&self) -> u64 {
        self.inner.lock().unwrap().session.position()
    }

    /// Override the tracked media id without loading anything
    pub fn set_current_media_id(&self, track_id: &str) {
        self.inner.lock().unwrap().current_track_id = Some(track_id.to_string());
    }

    /// Id of the track the controller currently considers loaded
    pub fn current_media_id(&self) -> Option<String> {
        self.inner.lock().unwrap().current_track_id.clone()
    }

    /// Run `f` under the critical section, then deliver the notifications it
    /// produced with the lock released
    fn with_inner<T>(&self, f: impl FnOnce(&mut Inner) -> T) -> T {
        let (out, callback, pending) = {
            let mut inner = self.inner.lock().unwrap();
            let out = f(&mut inner);
            (out, inner.callback.clone(), std::mem::take(&mut inner.pending))
        };
        if let Some(callback) = callback {
            for notification in pending {
                match notification {
                    Notification::Status(state) => callback.on_playback_status_changed(state),
                    Notification::Completed => callback.on_completion(),
                    Notification::Error(message) => callback.on_error(&message),
                }
            }
        }
        out
    }
}

impl Inner {
    fn play(&mut self, track_id: &str) -> Result<()> {
        debug!(track_id, "play");
        self.play_on_focus_gain = true;
        self.focus = self.arbiter.request();
        debug!(focus = ?self.focus, "focus requested");
        self.subscribe_route();

        let track_changed = self.current_track_id.as_deref() != Some(track_id);
        if track_changed || !self.session.is_loaded() {
            // Tear down the superseded session before anything else so a
            // late callback from it cannot resurrect old state. Focus stays
            // held.
            self.release_guard();
            self.session.release(false);

            let Some(track) = self.resolver.resolve(track_id) else {
                let err = PlaybackError::TrackNotFound(track_id.to_string());
                warn!(track_id, "track resolution failed");
                self.pending.push(Notification::Error(err.to_string()));
                return Err(err);
            };
            self.current_track_id = Some(track_id.to_string());
            self.fault = None;

            let uri = track.source_uri.replace(' ', "%20");
            self.acquire_guard();
            self.session.load(&uri);
        }

        self.reconcile();
        Ok(())
    }

    fn pause(&mut self) {
        debug!("pause");
        self.session.set_play_when_ready(false);
        self.release_guard();
        self.unsubscribe_route();
    }

    fn stop(&mut self) {
        debug!("stop");
        self.release_focus();
        self.unsubscribe_route();
        self.release_guard();
        self.session.release(true);
        self.current_track_id = None;
        self.play_on_focus_gain = false;
        self.fault = None;
    }

    fn seek_to(&mut self, position_ms: u64) {
        if self.session.is_loaded() {
            // Seeking implies intent to keep listening
            self.subscribe_route();
            self.session.seek_to(position_ms);
        }
    }

    fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::FocusChanged(grant) => self.on_focus_changed(grant),
            ControllerEvent::RouteUnreliable => {
                debug!("audio route became unreliable");
                if self.is_playing() {
                    self.pause();
                }
            }
            ControllerEvent::Renderer { session, event } => {
                if !self.session.is_current(session) {
                    debug!(?session, "dropping event from superseded session");
                    return;
                }
                self.on_renderer_event(event);
            }
        }
    }

    fn on_focus_changed(&mut self, grant: FocusGrant) {
        debug!(?grant, "focus grant changed");
        if grant == FocusGrant::None {
            // Snapshot the resume intent before the downgrade forces the
            // renderer silent, so a later upgrade can restore playback.
            self.play_on_focus_gain = self.session.play_when_ready();
        }
        self.focus = grant;
        if self.session.is_loaded() {
            self.reconcile();
        }
    }

    fn on_renderer_event(&mut self, event: RendererEvent) {
        match event {
            RendererEvent::StateChanged {
                state,
                play_when_ready,
            } => {
                self.session.note_state(state, play_when_ready);
                let state = self.state();
                self.pending.push(Notification::Status(state));
            }
            RendererEvent::Ended => {
                self.session.note_ended();
                self.pending.push(Notification::Completed);
            }
            RendererEvent::Error(fault) => {
                warn!(%fault, "renderer fault");
                // Release everything tied to the failed load, but keep
                // focus: the host still owns it for a retry by the user.
                self.release_guard();
                self.unsubscribe_route();
                self.session.release(false);
                let message = fault.to_string();
                self.fault = Some(fault);
                self.pending.push(Notification::Error(message));
            }
        }
    }

    /// Reconcile renderer behavior with the current focus grant
    ///
    /// Runs after every focus change and after load/play. Volume policy
    /// follows the grant; a pending resume intent is consumed only on a
    /// full grant.
    fn reconcile(&mut self) {
        match self.focus {
            FocusGrant::None => {
                self.session.set_play_when_ready(false);
            }
            FocusGrant::Ducked => {
                self.session.set_volume(self.config.duck_volume);
            }
            FocusGrant::Full => {
                self.session.set_volume(self.config.normal_volume);
                if self.play_on_focus_gain {
                    self.session.set_play_when_ready(true);
                    self.play_on_focus_gain = false;
                }
            }
        }
    }

    fn is_playing(&self) -> bool {
        self.play_on_focus_gain || self.session.play_when_ready()
    }

    fn state(&self) -> PlayerState {
        if self.fault.is_some() {
            PlayerState::Error
        } else {
            self.session.player_state()
        }
    }

    fn release_focus(&mut self) {
        if self.arbiter.release() {
            self.focus = FocusGrant::None;
        } else {
            // Still held as far as the host is concerned; keep the tracked
            // grant so we do not assume the resource is free.
            warn!("focus release did not take effect");
        }
    }

    fn acquire_guard(&mut self) {
        if !self.guard_held {
            self.guard.acquire();
            self.guard_held = true;
            debug!("resource guard acquired");
        }
    }

    fn release_guard(&mut self) {
        if self.guard_held {
            self.guard.release();
            self.guard_held = false;
            debug!("resource guard released");
        }
    }

    fn subscribe_route(&mut self) {
        if !self.route_subscribed {
            self.monitor.subscribe();
            self.route_subscribed = true;
        }
    }

    fn unsubscribe_route(&mut self) {
        if self.route_subscribed {
            self.monitor.unsubscribe();
            self.route_subscribed = false;
        }
    }
}
