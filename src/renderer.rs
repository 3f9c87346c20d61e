//! Renderer session management
//!
//! Owns one instance of the underlying media renderer for the lifetime of
//! one loaded track. A track change always tears the handle down and builds
//! a fresh one; a handle is never reused across two track ids. Each handle
//! gets a unique [`SessionId`] so late callbacks from a superseded session
//! can be recognized and dropped.

use crate::types::PlayerState;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Identity of one loaded renderer handle
///
/// Allocated by [`RendererSession::load`] and handed to the factory so the
/// concrete renderer can tag the events it reports upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(u64);

/// Renderer-internal readiness state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderState {
    /// Constructed but not preparing
    Idle,

    /// Preparing or rebuffering
    Buffering,

    /// Has enough data to advance
    Ready,

    /// Played the source to the end
    Ended,
}

/// The underlying streaming media renderer
///
/// Drives decode/demux/output for one URI. Preparation is asynchronous:
/// `prepare` returns immediately and progress is reported upward as
/// [`RendererEvent`]s tagged with the handle's [`SessionId`].
///
/// [`RendererEvent`]: crate::RendererEvent
pub trait MediaRenderer: Send {
    /// Begin asynchronous preparation of the given source URI
    fn prepare(&mut self, uri: &str);

    /// Set whether the renderer should advance once ready
    fn set_play_when_ready(&mut self, play: bool);

    /// Set the output volume (0.0 to 1.0)
    fn set_volume(&mut self, volume: f32);

    /// Seek to a position in the current source
    fn seek_to(&mut self, position_ms: u64);

    /// Current stream position in milliseconds
    fn position(&self) -> u64;

    /// Tear down the renderer and detach its listeners; idempotent
    fn release(&mut self);
}

/// Builds one renderer per loaded track
pub trait RendererFactory: Send {
    /// Create a fresh renderer for the session about to load
    fn create(&mut self, session: SessionId) -> Box<dyn MediaRenderer>;
}

/// Map renderer readiness plus play-when-ready intent to the observable
/// player state
pub fn map_render_state(state: RenderState, play_when_ready: bool) -> PlayerState {
    match state {
        RenderState::Idle => PlayerState::Paused,
        RenderState::Buffering => PlayerState::Buffering,
        RenderState::Ready if play_when_ready => PlayerState::Playing,
        RenderState::Ready => PlayerState::Paused,
        RenderState::Ended => PlayerState::Paused,
    }
}

/// Owns at most one live renderer handle
///
/// Mirrors the last renderer-reported readiness and play-when-ready so the
/// controller can derive [`PlayerState`] without round-tripping into the
/// renderer.
pub struct RendererSession {
    factory: Box<dyn RendererFactory>,
    renderer: Option<Box<dyn MediaRenderer>>,
    session: SessionId,
    next_session: u64,
    render_state: RenderState,
    play_when_ready: bool,
    torn_down: bool,
}

impl RendererSession {
    /// Create a session with no renderer loaded
    pub fn new(factory: Box<dyn RendererFactory>) -> Self {
        Self {
            factory,
            renderer: None,
            session: SessionId(0),
            next_session: 1,
            render_state: RenderState::Idle,
            play_when_ready: false,
            torn_down: false,
        }
    }

    /// Tear down any existing handle, build a fresh renderer and begin
    /// preparing the given URI
    ///
    /// Returns the new session's identity.
    pub fn load(&mut self, uri: &str) -> SessionId {
        self.release(false);

        let session = SessionId(self.next_session);
        self.next_session += 1;
        self.session = session;

        let mut renderer = self.factory.create(session);
        renderer.prepare(uri);
        self.renderer = Some(renderer);
        self.render_state = RenderState::Idle;
        self.play_when_ready = false;

        debug!(session = session.0, uri, "renderer session loaded");
        session
    }

    /// Tear down the handle and detach listeners; idempotent
    ///
    /// With `mark_stopped` the no-handle state reads `Stopped` afterwards;
    /// without it the previous teardown marker is preserved, so a session
    /// that was never loaded still reads `None`.
    pub fn release(&mut self, mark_stopped: bool) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.release();
            debug!(session = self.session.0, "renderer session released");
        }
        if mark_stopped {
            self.torn_down = true;
        }
        self.render_state = RenderState::Idle;
        self.play_when_ready = false;
    }

    /// Whether a renderer handle is currently loaded
    pub fn is_loaded(&self) -> bool {
        self.renderer.is_some()
    }

    /// Whether the given session identity is the live one
    pub fn is_current(&self, session: SessionId) -> bool {
        self.renderer.is_some() && self.session == session
    }

    /// Whether the live renderer would advance when ready
    pub fn play_when_ready(&self) -> bool {
        self.renderer.is_some() && self.play_when_ready
    }

    /// Forward play-when-ready to the live renderer; no-op without a handle
    pub fn set_play_when_ready(&mut self, play: bool) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_play_when_ready(play);
            self.play_when_ready = play;
        }
    }

    /// Forward a volume change to the live renderer; no-op without a handle
    pub fn set_volume(&mut self, volume: f32) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.set_volume(volume);
        }
    }

    /// Forward a seek to the live renderer; no-op without a handle
    pub fn seek_to(&mut self, position_ms: u64) {
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.seek_to(position_ms);
        }
    }

    /// Current stream position, 0 without a handle
    pub fn position(&self) -> u64 {
        self.renderer.as_ref().map_or(0, |r| r.position())
    }

    /// Record a readiness report from the live renderer
    pub fn note_state(&mut self, state: RenderState, play_when_ready: bool) {
        self.render_state = state;
        self.play_when_ready = play_when_ready;
    }

    /// Record that the live renderer played its source to the end
    pub fn note_ended(&mut self) {
        self.render_state = RenderState::Ended;
    }

    /// Observable player state derived from the session
    pub fn player_state(&self) -> PlayerState {
        if self.renderer.is_none() {
            return if self.torn_down {
                PlayerState::Stopped
            } else {
                PlayerState::None
            };
        }
        map_render_state(self.render_state, self.play_when_ready)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Default)]
    struct RendererLog {
        created: usize,
        prepared: Vec<String>,
        released: usize,
    }

    struct TestRenderer {
        log: Arc<Mutex<RendererLog>>,
    }

    impl MediaRenderer for TestRenderer {
        fn prepare(&mut self, uri: &str) {
            self.log.lock().unwrap().prepared.push(uri.to_string());
        }

        fn set_play_when_ready(&mut self, _play: bool) {}

        fn set_volume(&mut self, _volume: f32) {}

        fn seek_to(&mut self, _position_ms: u64) {}

        fn position(&self) -> u64 {
            4200
        }

        fn release(&mut self) {
            self.log.lock().unwrap().released += 1;
        }
    }

    struct TestFactory {
        log: Arc<Mutex<RendererLog>>,
    }

    impl RendererFactory for TestFactory {
        fn create(&mut self, _session: SessionId) -> Box<dyn MediaRenderer> {
            self.log.lock().unwrap().created += 1;
            Box::new(TestRenderer {
                log: Arc::clone(&self.log),
            })
        }
    }

    fn session_with_log() -> (RendererSession, Arc<Mutex<RendererLog>>) {
        let log = Arc::new(Mutex::new(RendererLog::default()));
        let factory = TestFactory {
            log: Arc::clone(&log),
        };
        (RendererSession::new(Box::new(factory)), log)
    }

    #[test]
    fn state_mapping_table() {
        assert_eq!(
            map_render_state(RenderState::Idle, true),
            PlayerState::Paused
        );
        assert_eq!(
            map_render_state(RenderState::Idle, false),
            PlayerState::Paused
        );
        assert_eq!(
            map_render_state(RenderState::Buffering, true),
            PlayerState::Buffering
        );
        assert_eq!(
            map_render_state(RenderState::Buffering, false),
            PlayerState::Buffering
        );
        assert_eq!(
            map_render_state(RenderState::Ready, true),
            PlayerState::Playing
        );
        assert_eq!(
            map_render_state(RenderState::Ready, false),
            PlayerState::Paused
        );
        assert_eq!(
            map_render_state(RenderState::Ended, true),
            PlayerState::Paused
        );
        assert_eq!(
            map_render_state(RenderState::Ended, false),
            PlayerState::Paused
        );
    }

    #[test]
    fn never_loaded_reads_none_explicit_teardown_reads_stopped() {
        let (mut session, _log) = session_with_log();
        assert_eq!(session.player_state(), PlayerState::None);

        // Releasing without a handle must not flip the teardown marker
        session.release(false);
        assert_eq!(session.player_state(), PlayerState::None);

        session.load("http://music.test/a.mp3");
        session.release(true);
        assert_eq!(session.player_state(), PlayerState::Stopped);
    }

    #[test]
    fn load_tears_down_previous_handle() {
        let (mut session, log) = session_with_log();

        let first = session.load("http://music.test/a.mp3");
        let second = session.load("http://music.test/b.mp3");

        assert_ne!(first, second);
        assert!(session.is_current(second));
        assert!(!session.is_current(first));

        let log = log.lock().unwrap();
        assert_eq!(log.created, 2);
        assert_eq!(log.released, 1);
        assert_eq!(
            log.prepared,
            vec!["http://music.test/a.mp3", "http://music.test/b.mp3"]
        );
    }

    #[test]
    fn forwarding_without_handle_never_faults() {
        let (mut session, _log) = session_with_log();

        session.set_play_when_ready(true);
        session.set_volume(1.0);
        session.seek_to(1000);

        assert!(!session.play_when_ready());
        assert_eq!(session.position(), 0);
    }

    #[test]
    fn readiness_reports_drive_player_state() {
        let (mut session, _log) = session_with_log();
        session.load("http://music.test/a.mp3");
        assert_eq!(session.player_state(), PlayerState::Paused);

        session.note_state(RenderState::Buffering, true);
        assert_eq!(session.player_state(), PlayerState::Buffering);

        session.note_state(RenderState::Ready, true);
        assert_eq!(session.player_state(), PlayerState::Playing);

        session.note_state(RenderState::Ready, false);
        assert_eq!(session.player_state(), PlayerState::Paused);

        session.note_state(RenderState::Ready, true);
        session.note_ended();
        assert_eq!(session.player_state(), PlayerState::Paused);
    }
}
