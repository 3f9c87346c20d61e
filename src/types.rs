//! Core types for playback control

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Audio focus grant level
///
/// The sole source of truth for volume policy. Transitions only via the
/// focus arbiter: synchronously from a request/release, asynchronously
/// from host grant-change events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FocusGrant {
    /// No focus held; playback must not be audible
    None,

    /// Playback allowed at reduced volume
    Ducked,

    /// Playback allowed at normal volume
    Full,
}

/// Observable playback state
///
/// Derived from renderer readiness plus play-when-ready intent; the
/// controller only forces `Stopped`/`None` on teardown and `Error` on a
/// renderer fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Nothing was ever loaded
    None,

    /// Playback explicitly stopped, resources released
    Stopped,

    /// Loaded but not advancing
    Paused,

    /// Preparing or rebuffering the current source
    Buffering,

    /// Audibly playing
    Playing,

    /// The renderer faulted; cleared by the next play or stop
    Error,
}

/// Playable track descriptor returned by the resolver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Unique track identifier from the catalog
    pub id: String,

    /// Streaming source URI
    pub source_uri: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track duration, if the catalog knows it
    pub duration: Option<Duration>,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Volume applied while focus is ducked (default: 0.2)
    pub duck_volume: f32,

    /// Volume applied while focus is fully held (default: 1.0)
    pub normal_volume: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            duck_volume: 0.2,
            normal_volume: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlaybackConfig::default();
        assert!((config.duck_volume - 0.2).abs() < f32::EPSILON);
        assert!((config.normal_volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn track_info_creation() {
        let track = TrackInfo {
            id: "track1".to_string(),
            source_uri: "http://example.com/1.mp3".to_string(),
            title: "Test Song".to_string(),
            artist: "Test Artist".to_string(),
            album: Some("Test Album".to_string()),
            duration: Some(Duration::from_secs(180)),
        };

        assert_eq!(track.id, "track1");
        assert_eq!(track.source_uri, "http://example.com/1.mp3");
    }
}
