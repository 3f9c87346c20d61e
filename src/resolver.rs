//! Track resolution
//!
//! The controller consumes the catalog as a plain synchronous lookup keyed
//! by track id. Catalog loading and caching live outside this crate.

use crate::types::TrackInfo;
use std::collections::HashMap;

/// Resolves a logical track id to a playable descriptor
///
/// Pure lookup, no mutation. A missing id means the track cannot be played.
pub trait TrackResolver: Send {
    /// Look up a track by id
    fn resolve(&self, track_id: &str) -> Option<TrackInfo>;
}

/// Id-keyed in-memory resolver
///
/// Backs hosts that load their catalog up front, and test setups.
#[derive(Debug, Default)]
pub struct InMemoryTrackResolver {
    tracks: HashMap<String, TrackInfo>,
}

impl InMemoryTrackResolver {
    /// Create an empty resolver
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a track, keyed by its id
    pub fn insert(&mut self, track: TrackInfo) {
        self.tracks.insert(track.id.clone(), track);
    }

    /// Number of tracks in the catalog
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether the catalog is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl TrackResolver for InMemoryTrackResolver {
    fn resolve(&self, track_id: &str) -> Option<TrackInfo> {
        self.tracks.get(track_id).cloned()
    }
}

impl FromIterator<TrackInfo> for InMemoryTrackResolver {
    fn from_iter<I: IntoIterator<Item = TrackInfo>>(iter: I) -> Self {
        let mut resolver = Self::new();
        for track in iter {
            resolver.insert(track);
        }
        resolver
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> TrackInfo {
        TrackInfo {
            id: id.to_string(),
            source_uri: format!("http://music.test/{id}.mp3"),
            title: format!("Title {id}"),
            artist: "Artist".to_string(),
            album: None,
            duration: None,
        }
    }

    #[test]
    fn resolve_known_and_unknown_ids() {
        let resolver: InMemoryTrackResolver = [track("a"), track("b")].into_iter().collect();

        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve("a").unwrap().id, "a");
        assert!(resolver.resolve("missing").is_none());
    }

    #[test]
    fn insert_replaces_by_id() {
        let mut resolver = InMemoryTrackResolver::new();
        resolver.insert(track("a"));

        let mut updated = track("a");
        updated.title = "Renamed".to_string();
        resolver.insert(updated);

        assert_eq!(resolver.len(), 1);
        assert_eq!(resolver.resolve("a").unwrap().title, "Renamed");
    }
}
