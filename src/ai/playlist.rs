// Playlist shape returned by the generator
//
// The handler relays the provider's object untouched; these types only
// describe the contract and let us log when the model drifts from it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::system_prompt::MAX_TRACKS;

/// One playlist entry as the frontend renders it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub mood: String,
    pub content: String,
    pub reason: String,
    pub comparisons_between_songs: String,
    pub artist_background: String,
    /// Short excerpt, not the full song text
    pub lyrics: String,
    /// Streaming-service URL (unverified)
    pub link: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub tracks: Vec<Track>,
}

/// What a generated object looks like compared to the [`Playlist`] contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conformance {
    Conforms { tracks: usize },
    TooManyTracks { tracks: usize },
    Mismatch,
}

impl Playlist {
    /// Classify a parsed provider object without altering it
    pub fn inspect(value: &Value) -> Conformance {
        match Playlist::deserialize(value) {
            Ok(playlist) if playlist.tracks.len() > MAX_TRACKS => Conformance::TooManyTracks {
                tracks: playlist.tracks.len(),
            },
            Ok(playlist) => Conformance::Conforms {
                tracks: playlist.tracks.len(),
            },
            Err(_) => Conformance::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn track(title: &str) -> Track {
        Track {
            title: title.to_string(),
            artist: "Artist".to_string(),
            link: "https://open.spotify.com/track/1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_track_uses_camel_case_fields() {
        let value = serde_json::to_value(track("Song")).unwrap();
        assert!(value.get("comparisonsBetweenSongs").is_some());
        assert!(value.get("artistBackground").is_some());
        assert!(value.get("artist_background").is_none());
    }

    #[test]
    fn test_inspect_conforming_playlist() {
        let playlist = Playlist {
            tracks: vec![track("a"), track("b")],
        };
        let value = serde_json::to_value(&playlist).unwrap();
        assert_eq!(Playlist::inspect(&value), Conformance::Conforms { tracks: 2 });
    }

    #[test]
    fn test_inspect_too_many_tracks() {
        let playlist = Playlist {
            tracks: (0..7).map(|i| track(&i.to_string())).collect(),
        };
        let value = serde_json::to_value(&playlist).unwrap();
        assert_eq!(
            Playlist::inspect(&value),
            Conformance::TooManyTracks { tracks: 7 }
        );
    }

    #[test]
    fn test_inspect_mismatch() {
        assert_eq!(Playlist::inspect(&json!({ "songs": [] })), Conformance::Mismatch);
        assert_eq!(
            Playlist::inspect(&json!({ "tracks": [{ "title": "only a title" }] })),
            Conformance::Mismatch
        );
    }
}
