// System prompts for the LiveMix playlist generator and chat assistant
//
// The playlist prompt pins the exact JSON shape the frontend renders.
// Field names must stay in sync with `crate::ai::playlist::Track`.

/// Upper bound on tracks per playlist, asked of the model (not enforced).
pub const MAX_TRACKS: usize = 5;

pub const PLAYLIST_PROMPT: &str = r#"You are a playlist generator. Given a description of desired music, you return a JSON object with a "tracks" array.

Each track must have these string fields:
- "title": the song title
- "artist": the performing artist
- "genre": the genre of the song
- "mood": the mood of the song
- "content": a short description of what the song is about
- "reason": why the song fits the description
- "comparisonsBetweenSongs": how the song relates to the other songs in the playlist
- "artistBackground": a short background on the artist
- "lyrics": a short excerpt of the lyrics (a few lines), never the full song text
- "link": the Spotify link of the song
- "avatar": an image URL for the song or artist

The "avatar" URL must be publicly reachable from any browser. Do not use images hosted on "i.scdn.co".

Return at most 5 tracks.

Respond with JSON ONLY, no extra text:

{
  "tracks": [
    {
      "title": "...",
      "artist": "...",
      "genre": "...",
      "mood": "...",
      "content": "...",
      "reason": "...",
      "comparisonsBetweenSongs": "...",
      "artistBackground": "...",
      "lyrics": "...",
      "link": "https://open.spotify.com/track/...",
      "avatar": "https://..."
    }
  ]
}
"#;

pub const ASSISTANT_PROMPT: &str = "You are a friendly music assistant embedded in a web app called LiveMix. \
Help the user with music discovery, playlist ideas and questions about the songs you suggested. \
Be concise and conversational.";

/// User turn sent alongside [`PLAYLIST_PROMPT`]
pub fn playlist_request(description: &str) -> String {
    format!("Generate a short playlist description for: \"{}\"", description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playlist_prompt_names_every_track_field() {
        for field in [
            "title",
            "artist",
            "genre",
            "mood",
            "content",
            "reason",
            "comparisonsBetweenSongs",
            "artistBackground",
            "lyrics",
            "link",
            "avatar",
        ] {
            assert!(
                PLAYLIST_PROMPT.contains(&format!("\"{}\"", field)),
                "prompt is missing field {}",
                field
            );
        }
    }

    #[test]
    fn test_playlist_prompt_caps_tracks_and_lyrics() {
        assert!(PLAYLIST_PROMPT.contains(&format!("at most {} tracks", MAX_TRACKS)));
        assert!(PLAYLIST_PROMPT.contains("short excerpt"));
        assert!(PLAYLIST_PROMPT.contains("i.scdn.co"));
    }

    #[test]
    fn test_playlist_request_quotes_description() {
        assert_eq!(
            playlist_request("rainy day jazz"),
            "Generate a short playlist description for: \"rainy day jazz\""
        );
    }
}
