// AI module for the upstream chat-completion provider
//
// This module provides:
// - OpenAI-compatible chat-completion client
// - System prompts for the playlist generator and chat assistant
// - The playlist/track shape the generator is asked to produce

pub mod openai_client;
pub mod playlist;
pub mod system_prompt;

// Re-export commonly used types
pub use openai_client::{LlmError, Message, OpenAiClient, ResponseMode};
pub use playlist::{Conformance, Playlist, Track};
pub use system_prompt::{ASSISTANT_PROMPT, MAX_TRACKS, PLAYLIST_PROMPT};
