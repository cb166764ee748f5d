//! interview-tts - Turn markdown interview notes into two-voice audio
//!
//! Parses interview transcripts, synthesizes each utterance with the
//! speaker's voice and joins the clips with silence into one WAV file.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod dialogue;
pub mod error;
#[cfg(feature = "cli")]
pub mod output;
pub mod render;
pub mod tts;

// Composition root
#[cfg(feature = "cli")]
pub mod app;

// Dialogue model
pub use dialogue::{Speaker, Utterance, clean_text, parse};

// Audio
pub use audio::{AudioBuffer, ClipAssembler};

// Synthesis seam
#[cfg(feature = "elevenlabs")]
pub use tts::ElevenLabsSynthesizer;
pub use tts::{CommandSynthesizer, MockSynthesizer, Synthesizer};

// Rendering
pub use render::{
    LogReporter, ProgressReporter, RenderSettings, SilentReporter, render, render_markdown,
};

// Error handling
pub use error::{InterviewTtsError, Result};

// Config
pub use config::{Backend, Config};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_string_starts_with_cargo_version() {
        let ver = version_string();
        assert!(
            ver.starts_with(env!("CARGO_PKG_VERSION")),
            "version_string should start with CARGO_PKG_VERSION, got: {}",
            ver
        );
    }

    #[test]
    fn version_string_matches_build_script() {
        assert_eq!(version_string(), env!("INTERVIEW_TTS_VERSION"));
    }

    #[test]
    fn version_string_contains_hash_when_present() {
        let ver = version_string();
        if option_env!("GIT_HASH").is_some_and(|h| !h.is_empty()) {
            let hash_part = ver.split('+').nth(1).unwrap_or("");
            assert_eq!(hash_part.len(), 7, "Git hash should be 7 chars, got: {}", hash_part);
        } else {
            assert_eq!(ver, env!("CARGO_PKG_VERSION"));
        }
    }
}
