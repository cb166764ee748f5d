//! Error types for interview-tts.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum InterviewTtsError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Input errors
    #[error("Notes file not found: {path}")]
    NotesNotFound { path: String },

    #[error("No dialogue segments found. Check the notes format.")]
    NoDialogue,

    // Synthesis errors
    #[error("{backend} requires an API key (set {env_var})")]
    MissingApiKey {
        backend: String,
        env_var: String,
    },

    #[error("Synthesis failed: {message}")]
    Synthesis { message: String },

    #[error("Local TTS program not found: {program}")]
    SynthesisToolNotFound { program: String },

    #[error("No audio clips generated.")]
    NoClips,

    // Audio assembly errors
    #[error("Audio format mismatch: expected {expected}, got {actual}")]
    AudioFormatMismatch { expected: String, actual: String },

    #[error("Failed to decode audio clip: {message}")]
    AudioDecode { message: String },

    #[error("Failed to write audio file: {message}")]
    AudioWrite { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, InterviewTtsError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_config_file_not_found_display() {
        let error = InterviewTtsError::ConfigFileNotFound {
            path: "/path/to/config.toml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found at /path/to/config.toml"
        );
    }

    #[test]
    fn test_config_invalid_value_display() {
        let error = InterviewTtsError::ConfigInvalidValue {
            key: "synthesis.backend".to_string(),
            message: "unknown backend 'espeak'".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration value for synthesis.backend: unknown backend 'espeak'"
        );
    }

    #[test]
    fn test_notes_not_found_display() {
        let error = InterviewTtsError::NotesNotFound {
            path: "google-docs/notes.md".to_string(),
        };
        assert_eq!(error.to_string(), "Notes file not found: google-docs/notes.md");
    }

    #[test]
    fn test_no_dialogue_display() {
        assert_eq!(
            InterviewTtsError::NoDialogue.to_string(),
            "No dialogue segments found. Check the notes format."
        );
    }

    #[test]
    fn test_missing_api_key_display() {
        let error = InterviewTtsError::MissingApiKey {
            backend: "ElevenLabs".to_string(),
            env_var: "ELEVENLABS_API_KEY".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "ElevenLabs requires an API key (set ELEVENLABS_API_KEY)"
        );
    }

    #[test]
    fn test_synthesis_display() {
        let error = InterviewTtsError::Synthesis {
            message: "status 401".to_string(),
        };
        assert_eq!(error.to_string(), "Synthesis failed: status 401");
    }

    #[test]
    fn test_no_clips_display() {
        assert_eq!(
            InterviewTtsError::NoClips.to_string(),
            "No audio clips generated."
        );
    }

    #[test]
    fn test_audio_format_mismatch_display() {
        let error = InterviewTtsError::AudioFormatMismatch {
            expected: "44100 Hz".to_string(),
            actual: "22050 Hz".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Audio format mismatch: expected 44100 Hz, got 22050 Hz"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error: InterviewTtsError = io_error.into();
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn test_from_toml_error() {
        let toml_error = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let error: InterviewTtsError = toml_error.into();
        assert!(error.to_string().contains("Configuration error"));
    }

    #[test]
    fn test_error_source_chain_io() {
        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error: InterviewTtsError = io_error.into();

        let error_trait: &dyn std::error::Error = &error;
        assert!(error_trait.source().is_some());
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<InterviewTtsError>();
        assert_sync::<InterviewTtsError>();
    }
}
