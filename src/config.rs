use crate::defaults;
use crate::dialogue::Speaker;
use crate::error::{InterviewTtsError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub voices: VoiceConfig,
    pub synthesis: SynthesisConfig,
    pub elevenlabs: ElevenLabsConfig,
    pub local: LocalConfig,
}

/// Voice id per speaker role
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VoiceConfig {
    pub interviewer: String,
    pub candidate: String,
}

/// Run-level synthesis settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SynthesisConfig {
    pub backend: Backend,
    /// Silence after each clip
    pub pause_ms: u32,
    /// Delay between consecutive synthesis calls
    pub throttle_ms: u64,
}

/// ElevenLabs cloud backend configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ElevenLabsConfig {
    /// Usually supplied through ELEVENLABS_API_KEY rather than the file
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub sample_rate: u32,
}

/// Local TTS program configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocalConfig {
    pub program: String,
    /// Arguments passed to `program`; `{voice}` is replaced by the voice id
    pub args: Vec<String>,
    pub sample_rate: u32,
    /// Voice overrides used instead of `[voices]` with the local backend
    pub interviewer_voice: Option<String>,
    pub candidate_voice: Option<String>,
}

/// Synthesis backend enumeration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    ElevenLabs,
    Local,
}

impl FromStr for Backend {
    type Err = InterviewTtsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elevenlabs" | "cloud" => Ok(Backend::ElevenLabs),
            "local" | "piper" => Ok(Backend::Local),
            other => Err(InterviewTtsError::ConfigInvalidValue {
                key: "synthesis.backend".to_string(),
                message: format!("unknown backend '{other}' (expected elevenlabs or local)"),
            }),
        }
    }
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            interviewer: defaults::INTERVIEWER_VOICE.to_string(),
            candidate: defaults::CANDIDATE_VOICE.to_string(),
        }
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            pause_ms: defaults::PAUSE_MS,
            throttle_ms: defaults::THROTTLE_MS,
        }
    }
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::ELEVENLABS_MODEL.to_string(),
            base_url: defaults::ELEVENLABS_BASE_URL.to_string(),
            sample_rate: defaults::ELEVENLABS_SAMPLE_RATE,
        }
    }
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            program: defaults::LOCAL_PROGRAM.to_string(),
            args: ["--model", "{voice}", "--output_file", "-"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sample_rate: defaults::LOCAL_SAMPLE_RATE,
            interviewer_voice: None,
            candidate_voice: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file is missing or contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                InterviewTtsError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                InterviewTtsError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if the file doesn't exist
    ///
    /// Only a missing file falls back to defaults; invalid TOML is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(InterviewTtsError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - INTERVIEWER_VOICE_ID → voices.interviewer
    /// - CANDIDATE_VOICE_ID → voices.candidate
    /// - ELEVENLABS_API_KEY → elevenlabs.api_key
    /// - INTERVIEW_TTS_BACKEND → synthesis.backend
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(voice) = std::env::var(defaults::INTERVIEWER_VOICE_ENV)
            && !voice.is_empty()
        {
            self.voices.interviewer = voice;
        }

        if let Ok(voice) = std::env::var(defaults::CANDIDATE_VOICE_ENV)
            && !voice.is_empty()
        {
            self.voices.candidate = voice;
        }

        if let Ok(key) = std::env::var(defaults::API_KEY_ENV)
            && !key.is_empty()
        {
            self.elevenlabs.api_key = Some(key);
        }

        if let Ok(backend) = std::env::var(defaults::BACKEND_ENV)
            && !backend.is_empty()
        {
            self.synthesis.backend = backend.parse()?;
        }

        Ok(self)
    }

    /// Voice id for a speaker under the configured backend.
    pub fn voice_for(&self, speaker: Speaker) -> &str {
        let local_override = match (self.synthesis.backend, speaker) {
            (Backend::Local, Speaker::Interviewer) => self.local.interviewer_voice.as_deref(),
            (Backend::Local, Speaker::Candidate) => self.local.candidate_voice.as_deref(),
            (Backend::ElevenLabs, _) => None,
        };
        local_override.unwrap_or(match speaker {
            Speaker::Interviewer => self.voices.interviewer.as_str(),
            Speaker::Candidate => self.voices.candidate.as_str(),
        })
    }

    /// Check that the local backend has its own voice models configured.
    ///
    /// `[voices]` holds ElevenLabs ids, which local engines cannot load, so
    /// `local.interviewer_voice` and `local.candidate_voice` are required.
    pub fn check_local_voices(&self) -> Result<()> {
        let missing = [
            ("local.interviewer_voice", &self.local.interviewer_voice),
            ("local.candidate_voice", &self.local.candidate_voice),
        ]
        .into_iter()
        .find(|(_, voice)| voice.as_deref().is_none_or(|v| v.trim().is_empty()));

        match missing {
            Some((key, _)) => Err(InterviewTtsError::ConfigInvalidValue {
                key: key.to_string(),
                message: format!(
                    "the local backend needs a voice model for each speaker (set {key} in the config file)"
                ),
            }),
            None => Ok(()),
        }
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/interview-tts/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("interview-tts")
            .join("config.toml")
    }
}
