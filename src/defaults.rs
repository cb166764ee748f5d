//! Default configuration constants for interview-tts.
//!
//! Shared between the config layer, the CLI and the synthesis backends so
//! every entry point agrees on the same values.

/// Default ElevenLabs voice for the interviewer ("Rachel", professional female).
///
/// Browse voices at <https://elevenlabs.io/voice-library>.
pub const INTERVIEWER_VOICE: &str = "21m00Tcm4TlvDq8ikWAM";

/// Default ElevenLabs voice for the candidate ("Adam", professional male).
pub const CANDIDATE_VOICE: &str = "pNInz6obpgDQGcFmaJgB";

/// Default silence appended after every clip, in milliseconds.
pub const PAUSE_MS: u32 = 600;

/// Default delay between consecutive synthesis calls, in milliseconds.
///
/// Keeps a run inside the cloud API's rate limits.
pub const THROTTLE_MS: u64 = 300;

/// Default ElevenLabs model id.
pub const ELEVENLABS_MODEL: &str = "eleven_turbo_v2_5";

/// Default ElevenLabs API base URL.
pub const ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io";

/// Sample rate requested from ElevenLabs (`output_format=pcm_24000`).
///
/// `pcm_44100` is limited to higher API tiers; 24 kHz is served on every plan.
pub const ELEVENLABS_SAMPLE_RATE: u32 = 24000;

/// Default local TTS program. Piper writes a WAV file to stdout with `--output_file -`.
pub const LOCAL_PROGRAM: &str = "piper";

/// Sample rate of the default piper voices.
pub const LOCAL_SAMPLE_RATE: u32 = 22050;

/// Number of characters shown in per-segment progress previews.
pub const PREVIEW_CHARS: usize = 60;

/// Environment variable holding the ElevenLabs API key.
pub const API_KEY_ENV: &str = "ELEVENLABS_API_KEY";

/// Environment variable overriding the interviewer voice.
pub const INTERVIEWER_VOICE_ENV: &str = "INTERVIEWER_VOICE_ID";

/// Environment variable overriding the candidate voice.
pub const CANDIDATE_VOICE_ENV: &str = "CANDIDATE_VOICE_ID";

/// Environment variable selecting the synthesis backend.
pub const BACKEND_ENV: &str = "INTERVIEW_TTS_BACKEND";
