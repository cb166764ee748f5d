//! Command-line interface for interview-tts
//!
//! Provides argument parsing using clap derive macros.

use crate::config::Backend;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;
use std::time::Duration;

/// Turn interview notes into a two-voice audio file
#[derive(Parser, Debug)]
#[command(
    name = "interview-tts",
    version = env!("INTERVIEW_TTS_VERSION"),
    about = "Turn markdown interview notes into a two-voice audio file"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Markdown notes file with 🎤 Interviewer / 👨‍💻 Candidate lines
    #[arg(value_name = "NOTES")]
    pub notes: Option<PathBuf>,

    /// Output WAV path (default: <notes_dir>/<notes_dir_name>.wav)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Silence after each utterance in milliseconds (default: 600)
    #[arg(long, value_name = "MS")]
    pub pause: Option<u32>,

    /// ElevenLabs model id (default: eleven_turbo_v2_5)
    #[arg(long, value_name = "MODEL")]
    pub model: Option<String>,

    /// Synthesis backend (elevenlabs, local)
    #[arg(long, value_name = "BACKEND", value_parser = parse_backend)]
    pub backend: Option<Backend>,

    /// Delay after each successful synthesis call (default: 300ms). Examples: 0, 500ms, 1s
    #[arg(long, value_name = "DURATION", value_parser = parse_throttle)]
    pub throttle: Option<Duration>,

    /// Print the parsed dialogue and exit without synthesizing
    #[arg(long)]
    pub dry_run: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output (warnings are still shown)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: backend and duration details)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse a throttle duration.
///
/// Bare numbers are milliseconds; anything else goes through `humantime`
/// (`300ms`, `1s`, `1s500ms`).
fn parse_throttle(s: &str) -> Result<Duration, String> {
    let s = s.trim();
    // Bare number → milliseconds
    if let Ok(ms) = s.parse::<u64>() {
        return Ok(Duration::from_millis(ms));
    }
    humantime::parse_duration(s).map_err(|e| e.to_string())
}

fn parse_backend(s: &str) -> Result<Backend, String> {
    s.parse::<Backend>().map_err(|e| e.to_string())
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}
