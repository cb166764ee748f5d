//! Local text-to-speech backend that shells out to an engine such as piper.
//!
//! The text is written to the program's stdin and a WAV stream is read back
//! from stdout. `{voice}` in any argument is replaced by the voice id, which
//! for local engines is usually a model path.

use crate::audio::AudioBuffer;
use crate::audio::wav::decode_wav;
use crate::config::LocalConfig;
use crate::error::{InterviewTtsError, Result};
use crate::tts::synthesizer::Synthesizer;
use std::io::Cursor;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

const VOICE_PLACEHOLDER: &str = "{voice}";

#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    program: String,
    args: Vec<String>,
    sample_rate: u32,
}

impl CommandSynthesizer {
    pub fn new(config: &LocalConfig) -> Self {
        Self {
            program: config.program.clone(),
            args: config.args.clone(),
            sample_rate: config.sample_rate,
        }
    }

    fn args_for(&self, voice: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(VOICE_PLACEHOLDER, voice))
            .collect()
    }
}

#[async_trait::async_trait]
impl Synthesizer for CommandSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer> {
        let mut child = Command::new(&self.program)
            .args(self.args_for(voice))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    InterviewTtsError::SynthesisToolNotFound {
                        program: self.program.clone(),
                    }
                } else {
                    InterviewTtsError::Synthesis {
                        message: format!("Failed to execute {}: {}", self.program, e),
                    }
                }
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            // Dropping stdin closes the pipe so the engine sees EOF
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(InterviewTtsError::Synthesis {
                message: format!(
                    "{} failed with status {:?}: {}",
                    self.program,
                    output.status.code(),
                    stderr.trim()
                ),
            });
        }

        let audio = decode_wav(Cursor::new(output.stdout))?;
        if audio.sample_rate() != self.sample_rate {
            return Err(InterviewTtsError::AudioFormatMismatch {
                expected: format!("{} Hz", self.sample_rate),
                actual: format!("{} Hz", audio.sample_rate()),
            });
        }
        Ok(audio)
    }

    fn name(&self) -> &str {
        &self.program
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
