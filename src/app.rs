//! Command entry points.
//!
//! Orchestrates the complete notes-to-audio flow:
//! read notes → parse → synthesize → assemble → write WAV

use crate::audio::wav::write_wav_file;
use crate::config::{Backend, Config};
use crate::dialogue::{self, Utterance};
use crate::error::{InterviewTtsError, Result};
use crate::output::TerminalReporter;
use crate::render::{ProgressReporter, RenderSettings, render};
use crate::tts::{CommandSynthesizer, Synthesizer};
use owo_colors::OwoColorize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI overrides for a single run. `None` keeps the configured value.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub notes: PathBuf,
    pub output: Option<PathBuf>,
    pub pause_ms: Option<u32>,
    pub throttle: Option<Duration>,
    pub model: Option<String>,
    pub backend: Option<Backend>,
    pub dry_run: bool,
    pub quiet: bool,
    pub verbosity: u8,
}

impl GenerateOptions {
    /// Fold CLI overrides into the loaded configuration.
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(pause) = self.pause_ms {
            config.synthesis.pause_ms = pause;
        }
        if let Some(throttle) = self.throttle {
            config.synthesis.throttle_ms = throttle.as_millis() as u64;
        }
        if let Some(model) = &self.model {
            config.elevenlabs.model = model.clone();
        }
        if let Some(backend) = self.backend {
            config.synthesis.backend = backend;
        }
    }
}

/// Default output path: `<notes_dir>/<notes_dir_name>.wav`.
///
/// Falls back to the notes file stem when the directory has no name
/// (e.g. notes in the current directory).
pub fn default_output_path(notes: &Path) -> PathBuf {
    let parent = notes.parent().unwrap_or_else(|| Path::new(""));
    let name = parent
        .file_name()
        .or_else(|| notes.file_stem())
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "interview".to_string());
    parent.join(format!("{name}.wav"))
}

/// Build the synthesizer selected by the configuration.
pub fn create_synthesizer(config: &Config) -> Result<Box<dyn Synthesizer>> {
    match config.synthesis.backend {
        #[cfg(feature = "elevenlabs")]
        Backend::ElevenLabs => Ok(Box::new(crate::tts::ElevenLabsSynthesizer::new(
            &config.elevenlabs,
        )?)),
        #[cfg(not(feature = "elevenlabs"))]
        Backend::ElevenLabs => Err(InterviewTtsError::ConfigInvalidValue {
            key: "synthesis.backend".to_string(),
            message: "this build does not include the elevenlabs backend".to_string(),
        }),
        Backend::Local => {
            config.check_local_voices()?;
            Ok(Box::new(CommandSynthesizer::new(&config.local)))
        }
    }
}

/// Read the notes file.
pub fn read_notes(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InterviewTtsError::NotesNotFound {
                path: path.display().to_string(),
            }
        } else {
            InterviewTtsError::Io(e)
        }
    })
}

/// Print parsed dialogue to stdout, one segment per block.
pub fn print_dialogue(utterances: &[Utterance]) {
    for (i, u) in utterances.iter().enumerate() {
        println!("[{}] {}: {}", i + 1, u.speaker.label().bold(), u.text);
    }
}

/// Run the generate command: notes → WAV.
///
/// Returns the path written, or `None` for a dry run.
pub async fn run_generate_command(mut config: Config, options: GenerateOptions) -> Result<Option<PathBuf>> {
    options.apply_to(&mut config);

    let markdown = read_notes(&options.notes)?;
    let utterances = dialogue::parse(&markdown);
    if utterances.is_empty() {
        return Err(InterviewTtsError::NoDialogue);
    }

    if options.dry_run {
        print_dialogue(&utterances);
        return Ok(None);
    }

    let synthesizer = create_synthesizer(&config)?;
    let settings = RenderSettings::from_config(&config);

    if options.verbosity >= 1 && !options.quiet {
        eprintln!(
            "Backend: {} ({} Hz), interviewer voice: {}, candidate voice: {}",
            synthesizer.name(),
            synthesizer.sample_rate(),
            settings.interviewer_voice,
            settings.candidate_voice
        );
    }

    let output_path = options
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&options.notes));

    let reporter = TerminalReporter::new(options.quiet);
    reporter.found(utterances.len());

    // Ctrl+C abandons the run; nothing partial is written
    let audio = tokio::select! {
        result = render(&utterances, synthesizer.as_ref(), &settings, &reporter) => result?,
        _ = tokio::signal::ctrl_c() => {
            return Err(InterviewTtsError::Other("Interrupted; no audio written.".to_string()));
        }
    };

    write_wav_file(&output_path, &audio)?;

    if !options.quiet {
        if options.verbosity >= 1 {
            eprintln!("Duration: {:.1}s", audio.duration_ms() as f64 / 1000.0);
        }
        eprintln!("{} {}", "Saved:".green(), output_path.display());
    }

    Ok(Some(output_path))
}
