//! Progress reporting for a render run.

use crate::defaults::PREVIEW_CHARS;
use crate::dialogue::Utterance;
use crate::error::InterviewTtsError;

/// Receives progress events from [`render`](crate::render::render).
///
/// Indices are 1-based, matching what users see in status lines.
pub trait ProgressReporter: Send + Sync {
    /// The notes were parsed into `count` segments.
    fn found(&self, count: usize);

    /// Synthesis of segment `index` of `total` is starting.
    fn segment_started(&self, index: usize, total: usize, utterance: &Utterance);

    /// Segment `index` could not be synthesized and will be skipped.
    fn segment_failed(&self, index: usize, error: &InterviewTtsError);

    /// Synthesis finished; `clips` buffers are about to be assembled.
    fn combining(&self, clips: usize);
}

/// Format the per-segment status line, e.g. `[2/9] Candidate: Sure, I'd start…`.
pub fn segment_line(index: usize, total: usize, utterance: &Utterance) -> String {
    format!(
        "[{}/{}] {}: {}",
        index,
        total,
        utterance.speaker.label(),
        utterance.preview(PREVIEW_CHARS)
    )
}

/// Plain reporter that logs to stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter {
    pub quiet: bool,
}

impl LogReporter {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }
}

impl ProgressReporter for LogReporter {
    fn found(&self, count: usize) {
        if !self.quiet {
            eprintln!("Found {} dialogue segments.", count);
        }
    }

    fn segment_started(&self, index: usize, total: usize, utterance: &Utterance) {
        if !self.quiet {
            eprintln!("{}", segment_line(index, total, utterance));
        }
    }

    fn segment_failed(&self, index: usize, error: &InterviewTtsError) {
        // Warnings are shown even in quiet mode
        eprintln!("  Warning: TTS failed for segment {}: {}", index, error);
    }

    fn combining(&self, clips: usize) {
        if !self.quiet {
            eprintln!("\nCombining {} clips…", clips);
        }
    }
}

/// Reporter that discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn found(&self, _count: usize) {}
    fn segment_started(&self, _index: usize, _total: usize, _utterance: &Utterance) {}
    fn segment_failed(&self, _index: usize, _error: &InterviewTtsError) {}
    fn combining(&self, _clips: usize) {}
}
