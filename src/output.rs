//! Terminal rendering of run progress.
//!
//! Shows an indicatif progress bar over the synthesis loop when stderr is a
//! terminal. Otherwise (pipes, CI logs) every event goes to [`LogReporter`]
//! as plain status lines.

use crate::dialogue::Utterance;
use crate::error::InterviewTtsError;
use crate::render::reporter::segment_line;
use crate::render::{LogReporter, ProgressReporter};
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::sync::Mutex;

/// Progress reporter for interactive use.
///
/// The bar is cleared when synthesis finishes and again when the reporter is
/// dropped, so an aborted or failed run never leaves it on screen.
pub struct TerminalReporter {
    log: LogReporter,
    interactive: bool,
    bar: Mutex<Option<ProgressBar>>,
}

impl TerminalReporter {
    pub fn new(quiet: bool) -> Self {
        Self::with_interactive(quiet, std::io::stderr().is_terminal())
    }

    fn with_interactive(quiet: bool, interactive: bool) -> Self {
        Self {
            log: LogReporter::new(quiet),
            interactive,
            bar: Mutex::new(None),
        }
    }

    fn bar(&self) -> Option<ProgressBar> {
        self.bar.lock().ok().and_then(|guard| guard.clone())
    }

    /// Remove the progress bar from the terminal, if one is showing.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_and_clear();
        }
    }
}

impl Drop for TerminalReporter {
    fn drop(&mut self) {
        self.clear();
    }
}

fn new_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        // SAFETY: hardcoded template string, always valid
        #[allow(clippy::expect_used)]
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .expect("hardcoded progress bar template")
            .progress_chars("#>-"),
    );
    bar
}

impl ProgressReporter for TerminalReporter {
    fn found(&self, count: usize) {
        if self.log.quiet {
            return;
        }
        if !self.interactive {
            self.log.found(count);
            return;
        }
        eprintln!("Found {} dialogue segments.", count.bold());
        if let Ok(mut guard) = self.bar.lock() {
            *guard = Some(new_bar(count));
        }
    }

    fn segment_started(&self, index: usize, total: usize, utterance: &Utterance) {
        match self.bar() {
            Some(bar) => {
                bar.set_position(index.saturating_sub(1) as u64);
                bar.set_message(utterance.speaker.label());
                bar.println(segment_line(index, total, utterance));
            }
            None => self.log.segment_started(index, total, utterance),
        }
    }

    fn segment_failed(&self, index: usize, error: &InterviewTtsError) {
        match self.bar() {
            Some(bar) => {
                let msg = format!("  Warning: TTS failed for segment {}: {}", index, error);
                bar.println(msg.yellow().to_string());
            }
            None => self.log.segment_failed(index, error),
        }
    }

    fn combining(&self, clips: usize) {
        self.clear();
        self.log.combining(clips);
    }
}
