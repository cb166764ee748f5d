//! Concatenates synthesized clips with fixed silence between them.

use crate::audio::buffer::AudioBuffer;
use crate::error::{InterviewTtsError, Result};

/// Joins clips in order, appending a fixed pause of silence after each one
/// (the last clip included).
///
/// The assembler never resamples. Every clip must already be at the
/// assembler's sample rate; a mismatch aborts assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipAssembler {
    sample_rate: u32,
}

impl ClipAssembler {
    pub fn new(sample_rate: u32) -> Self {
        Self { sample_rate }
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of silent samples in a pause of `pause_ms`.
    pub fn pause_samples(&self, pause_ms: u32) -> usize {
        (pause_ms as u64 * self.sample_rate as u64 / 1000) as usize
    }

    /// Assemble clips into one buffer. An empty input yields an empty buffer.
    pub fn assemble(&self, clips: Vec<AudioBuffer>, pause_ms: u32) -> Result<AudioBuffer> {
        if clips.is_empty() {
            return Ok(AudioBuffer::empty(self.sample_rate));
        }

        let pause = self.pause_samples(pause_ms);
        let mut total = 0;
        for clip in &clips {
            if clip.sample_rate() != self.sample_rate {
                return Err(InterviewTtsError::AudioFormatMismatch {
                    expected: format!("{} Hz", self.sample_rate),
                    actual: format!("{} Hz", clip.sample_rate()),
                });
            }
            total += clip.len() + pause;
        }

        let mut samples = Vec::with_capacity(total);
        for clip in clips {
            samples.extend(clip.into_samples());
            samples.resize(samples.len() + pause, 0);
        }

        Ok(AudioBuffer::new(samples, self.sample_rate))
    }
}
