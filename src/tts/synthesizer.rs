use crate::audio::AudioBuffer;
use crate::error::{InterviewTtsError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Trait for text-to-speech synthesis.
///
/// This trait allows swapping implementations (cloud API, local engine, mock).
#[async_trait::async_trait]
pub trait Synthesizer: Send + Sync {
    /// Synthesize `text` with the given voice.
    ///
    /// # Returns
    /// 16-bit mono PCM at [`Synthesizer::sample_rate`], or an error
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer>;

    /// Backend name used in status output
    fn name(&self) -> &str;

    /// Sample rate of every buffer this synthesizer returns
    fn sample_rate(&self) -> u32;
}

/// Implement Synthesizer for Arc<T> so one backend can be shared.
#[async_trait::async_trait]
impl<T: Synthesizer + ?Sized> Synthesizer for Arc<T> {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer> {
        (**self).synthesize(text, voice).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }

    fn sample_rate(&self) -> u32 {
        (**self).sample_rate()
    }
}

/// Mock synthesizer for testing.
///
/// Returns one sample per character of text, each sample set to the length
/// of the voice id, so tests can tell which voice produced which clip.
#[derive(Debug)]
pub struct MockSynthesizer {
    sample_rate: u32,
    fail_on: HashSet<String>,
    fail_all: bool,
    calls: AtomicUsize,
}

impl MockSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            fail_on: HashSet::new(),
            fail_all: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fail whenever asked to synthesize exactly `text`
    pub fn with_failure_on(mut self, text: &str) -> Self {
        self.fail_on.insert(text.to_string());
        self
    }

    /// Fail on every call
    pub fn with_failure(mut self) -> Self {
        self.fail_all = true;
        self
    }

    /// Number of `synthesize` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Synthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, voice: &str) -> Result<AudioBuffer> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_all || self.fail_on.contains(text) {
            return Err(InterviewTtsError::Synthesis {
                message: format!("mock synthesis failure for '{}'", text),
            });
        }
        let level = voice.len().min(i16::MAX as usize) as i16;
        Ok(AudioBuffer::new(
            vec![level; text.chars().count()],
            self.sample_rate,
        ))
    }

    fn name(&self) -> &str {
        "mock"
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
}
