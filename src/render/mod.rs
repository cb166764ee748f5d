//! Dialogue rendering: parse → synthesize each utterance → assemble.
//!
//! Synthesis runs one utterance at a time in document order. A failed
//! utterance is reported and skipped; the run only fails when nothing could
//! be synthesized at all.

pub mod outcome;
pub mod reporter;

pub use outcome::{SynthesisOutcome, successful_clips};
pub use reporter::{LogReporter, ProgressReporter, SilentReporter};

use crate::audio::{AudioBuffer, ClipAssembler};
use crate::config::Config;
use crate::dialogue::{self, Speaker, Utterance};
use crate::error::{InterviewTtsError, Result};
use crate::tts::Synthesizer;
use std::time::Duration;

/// Everything a render run needs besides the synthesizer.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    pub interviewer_voice: String,
    pub candidate_voice: String,
    pub pause_ms: u32,
    pub throttle: Duration,
}

impl RenderSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            interviewer_voice: config.voice_for(Speaker::Interviewer).to_string(),
            candidate_voice: config.voice_for(Speaker::Candidate).to_string(),
            pause_ms: config.synthesis.pause_ms,
            throttle: Duration::from_millis(config.synthesis.throttle_ms),
        }
    }

    pub fn voice_for(&self, speaker: Speaker) -> &str {
        match speaker {
            Speaker::Interviewer => &self.interviewer_voice,
            Speaker::Candidate => &self.candidate_voice,
        }
    }
}

/// Synthesize every utterance in order, collecting one outcome each.
///
/// Sleeps for `settings.throttle` after each successful call except the last.
pub async fn synthesize_all(
    utterances: &[Utterance],
    synthesizer: &dyn Synthesizer,
    settings: &RenderSettings,
    reporter: &dyn ProgressReporter,
) -> Vec<SynthesisOutcome> {
    let total = utterances.len();
    let mut outcomes = Vec::with_capacity(total);

    for (i, utterance) in utterances.iter().enumerate() {
        let index = i + 1;
        reporter.segment_started(index, total, utterance);

        let voice = settings.voice_for(utterance.speaker);
        match synthesizer.synthesize(&utterance.text, voice).await {
            Ok(audio) => {
                outcomes.push(SynthesisOutcome::Synthesized { index, audio });
                if index < total && !settings.throttle.is_zero() {
                    tokio::time::sleep(settings.throttle).await;
                }
            }
            Err(e) => {
                reporter.segment_failed(index, &e);
                outcomes.push(SynthesisOutcome::Failed {
                    index,
                    reason: e.to_string(),
                });
            }
        }
    }

    outcomes
}

/// Synthesize and assemble already-parsed utterances.
///
/// # Errors
/// - `NoDialogue` if `utterances` is empty
/// - `NoClips` if every synthesis failed
/// - assembly errors, which are never recovered
pub async fn render(
    utterances: &[Utterance],
    synthesizer: &dyn Synthesizer,
    settings: &RenderSettings,
    reporter: &dyn ProgressReporter,
) -> Result<AudioBuffer> {
    if utterances.is_empty() {
        return Err(InterviewTtsError::NoDialogue);
    }

    let outcomes = synthesize_all(utterances, synthesizer, settings, reporter).await;
    let clips = successful_clips(outcomes);
    if clips.is_empty() {
        return Err(InterviewTtsError::NoClips);
    }

    reporter.combining(clips.len());
    ClipAssembler::new(synthesizer.sample_rate()).assemble(clips, settings.pause_ms)
}

/// Parse markdown notes and render them.
pub async fn render_markdown(
    markdown: &str,
    synthesizer: &dyn Synthesizer,
    settings: &RenderSettings,
    reporter: &dyn ProgressReporter,
) -> Result<AudioBuffer> {
    let utterances = dialogue::parse(markdown);
    if !utterances.is_empty() {
        reporter.found(utterances.len());
    }
    render(&utterances, synthesizer, settings, reporter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::MockSynthesizer;
    use std::sync::Mutex;
    use std::time::Instant;

    const RATE: u32 = 1000;

    fn settings() -> RenderSettings {
        RenderSettings {
            interviewer_voice: "ii".to_string(),
            candidate_voice: "cccc".to_string(),
            pause_ms: 10,
            throttle: Duration::ZERO,
        }
    }

    /// Records events for assertions.
    #[derive(Default)]
    struct RecordingReporter {
        events: Mutex<Vec<String>>,
    }

    impl RecordingReporter {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressReporter for RecordingReporter {
        fn found(&self, count: usize) {
            self.events.lock().unwrap().push(format!("found {count}"));
        }
        fn segment_started(&self, index: usize, total: usize, _utterance: &Utterance) {
            self.events.lock().unwrap().push(format!("start {index}/{total}"));
        }
        fn segment_failed(&self, index: usize, _error: &InterviewTtsError) {
            self.events.lock().unwrap().push(format!("failed {index}"));
        }
        fn combining(&self, clips: usize) {
            self.events.lock().unwrap().push(format!("combining {clips}"));
        }
    }

    fn dialogue() -> Vec<Utterance> {
        vec![
            Utterance::new(Speaker::Interviewer, "abc"),
            Utterance::new(Speaker::Candidate, "de"),
            Utterance::new(Speaker::Interviewer, "f"),
        ]
    }

    #[test]
    fn settings_from_config() {
        let mut config = Config::default();
        config.synthesis.pause_ms = 250;
        config.synthesis.throttle_ms = 0;
        let s = RenderSettings::from_config(&config);
        assert_eq!(s.interviewer_voice, "21m00Tcm4TlvDq8ikWAM");
        assert_eq!(s.candidate_voice, "pNInz6obpgDQGcFmaJgB");
        assert_eq!(s.pause_ms, 250);
        assert!(s.throttle.is_zero());
        assert_eq!(s.voice_for(Speaker::Candidate), "pNInz6obpgDQGcFmaJgB");
    }

    #[tokio::test]
    async fn render_assembles_in_order_with_voices() {
        let synth = MockSynthesizer::new(RATE);
        let out = render(&dialogue(), &synth, &settings(), &SilentReporter)
            .await
            .unwrap();

        // Mock emits one sample per char, valued at the voice id length
        let mut expected = Vec::new();
        for (len, level) in [(3, 2), (2, 4), (1, 2)] {
            expected.extend(std::iter::repeat_n(level as i16, len));
            expected.extend(std::iter::repeat_n(0i16, 10));
        }
        assert_eq!(out.samples(), expected.as_slice());
        assert_eq!(out.sample_rate(), RATE);
    }

    #[tokio::test]
    async fn failed_segment_is_skipped() {
        let synth = MockSynthesizer::new(RATE).with_failure_on("de");
        let reporter = RecordingReporter::default();
        let out = render(&dialogue(), &synth, &settings(), &reporter)
            .await
            .unwrap();

        assert_eq!(out.len(), (3 + 10) + (1 + 10));
        assert_eq!(synth.calls(), 3);
        assert_eq!(
            reporter.events(),
            vec!["start 1/3", "start 2/3", "failed 2", "start 3/3", "combining 2"]
        );
    }

    #[tokio::test]
    async fn all_failures_is_no_clips() {
        let synth = MockSynthesizer::new(RATE).with_failure();
        let result = render(&dialogue(), &synth, &settings(), &SilentReporter).await;
        assert!(matches!(result, Err(InterviewTtsError::NoClips)));
    }

    #[tokio::test]
    async fn empty_dialogue_is_no_dialogue() {
        let synth = MockSynthesizer::new(RATE);
        let result = render(&[], &synth, &settings(), &SilentReporter).await;
        assert!(matches!(result, Err(InterviewTtsError::NoDialogue)));
        assert_eq!(synth.calls(), 0);
    }

    #[tokio::test]
    async fn synthesize_all_keeps_failure_reasons() {
        let synth = MockSynthesizer::new(RATE).with_failure_on("abc");
        let outcomes = synthesize_all(&dialogue(), &synth, &settings(), &SilentReporter).await;
        assert_eq!(outcomes.len(), 3);
        match &outcomes[0] {
            SynthesisOutcome::Failed { index, reason } => {
                assert_eq!(*index, 1);
                assert!(reason.contains("mock synthesis failure"));
            }
            other => panic!("Expected failure, got {:?}", other),
        }
        assert!(outcomes[1].is_success());
        assert_eq!(outcomes[2].index(), 3);
    }

    #[tokio::test]
    async fn throttle_applies_between_calls_only() {
        let synth = MockSynthesizer::new(RATE);
        let s = RenderSettings {
            throttle: Duration::from_millis(25),
            ..settings()
        };
        let start = Instant::now();
        synthesize_all(&dialogue(), &synth, &s, &SilentReporter).await;
        // Two sleeps for three utterances
        assert!(start.elapsed() >= Duration::from_millis(50));
    }

    #[tokio::test]
    async fn render_markdown_parses_and_reports() {
        let md = "# Interview\n\n🎤 **Interviewer:** Hello there.\n\n👨‍💻 **Candidate:** Hi!\n";
        let synth = MockSynthesizer::new(RATE);
        let reporter = RecordingReporter::default();
        let out = render_markdown(md, &synth, &settings(), &reporter)
            .await
            .unwrap();

        assert_eq!(out.len(), "Hello there.".len() + 10 + "Hi!".len() + 10);
        assert_eq!(reporter.events()[0], "found 2");
    }

    #[tokio::test]
    async fn render_markdown_without_dialogue_fails() {
        let synth = MockSynthesizer::new(RATE);
        let result = render_markdown("just prose", &synth, &settings(), &SilentReporter).await;
        assert!(matches!(result, Err(InterviewTtsError::NoDialogue)));
    }
}
