use crate::audio::AudioBuffer;

/// Result of synthesizing one utterance.
///
/// A run collects one outcome per utterance, in order, and drops the
/// failures before assembly.
#[derive(Debug)]
pub enum SynthesisOutcome {
    Synthesized { index: usize, audio: AudioBuffer },
    Failed { index: usize, reason: String },
}

impl SynthesisOutcome {
    /// 1-based position of the utterance in the parsed dialogue.
    pub fn index(&self) -> usize {
        match self {
            SynthesisOutcome::Synthesized { index, .. } | SynthesisOutcome::Failed { index, .. } => {
                *index
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SynthesisOutcome::Synthesized { .. })
    }

    pub fn into_audio(self) -> Option<AudioBuffer> {
        match self {
            SynthesisOutcome::Synthesized { audio, .. } => Some(audio),
            SynthesisOutcome::Failed { .. } => None,
        }
    }
}

/// Keep the successful clips, preserving order.
pub fn successful_clips(outcomes: Vec<SynthesisOutcome>) -> Vec<AudioBuffer> {
    outcomes
        .into_iter()
        .filter_map(SynthesisOutcome::into_audio)
        .collect()
}
