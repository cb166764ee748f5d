//! Types shared by the dialogue parser and the synthesis loop.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two interview roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    Interviewer,
    Candidate,
}

impl Speaker {
    /// Machine-readable name (`"interviewer"` / `"candidate"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Speaker::Interviewer => "interviewer",
            Speaker::Candidate => "candidate",
        }
    }

    /// Capitalized label used in progress output.
    pub fn label(&self) -> &'static str {
        match self {
            Speaker::Interviewer => "Interviewer",
            Speaker::Candidate => "Candidate",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized, speaker-tagged unit of text to synthesize.
///
/// `text` is never empty: the parser drops turns that normalize to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: Speaker,
    pub text: String,
}

impl Utterance {
    pub fn new(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
        }
    }

    /// First `max_chars` characters of the text, with `…` appended when truncated.
    pub fn preview(&self, max_chars: usize) -> String {
        let mut chars = self.text.chars();
        let head: String = chars.by_ref().take(max_chars).collect();
        if chars.next().is_some() {
            format!("{head}…")
        } else {
            head
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speaker_names() {
        assert_eq!(Speaker::Interviewer.as_str(), "interviewer");
        assert_eq!(Speaker::Candidate.as_str(), "candidate");
        assert_eq!(Speaker::Interviewer.label(), "Interviewer");
        assert_eq!(Speaker::Candidate.to_string(), "candidate");
    }

    #[test]
    fn speaker_serializes_lowercase() {
        let json = serde_json::to_string(&Utterance::new(Speaker::Candidate, "Hi!")).unwrap();
        assert_eq!(json, r#"{"speaker":"candidate","text":"Hi!"}"#);
    }

    #[test]
    fn preview_short_text_is_unchanged() {
        let u = Utterance::new(Speaker::Interviewer, "Hello there.");
        assert_eq!(u.preview(60), "Hello there.");
    }

    #[test]
    fn preview_exact_length_has_no_ellipsis() {
        let u = Utterance::new(Speaker::Interviewer, "abcde");
        assert_eq!(u.preview(5), "abcde");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let u = Utterance::new(Speaker::Candidate, "héllo wörld");
        assert_eq!(u.preview(4), "héll…");
    }
}
