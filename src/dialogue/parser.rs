//! Interview-notes dialogue parser.
//!
//! Turns markdown notes written in the `🎤 **Interviewer:**` /
//! `👨‍💻 **Candidate:**` format into an ordered list of utterances. Code
//! blocks, tables, callouts, horizontal rules and headings are skipped.
//!
//! Parsing never fails: lines that match no rule are dropped. Fence toggling
//! counts fence lines only, so a document with an odd number of ```` ``` ````
//! lines stays inside a code block until the end.

use crate::dialogue::clean::clean_text;
use crate::dialogue::types::{Speaker, Utterance};
use regex::Regex;
use std::sync::LazyLock;

const INTERVIEWER_GLYPH: char = '🎤';
const CANDIDATE_GLYPHS: [char; 2] = ['👨', '🧑'];

/// Line terminators. `\r\n` counts as one break.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\u{0b}', '\u{0c}', '\u{1c}', '\u{1d}', '\u{1e}', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Characters after which a joined fragment needs no synthesized sentence break.
const TERMINAL_PUNCTUATION: [char; 5] = ['.', '!', '?', ':', ','];

#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    // SAFETY: only called with literal patterns in this module
    Regex::new(re).expect("hardcoded regex pattern")
}

static HORIZONTAL_RULE: LazyLock<Regex> = LazyLock::new(|| pattern(r"^-{3,}$"));
static INTERVIEWER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r".*🎤\s*\*\*Interviewer[^:]*:\*\*\s*"));
// The glyph may carry a ZWJ sequence (👨‍💻), hence `[^\s*]*`.
static CANDIDATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| pattern(r".*(?:👨|🧑)[^\s*]*\s*\*\*[^:]+:\*\*\s*"));
static BULLET: LazyLock<Regex> = LazyLock::new(|| pattern(r"^(?:[-*+]|\d+[.)])\s+"));

/// Line classification result.
#[derive(Debug, PartialEq)]
enum LineKind<'a> {
    Fence,
    Skip,
    Heading,
    Marker { speaker: Speaker, rest: String },
    Content(&'a str),
}

/// Parse interview notes into utterances, in document order.
pub fn parse(markdown: &str) -> Vec<Utterance> {
    let mut state = ParseState::default();
    for line in split_lines(markdown) {
        state.feed(line);
    }
    state.finish()
}

/// Split text into lines on every Unicode line terminator, not just `\n`.
///
/// Lone `\r` (old Mac exports) and U+2028 separate lines too. A trailing
/// terminator does not produce an empty final line.
fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        if !LINE_BREAKS.contains(&c) {
            continue;
        }
        lines.push(&text[start..i]);
        start = i + c.len_utf8();
        if c == '\r'
            && let Some(&(_, '\n')) = chars.peek()
        {
            chars.next();
            start += 1;
        }
    }
    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// Transient parser state for a single `parse` call.
#[derive(Debug, Default)]
struct ParseState {
    speaker: Option<Speaker>,
    fragments: Vec<String>,
    in_code_block: bool,
    utterances: Vec<Utterance>,
}

impl ParseState {
    fn feed(&mut self, line: &str) {
        match classify(line) {
            LineKind::Fence => self.in_code_block = !self.in_code_block,
            _ if self.in_code_block => {}
            LineKind::Skip => {}
            LineKind::Heading => self.flush(),
            LineKind::Marker { speaker, rest } => {
                self.flush();
                self.speaker = Some(speaker);
                if !rest.is_empty() {
                    self.fragments.push(rest);
                }
            }
            LineKind::Content(text) => {
                if self.speaker.is_some() {
                    let text = strip_bullet(text.trim());
                    if !text.is_empty() {
                        self.fragments.push(text.to_string());
                    }
                }
            }
        }
    }

    /// Emit the in-progress utterance (if any) and reset to no active speaker.
    fn flush(&mut self) {
        let speaker = self.speaker.take();
        let fragments = std::mem::take(&mut self.fragments);
        let Some(speaker) = speaker else {
            return;
        };
        if fragments.is_empty() {
            return;
        }
        let text = clean_text(&join_fragments(&fragments));
        if !text.is_empty() {
            self.utterances.push(Utterance::new(speaker, text));
        }
    }

    fn finish(mut self) -> Vec<Utterance> {
        self.flush();
        self.utterances
    }
}

fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.starts_with("```") {
        return LineKind::Fence;
    }
    if line.starts_with('>') || trimmed.starts_with('|') || HORIZONTAL_RULE.is_match(trimmed) {
        return LineKind::Skip;
    }
    if line.starts_with('#') {
        return LineKind::Heading;
    }
    if line.contains(INTERVIEWER_GLYPH) && line.contains("Interviewer") {
        return LineKind::Marker {
            speaker: Speaker::Interviewer,
            rest: INTERVIEWER_PREFIX.replace_all(line, "").trim().to_string(),
        };
    }
    if line.contains(CANDIDATE_GLYPHS) && (line.contains("Candidate") || line.contains("Staff Engineer")) {
        return LineKind::Marker {
            speaker: Speaker::Candidate,
            rest: CANDIDATE_PREFIX.replace_all(line, "").trim().to_string(),
        };
    }
    LineKind::Content(line)
}

/// Remove a single leading list marker (`-`, `*`, `+`, `1.`, `1)`) and trim.
fn strip_bullet(line: &str) -> &str {
    match BULLET.find(line) {
        Some(m) => line[m.end()..].trim(),
        None => line,
    }
}

/// Join fragments, inserting `". "` where the previous fragment has no
/// terminal punctuation so separate list items don't run together.
fn join_fragments(fragments: &[String]) -> String {
    let mut joined = String::new();
    for (i, fragment) in fragments.iter().enumerate() {
        if i > 0 {
            if joined.ends_with(TERMINAL_PUNCTUATION) {
                joined.push(' ');
            } else {
                joined.push_str(". ");
            }
        }
        joined.push_str(fragment);
    }
    joined
}
