//! Markdown-to-speech text normalization.
//!
//! Strips the formatting that a TTS engine would otherwise read aloud or
//! stumble over. Rules run in a fixed order; each one sees the output of the
//! previous one.

use regex::Regex;
use std::sync::LazyLock;

/// Compile a hardcoded pattern.
#[allow(clippy::expect_used)]
fn pattern(re: &str) -> Regex {
    // SAFETY: only called with literal patterns in this module
    Regex::new(re).expect("hardcoded regex pattern")
}

static TRIPLE_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\*\*\*(.+?)\*\*\*"));
static DOUBLE_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\*\*(.+?)\*\*"));
static SINGLE_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| pattern(r"\*(.+?)\*"));
static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"`([^`]+)`"));
static LINK: LazyLock<Regex> = LazyLock::new(|| pattern(r"\[([^\]]+)\]\([^)]+\)"));
static LIST_MARKER: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?m)^(?:[-*+]|\d+[.)])\s+"));
static UNDERSCORE_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| pattern(r"_(.+?)_"));
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| pattern(r"\s+"));

/// Strip markdown formatting so text sounds natural when read aloud.
///
/// Returns an empty string when nothing speakable remains.
pub fn clean_text(text: &str) -> String {
    let text = TRIPLE_EMPHASIS.replace_all(text, "$1");
    let text = DOUBLE_EMPHASIS.replace_all(&text, "$1");
    let text = SINGLE_EMPHASIS.replace_all(&text, "$1");
    let text = INLINE_CODE.replace_all(&text, "$1");
    let text = LINK.replace_all(&text, "$1");
    let text = LIST_MARKER.replace_all(&text, "");
    let text = UNDERSCORE_EMPHASIS.replace_all(&text, "$1");
    let text = straighten_quotes(&text);
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Replace typographic quotes with their ASCII equivalents.
fn straighten_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            other => other,
        })
        .collect()
}
