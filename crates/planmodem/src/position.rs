//! Mapping of position hints onto safe splice points in a document.
//!
//! Hints come from the model and are matched against a small fixed
//! vocabulary; anything else falls back to the end of the document so an
//! insertion is never dropped and never lands inside a word. Paragraphs are
//! delimited by a blank line (two-or-more newlines, tolerating whitespace on
//! the blank line); sentences end at a terminal punctuation mark.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Blank-line paragraph delimiter, whitespace-tolerant.
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("paragraph pattern compiles"));

/// `after paragraph 3` / `after sentence 2`, case-insensitive.
static AFTER_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^after\s+(paragraph|sentence)\s+([0-9]+)$").expect("hint pattern compiles")
});

/// A recognized insertion target, or [`Unrecognized`](Self::Unrecognized)
/// for any hint outside the vocabulary.
///
/// Paragraph and sentence ordinals are 1-based; `0` and out-of-range
/// ordinals resolve to the end of the document, like unrecognized hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionDescriptor {
    /// `start-of-document`.
    DocumentStart,
    /// `end-of-document`.
    DocumentEnd,
    /// `after paragraph N`.
    AfterParagraph(usize),
    /// `after sentence N`.
    AfterSentence(usize),
    /// Anything else; resolves to the end of the document.
    Unrecognized,
}

impl PositionDescriptor {
    /// Classifies a raw hint. Never fails; unknown hints map to
    /// [`Unrecognized`](Self::Unrecognized).
    ///
    /// ```
    /// use planmodem::PositionDescriptor;
    ///
    /// assert_eq!(
    ///     PositionDescriptor::from_hint("after paragraph 3"),
    ///     PositionDescriptor::AfterParagraph(3),
    /// );
    /// assert_eq!(
    ///     PositionDescriptor::from_hint("wherever feels right"),
    ///     PositionDescriptor::Unrecognized,
    /// );
    /// ```
    #[must_use]
    pub fn from_hint(hint: &str) -> Self {
        let hint = hint.trim();
        if hint.eq_ignore_ascii_case("start-of-document") {
            return Self::DocumentStart;
        }
        if hint.eq_ignore_ascii_case("end-of-document") {
            return Self::DocumentEnd;
        }
        if let Some(caps) = AFTER_UNIT.captures(hint) {
            if let Ok(n) = caps[2].parse::<usize>() {
                return if caps[1].eq_ignore_ascii_case("paragraph") {
                    Self::AfterParagraph(n)
                } else {
                    Self::AfterSentence(n)
                };
            }
        }
        Self::Unrecognized
    }
}

/// Resolves a position hint to a byte offset into `document`.
///
/// The offset is always within `0..=document.len()` and on a character
/// boundary, landing between paragraphs or sentences, never inside one.
/// Hints that cannot be honored resolve to `document.len()`.
///
/// Pure; performs no mutation.
#[must_use]
pub fn resolve(document: &str, hint: &str) -> usize {
    match PositionDescriptor::from_hint(hint) {
        PositionDescriptor::DocumentStart => 0,
        PositionDescriptor::DocumentEnd => document.len(),
        PositionDescriptor::AfterParagraph(n) => {
            after_paragraph(document, n).unwrap_or_else(|| {
                debug!(hint, "paragraph ordinal out of range, falling back to end");
                document.len()
            })
        }
        PositionDescriptor::AfterSentence(n) => after_sentence(document, n).unwrap_or_else(|| {
            debug!(hint, "sentence ordinal out of range, falling back to end");
            document.len()
        }),
        PositionDescriptor::Unrecognized => {
            debug!(hint, "unrecognized position hint, falling back to end");
            document.len()
        }
    }
}

/// Offset just past the `n`th paragraph's trailing blank line, i.e. where
/// the next paragraph would begin. The last paragraph's "after" is the end
/// of the document.
fn after_paragraph(document: &str, n: usize) -> Option<usize> {
    if n == 0 || document.is_empty() {
        return None;
    }
    if let Some(delim) = PARAGRAPH_BREAK.find_iter(document).nth(n - 1) {
        return Some(delim.end());
    }
    let paragraphs = PARAGRAPH_BREAK.split(document).count();
    (n <= paragraphs).then_some(document.len())
}

/// Offset just past the `n`th sentence terminator and any whitespace that
/// follows it, so the insertion lands cleanly between sentences.
fn after_sentence(document: &str, n: usize) -> Option<usize> {
    if n == 0 {
        return None;
    }
    let mut seen = 0;
    let mut chars = document.char_indices().peekable();
    while let Some((at, ch)) = chars.next() {
        let next = chars.peek().map(|&(_, c)| c);
        if !is_sentence_end(ch, next) {
            continue;
        }
        seen += 1;
        if seen < n {
            continue;
        }
        let tail_at = at + ch.len_utf8();
        let tail = &document[tail_at..];
        return Some(tail_at + (tail.len() - tail.trim_start().len()));
    }
    None
}

/// Full-width terminators always end a sentence (CJK prose has no space
/// after them); half-width ones only before whitespace or end-of-text, which
/// keeps runs like `e.g.` from counting twice.
fn is_sentence_end(ch: char, next: Option<char>) -> bool {
    match ch {
        '。' | '！' | '？' => true,
        '.' | '!' | '?' => next.is_none_or(char::is_whitespace),
        _ => false,
    }
}
