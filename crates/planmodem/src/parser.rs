//! Incremental extraction of plan records from a streamed model reply.
//!
//! The reply is a JSON array of objects, but it arrives in arbitrary
//! fragments and is usually surrounded by prose or a fenced code block. The
//! scanner here keeps the accumulated text in a single buffer and walks it
//! exactly once: a cursor marks the last byte fully processed, and the small
//! [`ScanState`] carries string/escape/nesting context across chunk
//! boundaries so a fragment may end anywhere, even inside a string literal
//! or between the bytes of an escape sequence.
//!
//! Only depth-1 objects are treated as elements. Each time the nesting
//! counter returns to zero on a `}`, the span from the element's `{` is
//! decoded independently; whatever surrounds the array is never parsed at
//! all.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{error::UnparseableStream, plan::ImagePlan};

/// Matches a code-fence opening (with or without a language tag) directly
/// followed by the array start, for replies whose only `[` is fenced.
static FENCED_ARRAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```[A-Za-z]*\s*\[").expect("fence pattern compiles"));

/// Scanner context that survives chunk boundaries.
#[derive(Debug, Clone, Copy, Default)]
struct ScanState {
    /// Inside a string literal; structural characters are inert.
    in_string: bool,
    /// The next character is escaped and consumed blindly.
    escape_next: bool,
    /// Brace/bracket nesting inside the current element. Zero between
    /// elements; an element completes when a `}` returns it to zero.
    depth: u32,
    /// The top-level `[` has been located.
    array_started: bool,
    /// The top-level `]` has been consumed; further input is ignored.
    array_closed: bool,
}

/// Chunk-fed parser that yields each completed plan as soon as its array
/// element is structurally complete.
///
/// One instance serves one streaming session; feed chunks strictly in
/// arrival order. The parser never re-reads consumed input, so chunk size is
/// irrelevant; single characters are fine.
///
/// ```
/// use planmodem::PlanStreamParser;
///
/// let mut parser = PlanStreamParser::new();
/// assert!(parser.add_chunk(r#"[{"index":1,"title":"co"#).is_empty());
/// let plans = parser.add_chunk(r#"ver"}]"#);
/// assert_eq!(plans[0].title.as_deref(), Some("cover"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanStreamParser {
    /// Cumulative reply text; grows monotonically, never shrinks.
    buffer: String,
    /// Byte offset of the first unprocessed character. Everything before it
    /// has been consumed exactly once.
    cursor: usize,
    scan: ScanState,
    /// Byte offset of the current element's opening `{`, if one is open.
    element_start: Option<usize>,
    items: Vec<ImagePlan>,
}

impl PlanStreamParser {
    /// Creates a parser for a fresh streaming session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a fragment of the reply and returns the plans whose elements
    /// were completed by it.
    ///
    /// Returns an empty vector while the array start has not been seen yet,
    /// and always after the top-level `]` has been consumed. A plan carrying
    /// a numeric `index` equal to one already emitted is suppressed.
    pub fn add_chunk(&mut self, chunk: &str) -> Vec<ImagePlan> {
        self.buffer.push_str(chunk);
        if self.scan.array_closed {
            return Vec::new();
        }
        if !self.scan.array_started && !self.locate_array_start() {
            return Vec::new();
        }
        self.scan_available()
    }

    /// All plans completed so far in this session, in emission order.
    #[must_use]
    pub fn items(&self) -> &[ImagePlan] {
        &self.items
    }

    /// Terminal best-effort parse over the entire accumulated buffer.
    ///
    /// Attempts one full JSON decode of the outermost `[...]` span. If that
    /// yields nothing, falls back to the incrementally captured plans, and
    /// fails only when both are empty. Idempotent; does not consume input.
    ///
    /// # Errors
    ///
    /// [`UnparseableStream`] when no array span decodes and nothing was
    /// captured incrementally. The caller decides whether to retry or treat
    /// the raw reply as a single item.
    pub fn try_parse_final(&self) -> Result<Vec<ImagePlan>, UnparseableStream> {
        if let (Some(open), Some(close)) = (self.buffer.find('['), self.buffer.rfind(']')) {
            if open < close {
                match serde_json::from_str::<Vec<Value>>(&self.buffer[open..=close]) {
                    Ok(values) => {
                        let plans: Vec<ImagePlan> =
                            values.iter().filter_map(decode_value).collect();
                        if !plans.is_empty() {
                            return Ok(plans);
                        }
                    }
                    Err(err) => debug!(error = %err, "full parse of array span failed"),
                }
            }
        }
        if self.items.is_empty() {
            Err(UnparseableStream)
        } else {
            Ok(self.items.clone())
        }
    }

    /// Clears all state for reuse in a new session.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Finds the top-level `[`: the first bare one, or failing that one
    /// directly after a code-fence opening. Positions the cursor past it.
    fn locate_array_start(&mut self) -> bool {
        let start = self
            .buffer
            .find('[')
            .or_else(|| FENCED_ARRAY.find(&self.buffer).map(|m| m.end() - 1));
        match start {
            Some(at) => {
                self.scan.array_started = true;
                self.cursor = at + 1;
                true
            }
            None => false,
        }
    }

    /// Walks the unprocessed tail of the buffer, returning plans for every
    /// element completed along the way.
    fn scan_available(&mut self) -> Vec<ImagePlan> {
        let mut fresh = Vec::new();
        let base = self.cursor;
        for (rel, ch) in self.buffer[base..].char_indices() {
            let at = base + rel;
            self.cursor = at + ch.len_utf8();

            if self.scan.escape_next {
                self.scan.escape_next = false;
                continue;
            }
            if self.scan.in_string {
                match ch {
                    '\\' => self.scan.escape_next = true,
                    '"' => self.scan.in_string = false,
                    _ => {}
                }
                continue;
            }
            match ch {
                '"' => self.scan.in_string = true,
                '{' => {
                    if self.element_start.is_none() {
                        self.element_start = Some(at);
                        self.scan.depth = 1;
                    } else {
                        self.scan.depth += 1;
                    }
                }
                '}' => {
                    if let Some(start) = self.element_start {
                        self.scan.depth = self.scan.depth.saturating_sub(1);
                        if self.scan.depth == 0 {
                            // `}` is a single byte, so `at + 1` stays a
                            // character boundary.
                            let span = &self.buffer[start..=at];
                            if let Some(plan) = decode_span(span) {
                                if !already_emitted(&self.items, &plan) {
                                    fresh.push(plan.clone());
                                    self.items.push(plan);
                                }
                            }
                            self.element_start = None;
                        }
                    }
                }
                '[' => {
                    if self.element_start.is_some() {
                        self.scan.depth += 1;
                    }
                }
                ']' => {
                    if self.element_start.is_some() {
                        self.scan.depth = self.scan.depth.saturating_sub(1);
                    } else {
                        self.scan.array_closed = true;
                        break;
                    }
                }
                _ => {}
            }
        }
        fresh
    }
}

/// Decodes a balanced `{...}` span. A failure here means the span was
/// structurally complete but not valid JSON; it is skipped, not surfaced.
fn decode_span(span: &str) -> Option<ImagePlan> {
    match serde_json::from_str::<ImagePlan>(span) {
        Ok(plan) => Some(plan),
        Err(err) => {
            warn!(error = %err, span_len = span.len(), "skipping balanced element that failed to decode");
            None
        }
    }
}

/// Decodes one value of the terminal full parse; non-object elements are
/// dropped the same way malformed spans are.
fn decode_value(value: &Value) -> Option<ImagePlan> {
    match ImagePlan::deserialize(value) {
        Ok(plan) => Some(plan),
        Err(err) => {
            warn!(error = %err, "dropping array element that is not a plan record");
            None
        }
    }
}

/// Duplicate suppression keys on a numeric `index` only; plans without one
/// are always emitted.
fn already_emitted(items: &[ImagePlan], plan: &ImagePlan) -> bool {
    match &plan.index {
        Some(n) => items.iter().any(|item| item.index.as_ref() == Some(n)),
        None => false,
    }
}
