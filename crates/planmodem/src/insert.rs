//! Splicing generated markdown back into a document.
//!
//! A whole batch is resolved against one snapshot of the document, then
//! applied back-to-front by descending offset. Each splice only touches text
//! at or after its own offset, so every offset computed from the snapshot
//! stays valid until its turn comes. End-of-document appends have no fixed
//! numeric offset once other content is spliced in, so they are grouped and
//! applied last, in their input order.

use crate::position::resolve;

/// Markdown content bound for a position hint in the target document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionRequest {
    /// Raw position hint, resolved by [`resolve`](crate::resolve) at apply
    /// time.
    pub position: String,
    /// Markdown to splice in, typically an image reference.
    pub markdown: String,
}

impl InsertionRequest {
    /// Pairs a position hint with the markdown to insert there.
    pub fn new(position: impl Into<String>, markdown: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            markdown: markdown.into(),
        }
    }
}

/// Applies a batch of insertions to `document`, returning the new document.
///
/// Existing content is never removed or reordered; each request's markdown
/// is joined in with a blank line toward the preceding paragraph and a
/// single newline toward an adjoining mid-paragraph remainder. Requests
/// resolving to the same offset keep their input order. An empty batch
/// returns the document unchanged.
///
/// ```
/// use planmodem::{InsertionRequest, apply_all};
///
/// let doc = "Intro.\n\nBody.";
/// let out = apply_all(doc, &[InsertionRequest::new("after paragraph 1", "![fig](a.png)")]);
/// assert_eq!(out, "Intro.\n\n\n![fig](a.png)\nBody.");
/// ```
#[must_use]
pub fn apply_all(document: &str, requests: &[InsertionRequest]) -> String {
    if requests.is_empty() {
        return document.to_owned();
    }

    // All offsets come from the same snapshot.
    let mut interior: Vec<(usize, usize, &str)> = Vec::new();
    let mut appends: Vec<&str> = Vec::new();
    for (input_order, request) in requests.iter().enumerate() {
        let offset = clamp_to_boundary(document, resolve(document, &request.position));
        if offset >= document.len() {
            appends.push(&request.markdown);
        } else {
            interior.push((offset, input_order, &request.markdown));
        }
    }

    // Back-to-front. Within a tie the later request is spliced first, which
    // leaves the earlier one ahead of it in the output.
    interior.sort_by(|a, b| b.0.cmp(&a.0).then(b.1.cmp(&a.1)));

    let mut result = document.to_owned();
    for (offset, _, markdown) in interior {
        if offset == 0 {
            result = format!("{markdown}\n\n{result}");
        } else {
            let (before, after) = result.split_at(offset);
            let prefix = if before.ends_with('\n') { "\n" } else { "\n\n" };
            let suffix = if after.starts_with('\n') { "" } else { "\n" };
            result = format!("{before}{prefix}{markdown}{suffix}{after}");
        }
    }
    for markdown in appends {
        if !result.is_empty() {
            result.push_str("\n\n");
        }
        result.push_str(markdown);
    }
    result
}

/// Defensive clamp: the resolver already stays in bounds and on character
/// boundaries, but a stray offset is pulled to the nearest valid one instead
/// of panicking the splice.
fn clamp_to_boundary(document: &str, offset: usize) -> usize {
    let mut offset = offset.min(document.len());
    while offset > 0 && !document.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
