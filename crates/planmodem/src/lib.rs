//! Streaming extraction of AI image plans, with markdown re-insertion.
//!
//! A language model asked to plan illustrations for an article replies with a
//! JSON array of "image plan" records, delivered as an incremental token
//! stream and usually wrapped in commentary or a fenced code block. This
//! crate turns that stream into [`ImagePlan`] values the moment each array
//! element becomes structurally complete, and later splices the generated
//! artifacts back into the article at positions the model described only as
//! hints ("after paragraph 3", "end-of-document").
//!
//! Two independent pieces:
//!
//! - [`PlanStreamParser`], a chunk-fed scanner over the accumulated reply.
//!   Feed it fragments as they arrive; it yields each completed plan exactly
//!   once and never re-reads consumed input. When the stream ends (or is
//!   cancelled), [`PlanStreamParser::try_parse_final`] produces the best
//!   available result from the whole buffer.
//! - [`resolve`] / [`apply_all`], pure functions mapping position hints to
//!   safe splice points (paragraph and sentence boundaries) and applying a
//!   batch of insertions back-to-front so earlier offsets stay valid.
//!
//! ```
//! use planmodem::{InsertionRequest, PlanStreamParser, apply_all};
//!
//! let mut parser = PlanStreamParser::new();
//! let mut plans = Vec::new();
//! // In real use the chunks come from a token-streaming transport.
//! for chunk in [r#"Sure! [{"index":1,"position":"#, r#""after paragraph 1","prompt":"a lighthouse"}]"#] {
//!     plans.extend(parser.add_chunk(chunk));
//! }
//! assert_eq!(plans.len(), 1);
//!
//! let article = "First paragraph.\n\nSecond paragraph.";
//! let requests = [InsertionRequest::new(
//!     plans[0].position.clone().unwrap_or_default(),
//!     "![a lighthouse](lighthouse.png)",
//! )];
//! let updated = apply_all(article, &requests);
//! assert!(updated.contains("lighthouse.png"));
//! ```

mod error;
mod insert;
mod parser;
mod plan;
mod position;

#[cfg(test)]
mod tests;

pub use error::UnparseableStream;
pub use insert::{InsertionRequest, apply_all};
pub use parser::PlanStreamParser;
pub use plan::ImagePlan;
pub use position::{PositionDescriptor, resolve};
