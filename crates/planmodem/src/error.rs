use thiserror::Error;

/// No plan array could be recognized anywhere in the accumulated stream.
///
/// Returned by [`try_parse_final`](crate::PlanStreamParser::try_parse_final)
/// when the full parse found nothing and no element was captured
/// incrementally. Expected under uncooperative model output; callers retry
/// or fall back to treating the whole reply as one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no image plan array could be recognized in the model output")]
pub struct UnparseableStream;
