//! Demonstrates reacting to image plans **while** the planning reply is
//! still streaming, then splicing the finished images back into the
//! article.
//!
//! The reply below is delivered in small, irregular chunks to mirror how
//! chat-completion APIs hand out partial tokens. Each plan is printed the
//! moment its array element completes, long before the stream ends, which
//! is when a real caller would kick off image generation for it.
//!
//! Run with
//!
//! ```bash
//! RUST_LOG=debug cargo run -p planmodem --example stream_plans
//! ```

use planmodem::{InsertionRequest, PlanStreamParser, apply_all};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // A toy planning reply. In real life this would come from the network.
    let simulated_stream: [&str; 9] = [
        // 0 – commentary before any JSON
        "Here is a plan with three illustrations.\n\n",
        // 1 – fence and array start
        "```json\n[\n  {\"index\": 1, \"type\": \"cover\", ",
        // 2 – first element continues
        "\"position\": \"start-of-document\", ",
        // 3 – first element closes mid-chunk, second begins
        "\"prompt\": \"a lighthouse at dusk\"},\n  {\"index\": 2, ",
        // 4 – chunk ends inside a string literal
        "\"position\": \"after sent",
        // 5 – string closes, element closes
        "ence 2\", \"prompt\": \"a desk by a window\"},\n",
        // 6 – third element
        "  {\"index\": 3, \"position\": \"end-of-document\", ",
        // 7 – close element and array
        "\"prompt\": \"a sunset checklist\"}\n]\n",
        // 8 – trailing commentary, ignored
        "```\nHope this helps!",
    ];

    let article = "The lighthouse keeper kept a diary. Every entry began the same way.\n\n\
        Storms came and went. The lamp never did.";

    let mut parser = PlanStreamParser::new();
    for (i, chunk) in simulated_stream.iter().enumerate() {
        for plan in parser.add_chunk(chunk) {
            println!(
                "chunk {i}: plan {} ready, prompt: {}",
                plan.index.as_ref().map_or_else(|| "?".into(), ToString::to_string),
                plan.prompt.as_deref().unwrap_or("(none)"),
            );
        }
    }

    let plans = match parser.try_parse_final() {
        Ok(plans) => plans,
        Err(err) => {
            eprintln!("could not interpret the reply: {err}");
            return;
        }
    };

    // Pretend each prompt was rendered to a file, then splice the references
    // into the article at the hinted positions.
    let requests: Vec<InsertionRequest> = plans
        .iter()
        .enumerate()
        .map(|(i, plan)| {
            InsertionRequest::new(
                plan.position.clone().unwrap_or_default(),
                format!("![illustration {n}](images/{n}.png)", n = i + 1),
            )
        })
        .collect();

    println!("\n--- updated article ---\n{}", apply_all(article, &requests));
}
