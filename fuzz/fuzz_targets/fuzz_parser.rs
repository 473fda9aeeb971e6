#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use planmodem::PlanStreamParser;

/// Arbitrary reply text plus an arbitrary partition of it into chunks.
#[derive(Debug, Arbitrary)]
struct Stream {
    text: String,
    splits: Vec<usize>,
}

fuzz_target!(|stream: Stream| {
    let mut parser = PlanStreamParser::new();
    let chars: Vec<char> = stream.text.chars().collect();
    let mut idx = 0;
    let mut remaining = chars.len();
    for &s in &stream.splits {
        if remaining == 0 {
            break;
        }
        let size = 1 + (s % remaining);
        let chunk: String = chars[idx..idx + size].iter().collect();
        let _ = parser.add_chunk(&chunk);
        idx += size;
        remaining -= size;
    }
    let tail: String = chars[idx..].iter().collect();
    let _ = parser.add_chunk(&tail);

    // The terminal parse must never panic and must be idempotent.
    assert_eq!(parser.try_parse_final(), parser.try_parse_final());
});
