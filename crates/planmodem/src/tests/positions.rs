use rstest::rstest;

use crate::{PositionDescriptor, resolve};

const DOC: &str = "One.\n\nTwo two.\n\nThree three three.";

#[rstest]
#[case("start-of-document", PositionDescriptor::DocumentStart)]
#[case("END-OF-DOCUMENT", PositionDescriptor::DocumentEnd)]
#[case("  end-of-document  ", PositionDescriptor::DocumentEnd)]
#[case("after paragraph 3", PositionDescriptor::AfterParagraph(3))]
#[case("After  Sentence 12", PositionDescriptor::AfterSentence(12))]
#[case("wherever looks good", PositionDescriptor::Unrecognized)]
#[case("after paragraph", PositionDescriptor::Unrecognized)]
#[case("after paragraph three", PositionDescriptor::Unrecognized)]
#[case("after chapter 2", PositionDescriptor::Unrecognized)]
#[case("after paragraph 99999999999999999999", PositionDescriptor::Unrecognized)]
fn hint_classification(#[case] hint: &str, #[case] expected: PositionDescriptor) {
    assert_eq!(PositionDescriptor::from_hint(hint), expected);
}

#[test]
fn document_bounds() {
    assert_eq!(resolve(DOC, "start-of-document"), 0);
    assert_eq!(resolve(DOC, "end-of-document"), DOC.len());
    assert_eq!(resolve("", "end-of-document"), 0);
}

#[rstest]
#[case("after paragraph 0")]
#[case("after paragraph 9")]
#[case("after sentence 0")]
#[case("after sentence 42")]
#[case("right before the good part")]
fn out_of_range_and_unknown_fall_back_to_end(#[case] hint: &str) {
    assert_eq!(resolve(DOC, hint), resolve(DOC, "end-of-document"));
}

#[test]
fn after_paragraph_lands_where_the_next_one_begins() {
    assert_eq!(resolve(DOC, "after paragraph 1"), 6);
    assert_eq!(&DOC[6..9], "Two");
    assert_eq!(resolve(DOC, "after paragraph 2"), 16);
    assert_eq!(&DOC[16..21], "Three");
}

#[test]
fn last_paragraph_resolves_to_document_end() {
    assert_eq!(resolve(DOC, "after paragraph 3"), DOC.len());
}

#[test]
fn blank_line_with_whitespace_still_delimits() {
    let doc = "alpha\n \t \nbeta";
    assert_eq!(resolve(doc, "after paragraph 1"), 10);
    assert_eq!(&doc[10..], "beta");
}

#[test]
fn consecutive_newlines_form_one_delimiter() {
    let doc = "alpha\n\n\n\nbeta";
    assert_eq!(resolve(doc, "after paragraph 1"), 9);
    assert_eq!(&doc[9..], "beta");
}

#[test]
fn after_sentence_skips_trailing_whitespace() {
    let doc = "A. B. C.";
    assert_eq!(resolve(doc, "after sentence 1"), 3);
    assert_eq!(resolve(doc, "after sentence 2"), 6);
    assert_eq!(resolve(doc, "after sentence 3"), doc.len());
}

#[test]
fn after_sentence_crosses_newlines() {
    let doc = "One.\nTwo.";
    assert_eq!(resolve(doc, "after sentence 1"), 5);
    assert_eq!(&doc[5..], "Two.");
}

#[test]
fn abbreviation_periods_do_not_terminate() {
    // "e.g." only counts once: a period glued to more text is not terminal.
    let doc = "e.g. a demo. Done.";
    assert_eq!(resolve(doc, "after sentence 1"), 5);
    assert_eq!(resolve(doc, "after sentence 2"), 13);
}

#[test]
fn full_width_terminators_need_no_following_space() {
    let doc = "灯塔很高。海风很大。";
    let first = resolve(doc, "after sentence 1");
    assert_eq!(&doc[first..], "海风很大。");
    assert_eq!(resolve(doc, "after sentence 2"), doc.len());
}

#[test]
fn resolver_offsets_are_char_boundaries() {
    let doc = "Früh.\n\nSpät.";
    for hint in [
        "start-of-document",
        "end-of-document",
        "after paragraph 1",
        "after sentence 1",
    ] {
        assert!(doc.is_char_boundary(resolve(doc, hint)));
    }
}
