use crate::{InsertionRequest, apply_all};

const DOC: &str = "Alpha.\n\nBeta.\n\nGamma.";

fn req(position: &str, markdown: &str) -> InsertionRequest {
    InsertionRequest::new(position, markdown)
}

#[test]
fn empty_batch_returns_document_unchanged() {
    assert_eq!(apply_all(DOC, &[]), DOC);
}

#[test]
fn interior_insertion_lands_between_paragraphs() {
    let out = apply_all(DOC, &[req("after paragraph 1", "![fig](a.png)")]);
    assert_eq!(out, "Alpha.\n\n\n![fig](a.png)\nBeta.\n\nGamma.");
}

#[test]
fn start_of_document_is_prefixed_with_a_blank_line() {
    let out = apply_all(DOC, &[req("start-of-document", "![cover](c.png)")]);
    assert_eq!(out, format!("![cover](c.png)\n\n{DOC}"));
}

#[test]
fn end_and_unrecognized_hints_append_in_input_order() {
    let out = apply_all(
        DOC,
        &[
            req("end-of-document", "[E1]"),
            req("put it someplace tasteful", "[E2]"),
        ],
    );
    assert_eq!(out, format!("{DOC}\n\n[E1]\n\n[E2]"));
}

#[test]
fn insertion_between_sentences_never_splits_one() {
    let doc = "A. B. C.";
    let out = apply_all(doc, &[req("after sentence 2", "[X]")]);
    assert_eq!(out, "A. B. \n\n[X]\nC.");

    // Strictly between the sentences, whatever the separators.
    let x = out.find("[X]").unwrap();
    assert!(out.find("B.").unwrap() < x);
    assert!(x < out.find("C.").unwrap());
}

#[test]
fn batch_offsets_all_resolve_against_the_original_snapshot() {
    let out = apply_all(
        DOC,
        &[
            req("start-of-document", "[S]"),
            req("after paragraph 2", "[P]"),
            req("end-of-document", "[E]"),
        ],
    );
    assert_eq!(out, "[S]\n\nAlpha.\n\nBeta.\n\n\n[P]\nGamma.\n\n[E]");

    // Removing the inserted substrings reproduces the original document.
    let stripped = out
        .replace("[S]\n\n", "")
        .replace("\n[P]\n", "")
        .replace("\n\n[E]", "");
    assert_eq!(stripped, DOC);
}

#[test]
fn request_order_in_the_input_does_not_affect_placement() {
    let forward = apply_all(
        DOC,
        &[req("after paragraph 1", "[A]"), req("start-of-document", "[B]")],
    );
    let reversed = apply_all(
        DOC,
        &[req("start-of-document", "[B]"), req("after paragraph 1", "[A]")],
    );
    assert_eq!(forward, reversed);
}

#[test]
fn equal_offsets_keep_input_order() {
    let out = apply_all("Hi. Bye.", &[req("after sentence 1", "[A]"), req("after sentence 1", "[B]")]);
    let a = out.find("[A]").unwrap();
    let b = out.find("[B]").unwrap();
    assert!(a < b);
    assert!(out.starts_with("Hi. "));
    assert!(out.ends_with("Bye."));
}

#[test]
fn appends_to_an_empty_document_add_no_leading_separator() {
    let out = apply_all("", &[req("end-of-document", "[A]"), req("after paragraph 3", "[B]")]);
    assert_eq!(out, "[A]\n\n[B]");
}

#[test]
fn existing_content_is_never_lost() {
    let out = apply_all(
        DOC,
        &[
            req("after sentence 1", "[1]"),
            req("after paragraph 1", "[2]"),
            req("end-of-document", "[3]"),
        ],
    );
    for piece in ["Alpha.", "Beta.", "Gamma.", "[1]", "[2]", "[3]"] {
        assert!(out.contains(piece), "missing {piece:?} in {out:?}");
    }
}
