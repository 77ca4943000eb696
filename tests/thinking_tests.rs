use promptkit::message::{joined_text, split_content_with_tags};
use promptkit::{split_content_into_text_and_thinking, ContentPart};

#[test]
fn plain_text_is_a_single_part() {
    let parts = split_content_into_text_and_thinking("just an answer, no markers");
    assert_eq!(parts, vec![ContentPart::text("just an answer, no markers")]);
    assert!(split_content_into_text_and_thinking("").is_empty());
}

#[test]
fn thinking_between_text() {
    let parts = split_content_into_text_and_thinking("A<think>B</think>C");
    assert_eq!(
        parts,
        vec![
            ContentPart::text("A"),
            ContentPart::thinking("B"),
            ContentPart::text("C"),
        ]
    );
}

#[test]
fn empty_surrounding_text_is_omitted() {
    let parts = split_content_into_text_and_thinking("<think>only</think>");
    assert_eq!(parts, vec![ContentPart::thinking("only")]);
}

#[test]
fn unterminated_marker_becomes_thinking() {
    let parts = split_content_into_text_and_thinking("x<think>y");
    assert_eq!(parts, vec![ContentPart::text("x"), ContentPart::thinking("y")]);
}

#[test]
fn adjacent_regions_have_no_empty_text_between() {
    let parts = split_content_into_text_and_thinking("<think>a</think><think>b</think>");
    assert_eq!(
        parts,
        vec![ContentPart::thinking("a"), ContentPart::thinking("b")]
    );
}

#[test]
fn parts_reproduce_non_marker_characters() {
    let input = "intro <think>step 1\nstep 2</think> answer: 42 <think>tail";
    let parts = split_content_into_text_and_thinking(input);
    let rebuilt: String = parts.iter().map(ContentPart::content).collect();
    assert_eq!(rebuilt, input.replace("<think>", "").replace("</think>", ""));
    assert_eq!(joined_text(&parts), "intro  answer: 42 ");
}

#[test]
fn custom_tags() {
    let parts = split_content_with_tags("[r]why[/r]what", ("[r]", "[/r]"));
    assert_eq!(
        parts,
        vec![ContentPart::thinking("why"), ContentPart::text("what")]
    );
}

#[test]
fn parts_serialize_with_kind_tag() {
    let parts = split_content_into_text_and_thinking("a<think>b</think>");
    let json = serde_json::to_value(&parts).unwrap();
    assert_eq!(
        json,
        serde_json::json!([
            {"part_kind": "text", "content": "a"},
            {"part_kind": "thinking", "content": "b"},
        ])
    );
}
