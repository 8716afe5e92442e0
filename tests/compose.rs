use fandom_pulse::compose::{char_weight, display_width, pack_lines, POST_LIMIT};

fn lines(texts: &[&str]) -> Vec<String> {
    texts.iter().map(|text| text.to_string()).collect()
}

#[test]
fn empty_text_has_zero_width() {
    assert_eq!(display_width(""), 0);
}

#[test]
fn ascii_counts_single() {
    assert_eq!(char_weight('a'), 1);
    assert_eq!(display_width("hello"), 5);
}

#[test]
fn punctuation_ranges_count_single() {
    // en dash U+2013 and prime U+2032 sit in the low-weight ranges
    assert_eq!(char_weight('\u{2013}'), 1);
    assert_eq!(char_weight('\u{2032}'), 1);
}

#[test]
fn cjk_and_emoji_count_double() {
    assert_eq!(char_weight('\u{3042}'), 2);
    assert_eq!(char_weight('\u{1F600}'), 2);
    assert_eq!(display_width("\u{3042}\u{3042}"), 4);
}

#[test]
fn width_is_additive_over_chars() {
    assert_eq!(display_width("ab\u{3042}"), 1 + 1 + 2);
}

#[test]
fn empty_input_yields_no_chunks() {
    assert!(pack_lines(&[], POST_LIMIT).is_empty());
}

#[test]
fn short_lines_merge_into_one_chunk() {
    let chunks = pack_lines(&lines(&["one", "two", "three"]), POST_LIMIT);
    assert_eq!(chunks, vec!["one\ntwo\nthree".to_string()]);
}

#[test]
fn join_fits_exactly_at_limit() {
    let first = "a".repeat(100);
    let second = "b".repeat(179);
    // 100 + 179 + 1 separator == 280
    let chunks = pack_lines(&[first.clone(), second.clone()], POST_LIMIT);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0], format!("{}\n{}", first, second));
}

#[test]
fn overflow_starts_a_new_chunk() {
    let first = "a".repeat(150);
    let second = "b".repeat(150);
    let chunks = pack_lines(&[first.clone(), second.clone()], POST_LIMIT);
    assert_eq!(chunks, vec![first, second]);
}

#[test]
fn oversize_line_becomes_its_own_chunk() {
    let huge = "x".repeat(300);
    let chunks = pack_lines(&lines(&["short", huge.as_str(), "tail"]), POST_LIMIT);
    assert_eq!(chunks.len(), 3);
    assert_eq!(chunks[1], huge);
}

#[test]
fn chunks_rejoin_to_the_original_lines() {
    let input = lines(&[
        "header line",
        &"a".repeat(120),
        &"b".repeat(120),
        &"c".repeat(120),
        "tail",
    ]);
    let chunks = pack_lines(&input, POST_LIMIT);
    assert_eq!(chunks.join("\n"), input.join("\n"));
    for chunk in &chunks {
        assert!(display_width(chunk) <= POST_LIMIT);
    }
}

#[test]
fn wide_chars_consume_the_budget_twice_as_fast() {
    // 140 double-width chars weigh 280; adding anything overflows
    let wide = "\u{3042}".repeat(140);
    let chunks = pack_lines(&lines(&[wide.as_str(), "x"]), POST_LIMIT);
    assert_eq!(chunks.len(), 2);
}
