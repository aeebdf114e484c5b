/// Collapse every run of whitespace (newlines included) into one space and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}

/// Keep the first `max_chars` characters. Cuts on char boundaries, not words.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[test]
fn test_collapse_whitespace() {
    assert_eq!(collapse_whitespace("  Hello   world  \n\n  test  "), "Hello world test");
    assert_eq!(collapse_whitespace("a\t\tb\r\n\r\nc"), "a b c");
    assert_eq!(collapse_whitespace(" \n\t "), "");
}

#[test]
fn test_truncate_chars() {
    assert_eq!(truncate_chars("hello world", 5), "hello");
    assert_eq!(truncate_chars("short", 100), "short");
    assert_eq!(truncate_chars("exact", 5), "exact");
    assert_eq!(truncate_chars("", 3), "");
}

#[test]
fn test_truncate_chars_never_splits_multibyte() {
    let text = "größe ñandú 東京タワー";
    let cut = truncate_chars(text, 14);
    assert_eq!(cut.chars().count(), 14);
    assert_eq!(cut, "größe ñandú 東京");
}
