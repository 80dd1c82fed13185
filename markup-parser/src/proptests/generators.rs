//! Input generators for property-based testing
#![allow(clippy::expect_used)]
use proptest::prelude::*;

/// Any string, including control characters and multi-byte text.
pub fn any_document_string() -> impl Strategy<Value = String> {
    prop::string::string_regex(".*").expect("Failed to create any string strategy")
}

/// Documents built from lines joined by a random mix of terminator styles, with
/// tabs, indentation and whitespace-only lines thrown in.
pub fn structured_document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("\n".to_string()),
            Just("\r\n".to_string()),
            Just("\r".to_string()),
            Just("\n\n".to_string()),
            Just("\r\n\r\n".to_string()),
            Just("\r\r".to_string()),
            Just("\t".to_string()),
            Just("        ".to_string()),
            Just("   \n".to_string()),
            Just("  ".to_string()),
            Just("\u{a0}".to_string()),
            Just("日本語".to_string()),
            prop::string::string_regex(r"[a-zA-Z0-9 .,!?<>&]+")
                .expect("Failed to create text chunk"),
        ],
        0..30,
    )
    .prop_map(|chunks| chunks.join(""))
}
