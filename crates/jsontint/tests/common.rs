#![allow(missing_docs)]
#![allow(dead_code)]

use jsontint::{TokenizedDocument, Tokenizer, TokenizerOptions};

pub const SETTINGS: &str = r#"{
    // editor settings
    "editor.fontSize": 14,
    "editor.rulers": [80, 120],
    /* workspace
       overrides */
    "files.exclude": {
        "**/.git": true,
        "**/target": null
    },
    "window.title": "jsontint"
}"#;

pub fn jsonc() -> Tokenizer {
    Tokenizer::new(TokenizerOptions {
        comments_enabled: true,
    })
}

pub fn settings() -> TokenizedDocument {
    TokenizedDocument::new(jsonc(), SETTINGS).expect("default scanner never stalls")
}

/// Asserts that the cached tokens of `doc` are what tokenizing its current
/// text from scratch gives.
pub fn assert_matches_fresh(doc: &TokenizedDocument) {
    let fresh =
        TokenizedDocument::new(jsonc(), &doc.text()).expect("default scanner never stalls");
    assert_eq!(doc.line_count(), fresh.line_count());
    for i in 0..doc.line_count() {
        assert_eq!(doc.tokens(i), fresh.tokens(i), "tokens of line {i}");
        assert_eq!(doc.end_state(i), fresh.end_state(i), "end state of line {i}");
    }
}
