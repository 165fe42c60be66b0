use alloc::{rc::Rc, vec, vec::Vec};

use rstest::rstest;

use super::utils::{categories, line, starts, tokenizer};
use crate::{
    ContainerKind, HighlightCategory::*, LineOptions, PendingError, Token, TokenizerState,
};

#[test]
fn empty_line_keeps_initial_state() {
    let result = line("");
    assert!(result.tokens.is_empty());
    assert_eq!(result.end_state, TokenizerState::default());
}

#[test]
fn whitespace_line_is_one_unclassified_span() {
    let result = line(" \t ");
    assert_eq!(
        result.tokens,
        [Token {
            start: 0,
            category: None
        }]
    );
    assert_eq!(result.end_state, TokenizerState::default());
}

#[test]
fn bracket_depth_follows_delimiters() {
    let text = r#"{"a":[1,2]}"#;
    let tokenizer = tokenizer(false);
    let initial = TokenizerState::default();

    let mut depths = Vec::new();
    for (offset, ch) in text.char_indices() {
        if !matches!(ch, '{' | '}' | '[' | ']' | ':' | ',') {
            continue;
        }
        let prefix = tokenizer
            .tokenize_with(
                text,
                &initial,
                LineOptions {
                    stop_at_offset: Some(offset + 1),
                    ..LineOptions::default()
                },
            )
            .unwrap();
        depths.push(prefix.end_state.brackets().depth());
    }
    assert_eq!(depths, [1, 1, 2, 2, 1, 0]);

    let full = line(text);
    assert!(full.end_state.brackets().is_empty());
    assert_eq!(
        categories(&full.tokens),
        [
            Some(ObjectDelimiter),
            Some(PropertyName),
            Some(ColonDelimiter),
            Some(ArrayDelimiter),
            Some(NumberValue),
            Some(CommaDelimiter),
            Some(NumberValue),
            Some(ArrayDelimiter),
            Some(ObjectDelimiter),
        ]
    );
}

#[test]
fn property_name_then_value_string() {
    let result = line(r#"{"k":"v"}"#);
    assert_eq!(
        categories(&result.tokens),
        [
            Some(ObjectDelimiter),
            Some(PropertyName),
            Some(ColonDelimiter),
            Some(ValueString),
            Some(ObjectDelimiter),
        ]
    );
    assert_eq!(starts(&result.tokens), [0, 1, 4, 5, 8]);
}

#[test]
fn array_context_forces_value_string() {
    let result = line(r#"["x"]"#);
    assert_eq!(
        categories(&result.tokens),
        [Some(ArrayDelimiter), Some(ValueString), Some(ArrayDelimiter)]
    );
}

#[test]
fn strings_in_nested_containers() {
    let result = line(r#"[{"k": ["v", {"n": "w"}]}]"#);
    let strings: Vec<_> = categories(&result.tokens)
        .into_iter()
        .flatten()
        .filter(|c| matches!(c, PropertyName | ValueString))
        .collect();
    assert_eq!(strings, [PropertyName, ValueString, PropertyName, ValueString]);
    assert!(result.end_state.brackets().is_empty());
}

#[test]
fn top_level_string_defaults_to_object_context() {
    let result = line(r#""alone""#);
    assert_eq!(categories(&result.tokens), [Some(PropertyName)]);
    assert!(!result.end_state.after_colon());
}

#[rstest]
#[case("true", BooleanValue)]
#[case("false", BooleanValue)]
#[case("null", NullValue)]
#[case("-1.5e3", NumberValue)]
#[case(",", CommaDelimiter)]
#[case(":", ColonDelimiter)]
fn scalar_categories(#[case] text: &str, #[case] expected: crate::HighlightCategory) {
    assert_eq!(categories(&line(text).tokens), [Some(expected)]);
}

#[test]
fn colon_sets_after_colon_until_next_significant_token() {
    let after_colon = line(r#"{"a": "#);
    assert!(after_colon.end_state.after_colon());

    let after_value = line(r#"{"a": 1"#);
    assert!(!after_value.end_state.after_colon());

    let after_comma = line(r#"{"a": 1,"#);
    assert!(!after_comma.end_state.after_colon());
}

#[test]
fn colon_context_survives_line_break() {
    let tokenizer = tokenizer(false);
    let first = tokenizer
        .tokenize(r#"{"key":"#, &TokenizerState::default())
        .unwrap();
    assert!(first.end_state.after_colon());

    let second = tokenizer
        .tokenize(r#"  "value"}"#, &first.end_state)
        .unwrap();
    assert_eq!(
        categories(&second.tokens),
        [None, Some(ValueString), Some(ObjectDelimiter)]
    );
}

#[test]
fn comments_and_unknown_text_keep_colon_context() {
    let tokenizer = tokenizer(true);
    let result = tokenizer
        .tokenize(r#"{"a": /* c */ oops "v"}"#, &TokenizerState::default())
        .unwrap();
    assert_eq!(
        categories(&result.tokens),
        [
            Some(ObjectDelimiter),
            Some(PropertyName),
            Some(ColonDelimiter),
            None,
            Some(CommentBlock),
            None,
            None,
            None,
            Some(ValueString),
            Some(ObjectDelimiter),
        ]
    );
}

#[test]
fn comment_gating() {
    let plain = tokenizer(false)
        .tokenize("// hi", &TokenizerState::default())
        .unwrap();
    assert_eq!(
        plain.tokens,
        [Token {
            start: 0,
            category: None
        }]
    );

    let jsonc = tokenizer(true)
        .tokenize("// hi", &TokenizerState::default())
        .unwrap();
    assert_eq!(
        jsonc.tokens,
        [Token {
            start: 0,
            category: Some(CommentLine)
        }]
    );

    let block = tokenizer(true)
        .tokenize("1 /* x */", &TokenizerState::default())
        .unwrap();
    assert_eq!(
        categories(&block.tokens),
        [Some(NumberValue), None, Some(CommentBlock)]
    );
}

#[test]
fn unbalanced_closers_are_tolerated() {
    let result = line("]]}{");
    assert_eq!(
        categories(&result.tokens),
        [
            Some(ArrayDelimiter),
            Some(ArrayDelimiter),
            Some(ObjectDelimiter),
            Some(ObjectDelimiter),
        ]
    );
    assert_eq!(result.end_state.brackets().as_slice(), [ContainerKind::Object]);
}

#[test]
fn mismatched_closer_pops_innermost() {
    let result = line("[{]");
    assert_eq!(result.end_state.brackets().as_slice(), [ContainerKind::Array]);
}

#[test]
fn offset_delta_shifts_every_start() {
    let text = r#"{"a":1}"#;
    let plain = line(text);
    let shifted = tokenizer(false)
        .tokenize_with(
            text,
            &TokenizerState::default(),
            LineOptions {
                offset_delta: 100,
                ..LineOptions::default()
            },
        )
        .unwrap();

    assert_eq!(starts(&plain.tokens), [0, 1, 4, 5, 6]);
    assert_eq!(starts(&shifted.tokens), [100, 101, 104, 105, 106]);
    assert_eq!(categories(&plain.tokens), categories(&shifted.tokens));
    assert_eq!(plain.end_state, shifted.end_state);
}

#[test]
fn offset_delta_saturates() {
    let result = tokenizer(false)
        .tokenize_with(
            "[1]",
            &TokenizerState::default(),
            LineOptions {
                offset_delta: usize::MAX - 1,
                ..LineOptions::default()
            },
        )
        .unwrap();
    assert_eq!(
        starts(&result.tokens),
        [usize::MAX - 1, usize::MAX, usize::MAX]
    );
}

#[test]
fn stop_offset_truncates_before_colon() {
    let result = tokenizer(false)
        .tokenize_with(
            r#"{"a":1}"#,
            &TokenizerState::default(),
            LineOptions {
                stop_at_offset: Some(4),
                ..LineOptions::default()
            },
        )
        .unwrap();

    assert_eq!(
        result.tokens,
        [
            Token {
                start: 0,
                category: Some(ObjectDelimiter)
            },
            Token {
                start: 1,
                category: Some(PropertyName)
            },
        ]
    );
    // Only the scanned prefix contributes to the end state.
    assert!(!result.end_state.after_colon());
    assert_eq!(result.end_state.brackets().depth(), 1);
}

#[test]
fn stop_offset_applies_before_delta() {
    let result = tokenizer(false)
        .tokenize_with(
            "[1, 2]",
            &TokenizerState::default(),
            LineOptions {
                offset_delta: 10,
                stop_at_offset: Some(3),
            },
        )
        .unwrap();
    assert_eq!(starts(&result.tokens), [10, 11, 12]);
}

#[test]
fn incoming_state_is_not_modified() {
    let tokenizer = tokenizer(false);
    let opened = tokenizer
        .tokenize("[{", &TokenizerState::default())
        .unwrap();
    let before = opened.end_state.clone();

    let closed = tokenizer.tokenize("}]", &opened.end_state).unwrap();
    assert!(closed.end_state.brackets().is_empty());
    assert_eq!(opened.end_state, before);
    assert_eq!(
        opened.end_state.brackets().as_slice(),
        [ContainerKind::Array, ContainerKind::Object]
    );
}

#[test]
fn untouched_bracket_stack_is_shared() {
    let tokenizer = tokenizer(false);
    let opened = tokenizer.tokenize("{", &TokenizerState::default()).unwrap();
    let next = tokenizer.tokenize(r#""a": 1,"#, &opened.end_state).unwrap();
    assert!(
        next.end_state
            .brackets()
            .shares_storage_with(opened.end_state.brackets())
    );
}

#[test]
fn host_state_passes_through() {
    let tokenizer = tokenizer(false);
    let host = Rc::new(vec!["decorations"]);
    let state = TokenizerState::new(Rc::clone(&host));

    let result = tokenizer.tokenize("[1]", &state).unwrap();
    assert!(Rc::ptr_eq(result.end_state.host(), &host));
    assert_eq!(result.end_state.pending(), PendingError::None);
    assert_eq!(result.end_state, state);
}

#[test]
fn spans_are_right_open() {
    let text = r#"{"a": 1}"#;
    let result = line(text);
    let spans: Vec<_> = result.spans(text.len()).collect();
    assert_eq!(
        spans,
        [
            (0..1, Some(ObjectDelimiter)),
            (1..4, Some(PropertyName)),
            (4..5, Some(ColonDelimiter)),
            (5..6, None),
            (6..7, Some(NumberValue)),
            (7..8, Some(ObjectDelimiter)),
        ]
    );
}
