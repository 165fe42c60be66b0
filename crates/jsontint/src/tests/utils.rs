use alloc::{string::String, vec::Vec};
use core::fmt::Write;

use crate::{HighlightCategory, LineTokens, Token, Tokenizer, TokenizerOptions, TokenizerState};

pub fn tokenizer(comments_enabled: bool) -> Tokenizer {
    Tokenizer::new(TokenizerOptions { comments_enabled })
}

/// Tokenizes a single line from the initial state.
pub fn line(text: &str) -> LineTokens {
    tokenizer(false)
        .tokenize(text, &TokenizerState::default())
        .expect("default scanner never stalls")
}

pub fn categories(tokens: &[Token]) -> Vec<Option<HighlightCategory>> {
    tokens.iter().map(|t| t.category).collect()
}

pub fn starts(tokens: &[Token]) -> Vec<usize> {
    tokens.iter().map(|t| t.start).collect()
}

/// Tokenizes `lines` in sequence, threading the end state through.
pub fn tokenize_lines(tokenizer: &Tokenizer, lines: &[&str]) -> Vec<LineTokens> {
    let mut state = TokenizerState::default();
    let mut out = Vec::with_capacity(lines.len());
    for text in lines {
        let result = tokenizer
            .tokenize(text, &state)
            .expect("default scanner never stalls");
        state = result.end_state.clone();
        out.push(result);
    }
    out
}

/// Renders every span of every line as `line:start..end category "text"`.
pub fn write_rendered_spans<W: Write>(
    tokenizer: &Tokenizer,
    lines: &[&str],
    f: &mut W,
) -> Result<(), core::fmt::Error> {
    for (n, (text, result)) in lines
        .iter()
        .zip(tokenize_lines(tokenizer, lines))
        .enumerate()
    {
        for (range, category) in result.spans(text.len()) {
            let name = category.map_or("-", HighlightCategory::as_str);
            let (start, end) = (range.start, range.end);
            writeln!(f, "{n}:{start}..{end} {name} {:?}", &text[range])?;
        }
    }
    Ok(())
}

pub fn render_spans(tokenizer: &Tokenizer, lines: &[&str]) -> String {
    let mut out = String::new();
    write_rendered_spans(tokenizer, lines, &mut out).expect("writing to a String");
    out
}
