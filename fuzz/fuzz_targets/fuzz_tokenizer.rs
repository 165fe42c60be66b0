#![no_main]
use arbitrary::Arbitrary;
use jsontint::{LineTokens, TokenizedDocument, Tokenizer, TokenizerOptions, TokenizerState};
use libfuzzer_sys::fuzz_target;

/// One lexical piece of a generated document. Fixed pieces keep most inputs
/// close to JSONC; `Text` lets the fuzzer inject anything else.
#[derive(Debug, Arbitrary)]
enum Piece {
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Colon,
    Comma,
    Keyword(Keyword),
    Number(f64),
    String(String),
    LineComment,
    BlockComment,
    OpenBlockComment,
    CloseBlockComment,
    Quote,
    Whitespace(Whitespace),
    LineBreak,
    CarriageReturn,
    Text(String),
}

#[derive(Debug, Arbitrary)]
enum Keyword {
    True,
    False,
    Null,
}

#[derive(Debug, Arbitrary)]
enum Whitespace {
    Space,
    Tab,
    NoBreakSpace,
    EmSpace,
    IdeographicSpace,
    ByteOrderMark,
}

#[derive(Debug, Arbitrary)]
enum Edit {
    OpenBlockComment,
    OpenString,
    Close,
    Remove,
}

#[derive(Debug, Arbitrary)]
struct Input {
    pieces: Vec<Piece>,
    edit: Edit,
    edit_line: usize,
}

impl Piece {
    fn render(&self, out: &mut String) {
        match self {
            Piece::OpenBrace => out.push('{'),
            Piece::CloseBrace => out.push('}'),
            Piece::OpenBracket => out.push('['),
            Piece::CloseBracket => out.push(']'),
            Piece::Colon => out.push(':'),
            Piece::Comma => out.push(','),
            Piece::Keyword(Keyword::True) => out.push_str("true"),
            Piece::Keyword(Keyword::False) => out.push_str("false"),
            Piece::Keyword(Keyword::Null) => out.push_str("null"),
            Piece::Number(n) => out.push_str(&n.to_string()),
            Piece::String(s) => {
                out.push('"');
                out.push_str(s);
                out.push('"');
            }
            Piece::LineComment => out.push_str("// note\n"),
            Piece::BlockComment => out.push_str("/* a */"),
            Piece::OpenBlockComment => out.push_str("/*"),
            Piece::CloseBlockComment => out.push_str("*/"),
            Piece::Quote => out.push('"'),
            Piece::Whitespace(w) => out.push(match w {
                Whitespace::Space => ' ',
                Whitespace::Tab => '\t',
                Whitespace::NoBreakSpace => '\u{00A0}',
                Whitespace::EmSpace => '\u{2003}',
                Whitespace::IdeographicSpace => '\u{3000}',
                Whitespace::ByteOrderMark => '\u{FEFF}',
            }),
            Piece::LineBreak => out.push('\n'),
            Piece::CarriageReturn => out.push('\r'),
            Piece::Text(s) => out.push_str(s),
        }
    }
}

fn check_line(line: &str, result: &LineTokens) {
    let mut previous = None;
    for token in &result.tokens {
        assert!(token.start <= line.len(), "start past end of {line:?}");
        assert!(
            line.is_char_boundary(token.start),
            "start inside a character of {line:?}"
        );
        if let Some(previous) = previous {
            assert!(previous < token.start, "starts not increasing in {line:?}");
        }
        previous = Some(token.start);
    }
}

fn check_document(options: TokenizerOptions, text: &str, edit: &Edit, edit_line: usize) {
    let mut state = TokenizerState::default();
    let tokenizer = Tokenizer::new(options);
    for line in text.split('\n') {
        let result = tokenizer
            .tokenize(line, &state)
            .expect("default scanner never stalls");
        check_line(line, &result);
        state = result.end_state;
    }

    // Carriage returns are dropped so that `doc.text()` splits back into the
    // same lines.
    let text = text.replace('\r', "");
    let mut doc = TokenizedDocument::new(Tokenizer::new(options), &text).unwrap();
    let index = edit_line % doc.line_count();
    let edited = match edit {
        Edit::OpenBlockComment => doc.insert_line(index, "/*"),
        Edit::OpenString => doc.insert_line(index, "\""),
        Edit::Close => doc.replace_line(index, "}"),
        Edit::Remove => doc.remove_line(index),
    };
    edited.expect("default scanner never stalls");

    let fresh = TokenizedDocument::new(Tokenizer::new(options), &doc.text()).unwrap();
    for i in 0..doc.line_count() {
        assert_eq!(doc.tokens(i), fresh.tokens(i));
        assert_eq!(doc.end_state(i), fresh.end_state(i));
    }
}

fuzz_target!(|input: Input| {
    let mut text = String::new();
    for piece in &input.pieces {
        piece.render(&mut text);
    }
    for comments_enabled in [false, true] {
        check_document(
            TokenizerOptions { comments_enabled },
            &text,
            &input.edit,
            input.edit_line,
        );
    }
});
