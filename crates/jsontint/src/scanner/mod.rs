//! Line scanner: the character-level collaborator of the tokenizer.
//!
//! The tokenizer only relies on the [`LineScanner`] contract: each call to
//! [`scan`](LineScanner::scan) consumes one primitive token, advancing
//! [`position`](LineScanner::position), and reports whether that token was
//! left incomplete via [`token_error`](LineScanner::token_error).
//!
//! [`JsonScanner`] is the default implementation for JSON with comments.
//! It never fails: anything it does not recognize becomes an
//! [`SyntaxKind::Unknown`] token.
//!
//! Positions are byte offsets into the scanned text.

use bstr::decode_utf8;

/// Primitive token kinds produced by a line scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    /// `{`
    OpenBrace,
    /// `}`
    CloseBrace,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `null`
    NullKeyword,
    /// `true`
    TrueKeyword,
    /// `false`
    FalseKeyword,
    /// A string, including its quotes. May be unterminated.
    StringLiteral,
    /// A number, possibly with fraction and exponent.
    NumericLiteral,
    /// `// ...` up to the end of the line.
    LineComment,
    /// `/* ... */`, possibly unterminated.
    BlockComment,
    /// `\n`, `\r` or `\r\n`.
    LineBreak,
    /// A run of whitespace.
    Whitespace,
    /// Anything else, up to the next separator.
    Unknown,
    /// End of the text.
    Eof,
}

/// Problems with the token most recently scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanError {
    /// The string was not closed before the end of the line.
    UnexpectedEndOfString,
    /// The block comment was not closed before the end of the line.
    UnexpectedEndOfComment,
    /// A fraction or exponent has no digits.
    UnexpectedEndOfNumber,
    /// A `\u` escape is not followed by four hex digits.
    InvalidUnicode,
    /// A backslash is followed by a character that is not an escape.
    InvalidEscapeCharacter,
    /// A raw control character inside a string.
    InvalidCharacter,
    /// A character sequence that is not part of JSON.
    InvalidSymbol,
}

/// A scanner over a single line of text.
pub trait LineScanner {
    /// Scans the next token and returns its kind. Returns [`SyntaxKind::Eof`]
    /// once the text is exhausted, and keeps doing so.
    fn scan(&mut self) -> SyntaxKind;

    /// Byte offset of the next character to scan.
    fn position(&self) -> usize;

    /// Error attached to the token returned by the last [`scan`](Self::scan).
    fn token_error(&self) -> Option<ScanError>;
}

/// Creates a [`LineScanner`] for each line the tokenizer processes.
pub trait ScannerFactory {
    /// The scanner type, borrowing the line it scans.
    type Scanner<'src>: LineScanner;

    /// Returns a scanner positioned at the start of `text`.
    fn scanner<'src>(&self, text: &'src str) -> Self::Scanner<'src>;
}

/// Factory for the default [`JsonScanner`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JsonLexer;

impl ScannerFactory for JsonLexer {
    type Scanner<'src> = JsonScanner<'src>;

    fn scanner<'src>(&self, text: &'src str) -> JsonScanner<'src> {
        JsonScanner::new(text)
    }
}

/// JSON-with-comments scanner over one line of text.
///
/// ```rust
/// use jsontint::{JsonScanner, LineScanner, ScanError, SyntaxKind};
///
/// let mut scanner = JsonScanner::new(r#"{"open"#);
/// assert_eq!(scanner.scan(), SyntaxKind::OpenBrace);
/// assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
/// assert_eq!(scanner.token_error(), Some(ScanError::UnexpectedEndOfString));
/// assert_eq!(scanner.scan(), SyntaxKind::Eof);
/// ```
#[derive(Debug, Clone)]
pub struct JsonScanner<'src> {
    text: &'src str,
    pos: usize,
    token_offset: usize,
    error: Option<ScanError>,
}

impl<'src> JsonScanner<'src> {
    /// Creates a scanner at the start of `text`.
    #[must_use]
    pub fn new(text: &'src str) -> Self {
        Self {
            text,
            pos: 0,
            token_offset: 0,
            error: None,
        }
    }

    /// Byte offset where the last scanned token starts.
    #[must_use]
    pub fn token_offset(&self) -> usize {
        self.token_offset
    }

    /// Text of the last scanned token.
    #[must_use]
    pub fn token_text(&self) -> &'src str {
        &self.text[self.token_offset..self.pos]
    }

    // Decode first UTF-8 scalar starting at `offset`
    fn char_at(&self, offset: usize) -> Option<char> {
        if offset >= self.text.len() {
            return None;
        }
        let (ch, len) = decode_utf8(&self.text.as_bytes()[offset..]);
        if len == 0 {
            return None;
        }
        Some(ch.unwrap_or('\u{FFFD}'))
    }

    #[inline]
    fn peek(&self) -> Option<char> {
        self.char_at(self.pos)
    }

    #[inline]
    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn bump_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.bump();
        kind
    }

    /// Scans the body of a string; the opening quote is already consumed.
    fn scan_string(&mut self) {
        loop {
            match self.peek() {
                None => {
                    self.error = Some(ScanError::UnexpectedEndOfString);
                    return;
                }
                Some('"') => {
                    self.bump();
                    return;
                }
                Some('\\') => {
                    self.bump();
                    match self.bump() {
                        None => {
                            self.error = Some(ScanError::UnexpectedEndOfString);
                            return;
                        }
                        Some('"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {}
                        Some('u') => {
                            for _ in 0..4 {
                                if self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                                    self.bump();
                                } else {
                                    self.error = Some(ScanError::InvalidUnicode);
                                    break;
                                }
                            }
                        }
                        Some(_) => self.error = Some(ScanError::InvalidEscapeCharacter),
                    }
                }
                // The line break belongs to the next token.
                Some(c) if is_line_break(c) => {
                    self.error = Some(ScanError::UnexpectedEndOfString);
                    return;
                }
                Some(c) => {
                    if c <= '\u{1f}' {
                        self.error = Some(ScanError::InvalidCharacter);
                    }
                    self.bump();
                }
            }
        }
    }

    /// Scans a number starting at the current digit.
    fn scan_number(&mut self) {
        if self.bump() != Some('0') {
            self.bump_while(|c| c.is_ascii_digit());
        }
        if self.peek() == Some('.') {
            self.bump();
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump_while(|c| c.is_ascii_digit());
            } else {
                self.error = Some(ScanError::UnexpectedEndOfNumber);
                return;
            }
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.bump_while(|c| c.is_ascii_digit());
            } else {
                self.error = Some(ScanError::UnexpectedEndOfNumber);
            }
        }
    }

    fn scan_comment(&mut self) -> SyntaxKind {
        match self.char_at(self.pos + 1) {
            Some('/') => {
                self.pos += 2;
                self.bump_while(|c| !is_line_break(c));
                SyntaxKind::LineComment
            }
            Some('*') => {
                self.pos += 2;
                loop {
                    match self.bump() {
                        None => {
                            self.error = Some(ScanError::UnexpectedEndOfComment);
                            break;
                        }
                        Some('*') if self.peek() == Some('/') => {
                            self.bump();
                            break;
                        }
                        Some(_) => {}
                    }
                }
                SyntaxKind::BlockComment
            }
            _ => {
                self.bump();
                self.error = Some(ScanError::InvalidSymbol);
                SyntaxKind::Unknown
            }
        }
    }

    fn scan_word(&mut self) -> SyntaxKind {
        self.bump_while(|c| !is_separator(c));
        if self.pos == self.token_offset {
            self.bump();
        }
        match self.token_text() {
            "true" => SyntaxKind::TrueKeyword,
            "false" => SyntaxKind::FalseKeyword,
            "null" => SyntaxKind::NullKeyword,
            _ => {
                self.error = Some(ScanError::InvalidSymbol);
                SyntaxKind::Unknown
            }
        }
    }
}

impl LineScanner for JsonScanner<'_> {
    fn scan(&mut self) -> SyntaxKind {
        self.error = None;
        self.token_offset = self.pos;

        let Some(ch) = self.peek() else {
            return SyntaxKind::Eof;
        };

        match ch {
            c if is_whitespace(c) => {
                self.bump_while(is_whitespace);
                SyntaxKind::Whitespace
            }
            '\r' => {
                self.bump();
                if self.peek() == Some('\n') {
                    self.bump();
                }
                SyntaxKind::LineBreak
            }
            '\n' => self.single(SyntaxKind::LineBreak),
            '{' => self.single(SyntaxKind::OpenBrace),
            '}' => self.single(SyntaxKind::CloseBrace),
            '[' => self.single(SyntaxKind::OpenBracket),
            ']' => self.single(SyntaxKind::CloseBracket),
            ':' => self.single(SyntaxKind::Colon),
            ',' => self.single(SyntaxKind::Comma),
            '"' => {
                self.bump();
                self.scan_string();
                SyntaxKind::StringLiteral
            }
            '/' => self.scan_comment(),
            '-' => {
                self.bump();
                if self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number();
                    SyntaxKind::NumericLiteral
                } else {
                    self.error = Some(ScanError::InvalidSymbol);
                    SyntaxKind::Unknown
                }
            }
            '0'..='9' => {
                self.scan_number();
                SyntaxKind::NumericLiteral
            }
            _ => self.scan_word(),
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn token_error(&self) -> Option<ScanError> {
        self.error
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(
        c,
        ' ' | '\t'
            | '\u{000B}'
            | '\u{000C}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200B}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r')
}

/// Characters that end a keyword or unknown word.
fn is_separator(c: char) -> bool {
    is_whitespace(c)
        || is_line_break(c)
        || matches!(c, '{' | '}' | '[' | ']' | '"' | ':' | ',' | '/')
}
