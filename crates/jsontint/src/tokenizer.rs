//! The incremental line tokenizer.
//!
//! Overview
//! - [`Tokenizer::tokenize`] scans a single line and classifies every token
//!   the [`LineScanner`] produces into a [`HighlightCategory`].
//! - Classification only needs two pieces of context: whether the previous
//!   significant token was a colon, and the kind of the innermost open
//!   bracket. Both are seeded from the incoming [`TokenizerState`], updated on
//!   local working copies while the line is scanned, and returned in the new
//!   end state.
//! - Lines starting inside a string or block comment are scanned with a
//!   recovery prefix (see `recovery`); offsets are shifted back so the prefix
//!   never shows in the output.
//!
//! Invariants
//! - Each token yields exactly one [`Token`], classified or not, in document
//!   order. Starts are strictly increasing within a line.
//! - The incoming state is never modified; the bracket stack is copied on the
//!   first push or pop only.

use alloc::{string::String, vec::Vec};
use core::ops::Range;

use tracing::{error, trace};

use crate::{
    HighlightCategory, LineOptions, TokenizeError, TokenizerOptions,
    recovery::prefix_line,
    scanner::{JsonLexer, LineScanner, ScanError, ScannerFactory, SyntaxKind},
    state::{ContainerKind, PendingError, TokenizerState},
};

/// Number of characters quoted in a stalled-scanner error.
const STALL_CONTEXT_CHARS: usize = 3;

/// A span start and its category.
///
/// Spans are right-open: a token extends to the start of the next token of
/// the same line, or to the end of the line. `category` is `None` for spans
/// that are not highlighted (whitespace, unknown text, and comments when
/// comments are disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Token {
    /// Byte offset in the line, plus the call's `offset_delta`.
    pub start: usize,
    /// Highlight category, if any.
    pub category: Option<HighlightCategory>,
}

/// Result of tokenizing one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTokens<H = ()> {
    /// Tokens in document order.
    pub tokens: Vec<Token>,
    /// State to pass when tokenizing the next line.
    pub end_state: TokenizerState<H>,
}

impl<H> LineTokens<H> {
    /// Iterates over the right-open spans of the line. `line_end` is where
    /// the last span ends, in the same coordinates as the token starts.
    pub fn spans(
        &self,
        line_end: usize,
    ) -> impl Iterator<Item = (Range<usize>, Option<HighlightCategory>)> + '_ {
        self.tokens.iter().enumerate().map(move |(i, token)| {
            let end = self
                .tokens
                .get(i + 1)
                .map_or(line_end, |next| next.start)
                .max(token.start);
            (token.start..end, token.category)
        })
    }
}

/// Classifies lines of JSON text into highlight spans.
///
/// The tokenizer itself holds only its configuration; everything carried
/// between lines travels through [`TokenizerState`].
#[derive(Debug, Clone, Default)]
pub struct Tokenizer<F = JsonLexer> {
    factory: F,
    options: TokenizerOptions,
}

impl Tokenizer<JsonLexer> {
    /// Creates a tokenizer using the default JSONC scanner.
    #[must_use]
    pub fn new(options: TokenizerOptions) -> Self {
        Self::with_scanner(JsonLexer, options)
    }
}

impl<F: ScannerFactory> Tokenizer<F> {
    /// Creates a tokenizer driving scanners made by `factory`.
    pub fn with_scanner(factory: F, options: TokenizerOptions) -> Self {
        Self { factory, options }
    }

    /// The options this tokenizer was created with.
    pub fn options(&self) -> TokenizerOptions {
        self.options
    }

    /// The state to tokenize the first line of a document with. Hosts that
    /// carry their own value attach it with [`TokenizerState::with_host`].
    #[must_use]
    pub fn initial_state(&self) -> TokenizerState {
        TokenizerState::default()
    }

    /// Tokenizes `line` starting from `state`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::ScannerStalled`] if the line scanner returns a
    /// token without advancing.
    pub fn tokenize<H: Clone>(
        &self,
        line: &str,
        state: &TokenizerState<H>,
    ) -> Result<LineTokens<H>, TokenizeError> {
        self.tokenize_with(line, state, LineOptions::default())
    }

    /// Tokenizes `line` starting from `state`, shifting offsets and stopping
    /// early as configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::ScannerStalled`] if the line scanner returns a
    /// token without advancing.
    pub fn tokenize_with<H: Clone>(
        &self,
        line: &str,
        state: &TokenizerState<H>,
        options: LineOptions,
    ) -> Result<LineTokens<H>, TokenizeError> {
        let prefixed = prefix_line(line, state.pending);
        if prefixed.inserted > 0 {
            trace!(
                pending = ?state.pending,
                inserted = prefixed.inserted,
                "resuming line inside construct"
            );
        }

        let mut scanner = self.factory.scanner(&prefixed.text);
        let mut pending = state.pending;
        let mut after_colon = state.after_colon;
        let mut brackets = state.brackets.clone();
        let mut tokens = Vec::new();
        let mut last_start = None;

        loop {
            let before = scanner.position();
            let kind = scanner.scan();
            if kind == SyntaxKind::Eof {
                break;
            }
            if scanner.position() == before {
                let position = prefixed.line_offset(before);
                let upcoming: String = line
                    .get(position..)
                    .unwrap_or_default()
                    .chars()
                    .take(STALL_CONTEXT_CHARS)
                    .collect();
                error!(position, upcoming = %upcoming, ?kind, "line scanner did not advance");
                return Err(TokenizeError::ScannerStalled { position, upcoming });
            }

            let start = prefixed.line_offset(before);
            if options.stop_at_offset.is_some_and(|stop| start >= stop) {
                break;
            }

            let scan_error = scanner.token_error();
            let category = match kind {
                SyntaxKind::OpenBrace => {
                    brackets.push(ContainerKind::Object);
                    after_colon = false;
                    Some(HighlightCategory::ObjectDelimiter)
                }
                SyntaxKind::CloseBrace => {
                    brackets.pop();
                    after_colon = false;
                    Some(HighlightCategory::ObjectDelimiter)
                }
                SyntaxKind::OpenBracket => {
                    brackets.push(ContainerKind::Array);
                    after_colon = false;
                    Some(HighlightCategory::ArrayDelimiter)
                }
                SyntaxKind::CloseBracket => {
                    brackets.pop();
                    after_colon = false;
                    Some(HighlightCategory::ArrayDelimiter)
                }
                SyntaxKind::Colon => {
                    after_colon = true;
                    Some(HighlightCategory::ColonDelimiter)
                }
                SyntaxKind::Comma => {
                    after_colon = false;
                    Some(HighlightCategory::CommaDelimiter)
                }
                SyntaxKind::TrueKeyword | SyntaxKind::FalseKeyword => {
                    after_colon = false;
                    Some(HighlightCategory::BooleanValue)
                }
                SyntaxKind::NullKeyword => {
                    after_colon = false;
                    Some(HighlightCategory::NullValue)
                }
                SyntaxKind::StringLiteral => {
                    let in_array = brackets.top() == Some(ContainerKind::Array);
                    let category = if after_colon || in_array {
                        HighlightCategory::ValueString
                    } else {
                        HighlightCategory::PropertyName
                    };
                    // The rest of an unterminated string on the next line
                    // is classified in the same context as its start.
                    if scan_error != Some(ScanError::UnexpectedEndOfString) {
                        after_colon = false;
                    }
                    Some(category)
                }
                SyntaxKind::NumericLiteral => {
                    after_colon = false;
                    Some(HighlightCategory::NumberValue)
                }
                SyntaxKind::LineComment => self
                    .options
                    .comments_enabled
                    .then_some(HighlightCategory::CommentLine),
                SyntaxKind::BlockComment => self
                    .options
                    .comments_enabled
                    .then_some(HighlightCategory::CommentBlock),
                SyntaxKind::LineBreak
                | SyntaxKind::Whitespace
                | SyntaxKind::Unknown
                | SyntaxKind::Eof => None,
            };

            pending = PendingError::from(scan_error);
            let token = Token {
                start: start.saturating_add(options.offset_delta),
                category,
            };
            // A token lying entirely inside the recovery prefix has no width in
            // the line; the token following it takes its start.
            if last_start == Some(start) {
                tokens.pop();
            }
            tokens.push(token);
            last_start = Some(start);
        }

        Ok(LineTokens {
            tokens,
            end_state: TokenizerState {
                pending,
                after_colon,
                brackets,
                host: state.host.clone(),
            },
        })
    }
}
