//! A document that keeps the tokens and end state of every line, and
//! retokenizes after an edit only as far as the edit can have an effect.
//!
//! After line `n` changes, lines are retokenized from `n` onward until a line's
//! new end state equals its previously cached one. From there on every line
//! would start from the same state as before, so its cached tokens are still
//! valid.

use alloc::{
    string::{String, ToString},
    vec::Vec,
};

use tracing::debug;

use crate::{
    TokenizeError, TokenizerState,
    scanner::{JsonLexer, ScannerFactory},
    tokenizer::{Token, Tokenizer},
};

#[derive(Debug, Clone)]
struct CachedLine {
    text: String,
    tokens: Vec<Token>,
    end_state: TokenizerState,
}

/// Lines of text with cached tokenization.
///
/// ```rust
/// use jsontint::{HighlightCategory, TokenizedDocument, Tokenizer, TokenizerOptions};
///
/// let tokenizer = Tokenizer::new(TokenizerOptions::default());
/// let mut doc = TokenizedDocument::new(tokenizer, "{\n  \"a\": 1,\n  \"b\": 2\n}").unwrap();
///
/// // Changing a value does not change any end state: only that line is redone.
/// assert_eq!(doc.replace_line(1, "  \"a\": true,").unwrap(), 1);
/// assert_eq!(
///     doc.tokens(1).unwrap()[4].category,
///     Some(HighlightCategory::BooleanValue)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TokenizedDocument<F = JsonLexer> {
    tokenizer: Tokenizer<F>,
    lines: Vec<CachedLine>,
}

impl<F: ScannerFactory> TokenizedDocument<F> {
    /// Splits `text` into lines and tokenizes all of them.
    ///
    /// Lines are separated by `\n`; a `\r` before it is dropped. A trailing
    /// line break yields a final empty line.
    ///
    /// # Errors
    ///
    /// Fails if the scanner stalls on any line.
    pub fn new(tokenizer: Tokenizer<F>, text: &str) -> Result<Self, TokenizeError> {
        let initial = TokenizerState::default();
        let lines = text
            .split('\n')
            .map(|line| CachedLine {
                text: line.strip_suffix('\r').unwrap_or(line).to_string(),
                tokens: Vec::new(),
                end_state: initial.clone(),
            })
            .collect();
        let mut doc = Self { tokenizer, lines };
        doc.retokenize_all()?;
        Ok(doc)
    }

    /// Number of lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Text of line `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(|line| line.text.as_str())
    }

    /// The document's text, lines joined with `\n`.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::new();
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            text.push_str(&line.text);
        }
        text
    }

    /// Cached tokens of line `index`.
    #[must_use]
    pub fn tokens(&self, index: usize) -> Option<&[Token]> {
        self.lines.get(index).map(|line| line.tokens.as_slice())
    }

    /// Cached state at the end of line `index`.
    #[must_use]
    pub fn end_state(&self, index: usize) -> Option<&TokenizerState> {
        self.lines.get(index).map(|line| &line.end_state)
    }

    /// The state line `index` is tokenized from.
    #[must_use]
    pub fn start_state(&self, index: usize) -> TokenizerState {
        match index.checked_sub(1).and_then(|prev| self.lines.get(prev)) {
            Some(prev) => prev.end_state.clone(),
            None => TokenizerState::default(),
        }
    }

    /// Replaces the text of line `index` and returns how many lines were
    /// retokenized.
    ///
    /// # Errors
    ///
    /// Fails if the scanner stalls.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn replace_line(&mut self, index: usize, text: &str) -> Result<usize, TokenizeError> {
        self.lines[index].text = text.to_string();
        self.retokenize_from(index)
    }

    /// Inserts a line before `index` and returns how many lines were
    /// retokenized.
    ///
    /// # Errors
    ///
    /// Fails if the scanner stalls.
    ///
    /// # Panics
    ///
    /// Panics if `index > line_count()`.
    pub fn insert_line(&mut self, index: usize, text: &str) -> Result<usize, TokenizeError> {
        // Cached as a line that leaves the state untouched: if the new line
        // really does, the lines below need no work.
        let end_state = self.start_state(index);
        self.lines.insert(
            index,
            CachedLine {
                text: text.to_string(),
                tokens: Vec::new(),
                end_state,
            },
        );
        self.retokenize_from(index)
    }

    /// Removes line `index` and returns how many lines were retokenized.
    ///
    /// # Errors
    ///
    /// Fails if the scanner stalls.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove_line(&mut self, index: usize) -> Result<usize, TokenizeError> {
        let removed = self.lines.remove(index);
        // The line below was tokenized from the removed line's end state.
        if index == self.lines.len() || self.start_state(index) == removed.end_state {
            return Ok(0);
        }
        self.retokenize_from(index)
    }

    /// Retokenizes every line from scratch.
    ///
    /// # Errors
    ///
    /// Fails if the scanner stalls.
    pub fn retokenize_all(&mut self) -> Result<(), TokenizeError> {
        let mut state = TokenizerState::default();
        for line in &mut self.lines {
            let result = self.tokenizer.tokenize(&line.text, &state)?;
            line.tokens = result.tokens;
            line.end_state = result.end_state;
            state = line.end_state.clone();
        }
        debug!(lines = self.lines.len(), "tokenized document");
        Ok(())
    }

    fn retokenize_from(&mut self, first: usize) -> Result<usize, TokenizeError> {
        let mut state = self.start_state(first);
        let mut processed = 0;
        for line in &mut self.lines[first..] {
            let result = self.tokenizer.tokenize(&line.text, &state)?;
            processed += 1;
            let converged = result.end_state == line.end_state;
            line.tokens = result.tokens;
            line.end_state = result.end_state;
            if converged {
                break;
            }
            state = line.end_state.clone();
        }
        debug!(first, processed, "retokenized lines");
        Ok(processed)
    }
}
