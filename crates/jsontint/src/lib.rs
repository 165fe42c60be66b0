//! Incremental, line-by-line tokenization of JSON and JSON-with-comments text
//! for syntax highlighting.
//!
//! The [`Tokenizer`] classifies one line at a time into `(offset, category)`
//! spans. Everything it needs to resume at the start of the next line lives in
//! the [`TokenizerState`] returned alongside the tokens, so an editor can
//! retokenize from any line as long as it kept the state of the line above.
//!
//! ```rust
//! use jsontint::{HighlightCategory, Tokenizer, TokenizerOptions};
//!
//! let tokenizer = Tokenizer::new(TokenizerOptions::default());
//! let first = tokenizer.tokenize(r#"{"name": "li"#, &tokenizer.initial_state()).unwrap();
//! let second = tokenizer.tokenize(r#"nus"}"#, &first.end_state).unwrap();
//!
//! assert_eq!(second.tokens[0].start, 0);
//! assert_eq!(second.tokens[0].category, Some(HighlightCategory::ValueString));
//! assert!(second.end_state.brackets().is_empty());
//! ```

#![no_std]
extern crate alloc;

#[cfg(test)]
extern crate std;

mod category;
mod document;
mod error;
mod options;
mod recovery;
pub mod scanner;
mod state;
mod tokenizer;

#[cfg(test)]
mod tests;

pub use category::HighlightCategory;
pub use document::TokenizedDocument;
pub use error::TokenizeError;
pub use options::{LineOptions, TokenizerOptions};
pub use scanner::{JsonLexer, JsonScanner, LineScanner, ScanError, ScannerFactory, SyntaxKind};
pub use state::{BracketStack, ContainerKind, PendingError, TokenizerState};
pub use tokenizer::{LineTokens, Token, Tokenizer};
