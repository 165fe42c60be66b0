//! State carried from the end of one line to the start of the next.
//!
//! A [`TokenizerState`] is a plain value: the tokenizer never mutates a state
//! it has returned, so hosts may cache one per line and compare them with
//! `==` to find where retokenization after an edit can stop.

use alloc::{sync::Arc, vec::Vec};
use core::ptr;

use crate::scanner::ScanError;

/// The kind of an open bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ContainerKind {
    /// Opened by `{`.
    Object,
    /// Opened by `[`.
    Array,
}

/// An incomplete construct the previous line ended in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PendingError {
    /// The previous line ended outside of any string or comment.
    #[default]
    None,
    /// The previous line ended inside a string literal.
    UnterminatedString,
    /// The previous line ended inside a `/* */` comment.
    UnterminatedBlockComment,
}

impl From<Option<ScanError>> for PendingError {
    fn from(error: Option<ScanError>) -> Self {
        match error {
            Some(ScanError::UnexpectedEndOfString) => PendingError::UnterminatedString,
            Some(ScanError::UnexpectedEndOfComment) => PendingError::UnterminatedBlockComment,
            _ => PendingError::None,
        }
    }
}

/// Stack of currently open brackets, innermost last.
///
/// Clones share the underlying sequence. Pushing or popping detaches the
/// stack from any other holder first, so a stack stored in a returned state
/// never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BracketStack(Arc<Vec<ContainerKind>>);

impl BracketStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pushes an opened bracket.
    pub fn push(&mut self, kind: ContainerKind) {
        Arc::make_mut(&mut self.0).push(kind);
    }

    /// Pops the innermost bracket. Popping an empty stack does nothing.
    pub fn pop(&mut self) -> Option<ContainerKind> {
        if self.0.is_empty() {
            return None;
        }
        Arc::make_mut(&mut self.0).pop()
    }

    /// The innermost open bracket.
    #[must_use]
    pub fn top(&self) -> Option<ContainerKind> {
        self.0.last().copied()
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no bracket is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Open brackets, outermost first.
    #[must_use]
    pub fn as_slice(&self) -> &[ContainerKind] {
        &self.0
    }

    /// Returns `true` if both stacks share the same underlying sequence.
    #[must_use]
    pub fn shares_storage_with(&self, other: &BracketStack) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl FromIterator<ContainerKind> for BracketStack {
    fn from_iter<T: IntoIterator<Item = ContainerKind>>(iter: T) -> Self {
        Self(Arc::new(iter.into_iter().collect()))
    }
}

/// State carried over between lines.
///
/// `H` is an opaque value owned by the host. The tokenizer passes it through
/// to every returned state and never inspects it; it is also ignored by `==`.
#[derive(Debug, Clone)]
pub struct TokenizerState<H = ()> {
    pub(crate) pending: PendingError,
    pub(crate) after_colon: bool,
    pub(crate) brackets: BracketStack,
    pub(crate) host: H,
}

impl<H> TokenizerState<H> {
    /// The state at the start of a document, carrying `host`.
    pub fn new(host: H) -> Self {
        Self {
            pending: PendingError::None,
            after_colon: false,
            brackets: BracketStack::new(),
            host,
        }
    }

    /// Builds a state from its parts. Mostly useful to hosts restoring
    /// cached states and to tests.
    pub fn from_parts(
        pending: PendingError,
        after_colon: bool,
        brackets: BracketStack,
        host: H,
    ) -> Self {
        Self {
            pending,
            after_colon,
            brackets,
            host,
        }
    }

    /// Whether the line ended inside a string or block comment.
    #[must_use]
    pub fn pending(&self) -> PendingError {
        self.pending
    }

    /// Whether the last significant token was a colon.
    #[must_use]
    pub fn after_colon(&self) -> bool {
        self.after_colon
    }

    /// Brackets open at the end of the line.
    #[must_use]
    pub fn brackets(&self) -> &BracketStack {
        &self.brackets
    }

    /// The host's value.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Replaces the host's value, keeping the tokenizer-owned fields.
    pub fn with_host<T>(self, host: T) -> TokenizerState<T> {
        TokenizerState {
            pending: self.pending,
            after_colon: self.after_colon,
            brackets: self.brackets,
            host,
        }
    }
}

/// The state at the start of a document without a host value.
impl Default for TokenizerState {
    fn default() -> Self {
        Self::new(())
    }
}

impl<H> PartialEq for TokenizerState<H> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self, other)
            || (self.pending == other.pending
                && self.after_colon == other.after_colon
                && self.brackets == other.brackets)
    }
}

impl<H> Eq for TokenizerState<H> {}
