/// Session-wide configuration of a [`Tokenizer`](crate::Tokenizer).
///
/// Fixed for the lifetime of the tokenizer; it is not part of the per-line
/// state.
///
/// # Examples
///
/// ```rust
/// use jsontint::{Tokenizer, TokenizerOptions};
///
/// let jsonc = Tokenizer::new(TokenizerOptions {
///     comments_enabled: true,
/// });
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// Whether `//` and `/* */` comments are highlighted.
    ///
    /// Comments are always recognized by the scanner so that they never
    /// disturb the classification of surrounding tokens. When `false`, their
    /// spans are reported without a category, as plain JSON would have them.
    ///
    /// # Default
    ///
    /// `false`
    pub comments_enabled: bool,
}

/// Per-call options of
/// [`Tokenizer::tokenize_with`](crate::Tokenizer::tokenize_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LineOptions {
    /// Constant added to every reported token start.
    ///
    /// Used when the host presents a sub-range of a larger buffer as the line.
    /// Starts that would overflow saturate at `usize::MAX`.
    ///
    /// # Default
    ///
    /// `0`
    pub offset_delta: usize,

    /// Stops scanning at the first token starting at or after this offset
    /// (relative to the line, before `offset_delta` is applied).
    ///
    /// The returned state only reflects the tokens scanned before the stop.
    ///
    /// # Default
    ///
    /// `None`
    pub stop_at_offset: Option<usize>,
}
