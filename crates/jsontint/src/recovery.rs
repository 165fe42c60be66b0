//! Recovery prefixes for lines that start inside a string or block comment.
//!
//! The line scanner knows nothing about previous lines. When the previous line
//! ended inside a construct, the tokenizer reopens it by scanning the line with
//! a synthetic opener prepended, and shifts every reported offset back by the
//! opener's length.

use alloc::{borrow::Cow, format};

use crate::state::PendingError;

const STRING_OPENER: &str = "\"";
const BLOCK_COMMENT_OPENER: &str = "/*";

/// A line prepared for scanning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PrefixedLine<'a> {
    pub(crate) text: Cow<'a, str>,
    /// Number of synthetic bytes at the start of `text`.
    pub(crate) inserted: usize,
}

impl PrefixedLine<'_> {
    /// Maps an offset in the prefixed text back onto the original line. The
    /// synthetic opener maps onto offset 0.
    pub(crate) fn line_offset(&self, scanned: usize) -> usize {
        scanned.saturating_sub(self.inserted)
    }
}

pub(crate) fn prefix_line(line: &str, pending: PendingError) -> PrefixedLine<'_> {
    let opener = match pending {
        PendingError::None => {
            return PrefixedLine {
                text: Cow::Borrowed(line),
                inserted: 0,
            };
        }
        PendingError::UnterminatedString => STRING_OPENER,
        PendingError::UnterminatedBlockComment => BLOCK_COMMENT_OPENER,
    };
    PrefixedLine {
        text: Cow::Owned(format!("{opener}{line}")),
        inserted: opener.len(),
    }
}
