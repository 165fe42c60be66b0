use alloc::string::String;

use thiserror::Error;

/// Failure of a single [`Tokenizer::tokenize`](crate::Tokenizer::tokenize)
/// call.
///
/// Incomplete strings and comments are not errors; they are carried in the
/// returned state. The only failure is a broken [`LineScanner`] contract.
///
/// [`LineScanner`]: crate::LineScanner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    /// The line scanner returned a token without moving its position, which
    /// would otherwise loop forever.
    #[error("line scanner did not advance at offset {position}, next characters are {upcoming:?}")]
    ScannerStalled {
        /// Offset in the line where the scanner stalled.
        position: usize,
        /// Up to three characters following the stalled position.
        upcoming: String,
    },
}
