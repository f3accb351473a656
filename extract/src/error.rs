//! Error types for command extraction.

use thiserror::Error;

use crate::literal::LiteralError;

/// Errors that abort extraction.
///
/// Lines that match no recognized pattern are never errors; only argument
/// literals that were recognized but cannot be understood are.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// An argument literal is not valid literal syntax.
    #[error("line {line}: invalid argument literal in command '{command}': {source}")]
    Literal {
        /// 1-based line of the block terminator.
        line: usize,
        command: String,
        #[source]
        source: LiteralError,
    },

    /// An argument literal parsed but a known key has the wrong shape.
    #[error("line {line}: invalid argument in command '{command}': {message}")]
    Field {
        line: usize,
        command: String,
        message: String,
    },
}

/// Convenience alias for results with [`ExtractError`].
pub type Result<T> = std::result::Result<T, ExtractError>;
