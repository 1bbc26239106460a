//! Error types for hexed literals.

use thiserror::Error;

/// Errors that can occur while turning a textual literal into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// A character is not valid for the chosen encoding
    #[error("invalid {encoding} digit: {digit:?}")]
    InvalidDigit {
        /// Name of the encoding being parsed.
        encoding: &'static str,
        /// The offending character.
        digit: char,
    },

    /// Unknown `<encoding>:` prefix
    #[error("unknown encoding: {0}")]
    UnknownEncoding(String),

    /// Decimal literal width is not 1, 2, 4 or 8 bytes
    #[error("unsupported decimal width: {0} (expected 1, 2, 4 or 8)")]
    UnsupportedWidth(usize),

    /// Decimal literal does not fit in 64 bits
    #[error("decimal value out of range: {0}")]
    DecimalOverflow(String),

    /// Offset could not be parsed
    #[error("invalid offset: {0}")]
    InvalidOffset(String),

    /// Literal without an `<encoding>:` prefix
    #[error("missing encoding prefix in {0:?} (expected e.g. hex:ff00)")]
    MissingPrefix(String),
}
