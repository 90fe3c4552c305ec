use std::io;

use thiserror::Error;

use crate::symbol::Symbol;

/// Errors returned by compression and decompression.
#[derive(Debug, Error)]
pub enum HuffmanError {
    /// Reading or writing an underlying stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// A frequency table or header cannot describe a valid encoding tree.
    #[error("malformed frequency table: {message}")]
    MalformedTable { message: String },
    /// The encoding tree has no leaf for a symbol being encoded.
    #[error("symbol {symbol} has no leaf in the encoding tree")]
    SymbolNotFound { symbol: Symbol },
    /// The bit payload ended before the end-of-stream code was seen.
    #[error("payload truncated after {bits_read} bits without an end-of-stream code")]
    TruncatedPayload { bits_read: u64 },
    /// A code book could not be converted to or from bincode.
    #[error("code book serialization: {0}")]
    Serialization(#[from] bincode::Error),
}

impl HuffmanError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        HuffmanError::MalformedTable {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HuffmanError>;
