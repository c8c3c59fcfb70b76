//! Error types for OxiPress operations.
//!
//! This module provides the error type shared by the bit-level I/O layer and
//! the stream-format code built on top of it.

use std::io;
use thiserror::Error;

/// The main error type for OxiPress core operations.
#[derive(Debug, Error)]
pub enum OxiPressError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number in stream header.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// Invalid header format.
    #[error("Invalid header: {message}")]
    InvalidHeader {
        /// Description of the header error.
        message: String,
    },

    /// A code width outside what the bit packer can handle.
    #[error("Invalid bit width: {0} (must be 1-32)")]
    InvalidBitWidth(u8),

    /// A code was written after the stream had been finished.
    #[error("Bit stream already finished")]
    StreamFinished,
}

/// Result type alias for OxiPress core operations.
pub type Result<T> = std::result::Result<T, OxiPressError>;

impl OxiPressError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an invalid header error.
    pub fn invalid_header(message: impl Into<String>) -> Self {
        Self::InvalidHeader {
            message: message.into(),
        }
    }

    /// Whether this error describes a malformed stream rather than an I/O failure.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::InvalidMagic { .. } | Self::InvalidHeader { .. })
    }
}
