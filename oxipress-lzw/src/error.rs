//! LZW-specific error types.

use oxipress_core::OxiPressError;
use thiserror::Error;

/// LZW compression/decompression errors.
#[derive(Debug, Error)]
pub enum LzwError {
    /// Invalid LZW code encountered.
    ///
    /// Raised when a code references neither a dictionary entry nor the one
    /// entry that can be derived from the previous sequence.
    #[error("Invalid LZW code {code} at code index {index} (next free code {next_code})")]
    InvalidCode {
        /// The offending code.
        code: u32,
        /// Zero-based position of the code in the code stream.
        index: u64,
        /// The code the dictionary would have assigned next.
        next_code: u32,
    },

    /// Invalid maximum code width.
    #[error("Invalid max bits: {0} (must be a power of two between 16 and 32)")]
    InvalidMaxBits(u8),

    /// The header names a width that is well formed but beyond what this
    /// implementation packs.
    #[error("Unsupported max bits: {0} (widest supported is 32)")]
    UnsupportedMaxBits(u8),

    /// Malformed stream header or bit-level failure.
    #[error(transparent)]
    Format(#[from] OxiPressError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LzwError {
    /// Whether this error means the input is not a valid compressed stream.
    pub fn is_corrupt_input(&self) -> bool {
        match self {
            Self::InvalidCode { .. } | Self::UnsupportedMaxBits(_) => true,
            Self::Format(e) => e.is_format_error(),
            Self::InvalidMaxBits(_) | Self::Io(_) => false,
        }
    }
}

/// Result type for LZW operations.
pub type Result<T> = std::result::Result<T, LzwError>;
