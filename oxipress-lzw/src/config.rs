//! LZW configuration and code-space constants.

use crate::error::{LzwError, Result};

/// Numeric dictionary code.
pub type Code = u32;

/// Code width used for the first code of every stream.
pub const MIN_BITS: u8 = 9;

/// Default maximum code width.
pub const DEFAULT_MAX_BITS: u8 = 16;

/// Widest code the bit packer supports.
pub const SUPPORTED_MAX_BITS: u8 = 32;

/// Number of single-byte literal codes (0-255).
pub const LITERAL_CODES: Code = 256;

/// Reserved code; never assigned and never emitted.
pub const RESERVED_CODE: Code = 256;

/// First code handed out to a learned multi-byte sequence.
pub const FIRST_CODE: Code = 257;

/// LZW configuration parameters.
///
/// The only tunable is the maximum code width. It is recorded in the stream
/// header, so a decoder never needs to be configured separately.
///
/// Only validated configurations can be built outside this crate:
///
/// ```compile_fail
/// let config = oxipress_lzw::LzwConfig { max_bits: 8 };
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LzwConfig {
    pub(crate) max_bits: u8,
}

impl LzwConfig {
    /// Default configuration: codes grow from 9 up to 16 bits.
    pub const DEFAULT: Self = Self {
        max_bits: DEFAULT_MAX_BITS,
    };

    /// Widest supported configuration: codes grow from 9 up to 32 bits.
    pub const WIDE: Self = Self {
        max_bits: SUPPORTED_MAX_BITS,
    };

    /// Create a validated configuration.
    pub fn new(max_bits: u8) -> Result<Self> {
        let config = Self { max_bits };
        config.validate()?;
        Ok(config)
    }

    /// Check that `max_bits` can be written to the header and packed.
    ///
    /// The header stores the width in 7 bits and requires a power of two of
    /// at least 9, which leaves 16, 32 and 64. The last is rejected as
    /// unsupported.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_indicator(self.max_bits) {
            return Err(LzwError::InvalidMaxBits(self.max_bits));
        }
        if self.max_bits > SUPPORTED_MAX_BITS {
            return Err(LzwError::UnsupportedMaxBits(self.max_bits));
        }
        Ok(())
    }

    /// Maximum code size in bits.
    pub fn max_bits(&self) -> u8 {
        self.max_bits
    }

    /// Total number of codes the dictionary can hold, including the 256
    /// literals and the reserved code.
    pub fn table_capacity(&self) -> u64 {
        1u64.checked_shl(u32::from(self.max_bits)).unwrap_or(u64::MAX)
    }
}

impl Default for LzwConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Whether `bits` is an acceptable max-width value in a stream header.
pub(crate) fn is_valid_indicator(bits: u8) -> bool {
    bits >= MIN_BITS && bits.is_power_of_two()
}
