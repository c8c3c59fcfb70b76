//! Stream header.
//!
//! Every compressed stream starts with three bytes:
//!
//! | Offset | Value                   |
//! |--------|-------------------------|
//! | 0      | `0x1F`                  |
//! | 1      | `0x9D`                  |
//! | 2      | `0x80 \| max_bits`      |
//!
//! The packed codes follow immediately, starting at 9 bits wide.

use crate::config::{LzwConfig, is_valid_indicator};
use crate::error::Result;
use oxipress_core::{ByteSource, OxiPressError, read_prefix};
use std::io::Write;

/// Magic bytes opening every stream.
pub const MAGIC: [u8; 2] = [0x1F, 0x9D];

/// Fixed marker bit in the third header byte.
pub const BLOCK_MODE_FLAG: u8 = 0x80;

/// Mask selecting the max-bits value in the third header byte.
pub const MAX_BITS_MASK: u8 = 0x7F;

/// Header length in bytes.
pub const HEADER_LEN: usize = 3;

/// Parsed stream header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Maximum code width used by the stream.
    pub max_bits: u8,
}

impl Header {
    /// Header describing streams produced with `config`.
    pub fn for_config(config: &LzwConfig) -> Self {
        Self {
            max_bits: config.max_bits(),
        }
    }

    /// Serialize the header.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        [MAGIC[0], MAGIC[1], BLOCK_MODE_FLAG | (self.max_bits & MAX_BITS_MASK)]
    }

    /// Write the header to `writer`.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        log::debug!("wrote header, max_bits={}", self.max_bits);
        Ok(())
    }

    /// Parse a header from the start of `data`.
    ///
    /// Bytes past the header are ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < HEADER_LEN {
            return Err(OxiPressError::invalid_header(format!(
                "truncated header: {} of {} bytes",
                data.len(),
                HEADER_LEN
            ))
            .into());
        }

        if data[..2] != MAGIC {
            return Err(OxiPressError::invalid_magic(MAGIC.to_vec(), data[..2].to_vec()).into());
        }

        let max_bits = data[2] & MAX_BITS_MASK;
        if !is_valid_indicator(max_bits) {
            return Err(OxiPressError::invalid_header(format!(
                "invalid max bits indicator: {:#04x}",
                data[2]
            ))
            .into());
        }

        log::debug!("parsed header, max_bits={}", max_bits);
        Ok(Self { max_bits })
    }

    /// Read and parse a header from a byte source.
    pub fn read<S: ByteSource>(source: &mut S) -> Result<Self> {
        let bytes = read_prefix(source, HEADER_LEN)?;
        Self::parse(&bytes)
    }

    /// Turn the header into a codec configuration.
    ///
    /// Fails for a well-formed header whose width cannot be packed.
    pub fn config(&self) -> Result<LzwConfig> {
        LzwConfig::new(self.max_bits)
    }
}
