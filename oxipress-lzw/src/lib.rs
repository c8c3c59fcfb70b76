//! # OxiPress-LZW: Pure Rust adaptive LZW
//!
//! This crate provides LZW (Lempel-Ziv-Welch) compression and decompression
//! of arbitrary byte streams. The dictionary is built on the fly on both
//! sides and never transmitted.
//!
//! ## Stream Format
//!
//! - **Header**: `0x1F 0x9D`, then `0x80 | max_bits`
//! - **LSB-first bit order**: The first code's low bit is the low bit of the
//!   first byte after the header
//! - **9-bit start**: Codes start 9 bits wide and grow one bit at a time up
//!   to `max_bits` (16 by default)
//! - **Code space**: 0-255 are literals, 256 is reserved and never emitted,
//!   learned sequences start at 257
//! - **No end code**: The stream ends when fewer bits remain than the
//!   current code width
//! - **Full dictionary**: Once every code is assigned the table freezes and
//!   compression continues with the existing entries
//!
//! ## Example
//!
//! ```rust
//! use oxipress_lzw::{compress, decompress};
//!
//! let original = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! // Compress
//! let compressed = compress(original).unwrap();
//! assert_eq!(&compressed[..3], &[0x1F, 0x9D, 0x90]);
//!
//! // Decompress
//! let decompressed = decompress(&compressed).unwrap();
//!
//! assert_eq!(decompressed, original);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;
mod decoder;
mod dictionary;
mod encoder;
mod error;
mod header;
mod stats;

pub use config::{
    Code, DEFAULT_MAX_BITS, FIRST_CODE, LITERAL_CODES, LzwConfig, MIN_BITS, RESERVED_CODE,
    SUPPORTED_MAX_BITS,
};
pub use decoder::LzwDecoder;
pub use dictionary::{CodeWidth, DecodeDictionary, EncodeDictionary};
pub use encoder::LzwEncoder;
pub use error::{LzwError, Result};
pub use header::{BLOCK_MODE_FLAG, HEADER_LEN, Header, MAGIC};
pub use stats::{DecodeStats, EncodeStats, WidthChange};

use oxipress_core::ReadSource;
use std::io::{Read, Write};

/// Compress data with the default configuration (codes up to 16 bits).
///
/// # Example
///
/// ```rust
/// use oxipress_lzw::compress;
///
/// let data = b"TOBEORNOTTOBEORTOBEORNOT";
/// let compressed = compress(data).unwrap();
/// assert!(compressed.len() < data.len());
/// ```
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, LzwConfig::DEFAULT)
}

/// Compress data with the given configuration.
///
/// # Example
///
/// ```rust
/// use oxipress_lzw::{compress_with, decompress, LzwConfig};
///
/// let original = b"Hello, World!";
/// let compressed = compress_with(original, LzwConfig::WIDE).unwrap();
/// assert_eq!(compressed[2], 0x80 | 32);
/// assert_eq!(decompress(&compressed).unwrap(), original);
/// ```
pub fn compress_with(data: &[u8], config: LzwConfig) -> Result<Vec<u8>> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode(data)
}

/// Decompress a complete stream.
///
/// The maximum code width is taken from the header.
///
/// # Example
///
/// ```rust
/// use oxipress_lzw::{compress, decompress};
///
/// let original = b"This is a test of compression! ".repeat(10);
/// let compressed = compress(&original).unwrap();
/// assert_eq!(decompress(&compressed).unwrap(), original);
/// ```
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    LzwDecoder::new().decode(data)
}

/// Compress everything `reader` yields into `writer`.
///
/// `reader` is buffered internally; `writer` receives small writes and is
/// best wrapped in a [`std::io::BufWriter`] when it is a file or pipe.
pub fn compress_stream<R: Read, W: Write>(
    reader: R,
    writer: W,
    config: LzwConfig,
) -> Result<EncodeStats> {
    let mut encoder = LzwEncoder::new(config)?;
    encoder.encode_stream(ReadSource::new(reader), writer)
}

/// Decompress the stream `reader` yields into `writer`.
pub fn decompress_stream<R: Read, W: Write>(reader: R, writer: W) -> Result<DecodeStats> {
    LzwDecoder::new().decode_stream(ReadSource::new(reader), writer)
}

/// Parse the header at the start of a compressed buffer.
///
/// # Example
///
/// ```rust
/// use oxipress_lzw::{compress, read_header};
///
/// let compressed = compress(b"abc").unwrap();
/// assert_eq!(read_header(&compressed).unwrap().max_bits, 16);
/// assert!(read_header(&compressed[..2]).is_err());
/// ```
pub fn read_header(data: &[u8]) -> Result<Header> {
    Header::parse(data)
}
