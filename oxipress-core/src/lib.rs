//! # OxiPress Core
//!
//! Core components for the OxiPress compressor.
//!
//! This crate provides the building blocks the codec crates sit on:
//!
//! - [`bitstream`]: LSB-first packing of variable-width codes
//! - [`source`]: The byte-source capability the codecs pull input from
//! - [`error`]: Error types
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │ L3: Front end                                           │
//! │     CLI, file and console plumbing                      │
//! ├─────────────────────────────────────────────────────────┤
//! │ L2: Codec                                               │
//! │     LZW dictionaries, compress/decompress, header       │
//! ├─────────────────────────────────────────────────────────┤
//! │ L1: BitStream (this crate)                              │
//! │     BitPacker/BitUnpacker, ByteSource                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust
//! use oxipress_core::{BitPacker, BitUnpacker, SliceSource};
//!
//! let mut data = Vec::new();
//! {
//!     let mut packer = BitPacker::new(&mut data);
//!     packer.put(300, 9).unwrap();
//!     packer.finish().unwrap();
//! }
//!
//! let mut unpacker = BitUnpacker::new(SliceSource::new(&data));
//! assert_eq!(unpacker.get(9).unwrap(), Some(300));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod bitstream;
pub mod error;
pub mod source;

// Re-exports for convenience
pub use bitstream::{BitPacker, BitUnpacker, MAX_CODE_WIDTH};
pub use error::{OxiPressError, Result};
pub use source::{ByteSource, ReadSource, SliceSource, read_prefix};
