//! Variable-width code packing.
//!
//! [`BitPacker`] and [`BitUnpacker`] move codes of 1 to 32 bits in and out of
//! a byte stream. Codes are packed back to back with no padding between
//! them; only the last byte of a stream may carry unused high bits.
//!
//! # Bit Ordering
//!
//! Packing is LSB-first: the low bit of the first code lands in the low bit
//! of the first byte, and each following code continues at the next free
//! bit. Both sides use the same ordering, so the unpacker reproduces the
//! packed codes exactly when asked for the same widths in the same order.
//!
//! # Example
//!
//! ```
//! use oxipress_core::bitstream::{BitPacker, BitUnpacker};
//! use oxipress_core::source::SliceSource;
//!
//! let mut output = Vec::new();
//! let mut packer = BitPacker::new(&mut output);
//! packer.put(0x41, 9).unwrap();
//! packer.put(0x1FF, 9).unwrap();
//! packer.finish().unwrap();
//! drop(packer);
//! assert_eq!(output.len(), 3);
//!
//! let mut unpacker = BitUnpacker::new(SliceSource::new(&output));
//! assert_eq!(unpacker.get(9).unwrap(), Some(0x41));
//! assert_eq!(unpacker.get(9).unwrap(), Some(0x1FF));
//! assert_eq!(unpacker.get(9).unwrap(), None);
//! ```

use crate::error::{OxiPressError, Result};
use crate::source::ByteSource;
use std::io::Write;

/// Widest code either side accepts.
pub const MAX_CODE_WIDTH: u8 = 32;

#[inline]
fn check_width(width: u8) -> Result<()> {
    if width == 0 || width > MAX_CODE_WIDTH {
        return Err(OxiPressError::InvalidBitWidth(width));
    }
    Ok(())
}

/// Packs variable-width codes into a byte sink, LSB-first.
///
/// Call [`BitPacker::finish`] once all codes are written. If the packer is
/// dropped first, the pending partial byte is still flushed on a best-effort
/// basis so that no code is lost on an early-return path. The flush happens
/// at most once either way.
#[derive(Debug)]
pub struct BitPacker<W: Write> {
    /// Underlying writer.
    writer: W,
    /// Bit accumulator; the next code goes in at `bits_in_buffer`.
    buffer: u64,
    /// Number of pending bits in the accumulator.
    bits_in_buffer: u8,
    /// Total bits accepted through `put`.
    total_bits_written: u64,
    /// Bytes handed to the writer.
    bytes_written: u64,
    /// Set once the final partial byte has been flushed.
    finished: bool,
    /// Set when the writer failed; nothing more is attempted on drop.
    poisoned: bool,
}

impl<W: Write> BitPacker<W> {
    /// Create a new packer writing to `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_written: 0,
            bytes_written: 0,
            finished: false,
            poisoned: false,
        }
    }

    /// Total number of code bits accepted so far.
    pub fn bits_written(&self) -> u64 {
        self.total_bits_written
    }

    /// Number of whole bytes handed to the writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Append `width` low bits of `code` to the stream.
    ///
    /// Every complete byte is emitted immediately; at most 7 bits stay
    /// pending afterwards.
    #[inline]
    pub fn put(&mut self, code: u32, width: u8) -> Result<()> {
        check_width(width)?;
        if self.finished {
            return Err(OxiPressError::StreamFinished);
        }

        let mask = if width == 32 {
            u32::MAX
        } else {
            (1u32 << width) - 1
        };
        self.buffer |= u64::from(code & mask) << self.bits_in_buffer;
        self.bits_in_buffer += width;
        self.total_bits_written += u64::from(width);

        self.emit_complete_bytes()
    }

    /// Flush the final partial byte, zero-padding its unused high bits.
    ///
    /// Calling this more than once is a no-op.
    pub fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        if self.bits_in_buffer > 0 {
            let byte = (self.buffer & 0xFF) as u8;
            self.buffer = 0;
            self.bits_in_buffer = 0;
            self.write_all(&[byte])?;
        }

        if let Err(e) = self.writer.flush() {
            self.poisoned = true;
            return Err(e.into());
        }
        Ok(())
    }

    #[inline]
    fn emit_complete_bytes(&mut self) -> Result<()> {
        // At most 32 + 7 pending bits, so five bytes cover every case.
        let mut bytes = [0u8; 5];
        let mut count = 0;
        while self.bits_in_buffer >= 8 {
            bytes[count] = (self.buffer & 0xFF) as u8;
            count += 1;
            self.buffer >>= 8;
            self.bits_in_buffer -= 8;
        }
        if count > 0 {
            self.write_all(&bytes[..count])?;
        }
        Ok(())
    }

    fn write_all(&mut self, bytes: &[u8]) -> Result<()> {
        if let Err(e) = self.writer.write_all(bytes) {
            self.poisoned = true;
            return Err(e.into());
        }
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }
}

impl<W: Write> Drop for BitPacker<W> {
    fn drop(&mut self) {
        if !self.poisoned {
            let _ = self.finish();
        }
    }
}

/// Unpacks variable-width codes from a [`ByteSource`], LSB-first.
#[derive(Debug)]
pub struct BitUnpacker<S: ByteSource> {
    /// Underlying byte source.
    source: S,
    /// Bit accumulator; new bytes are OR-ed in at `bits_in_buffer`.
    buffer: u64,
    /// Number of valid bits in the accumulator.
    bits_in_buffer: u8,
    /// Total bits returned through `get`.
    total_bits_read: u64,
    /// Set once the source reported exhaustion.
    exhausted: bool,
}

impl<S: ByteSource> BitUnpacker<S> {
    /// Create a new unpacker pulling from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            buffer: 0,
            bits_in_buffer: 0,
            total_bits_read: 0,
            exhausted: false,
        }
    }

    /// Get the total number of code bits returned so far.
    pub fn bits_read(&self) -> u64 {
        self.total_bits_read
    }

    /// Read the next `width`-bit code.
    ///
    /// Returns `Ok(None)` when fewer than `width` bits remain before the
    /// source is exhausted. A stream normally ends mid-byte, so the leftover
    /// padding bits are not an error.
    #[inline]
    pub fn get(&mut self, width: u8) -> Result<Option<u32>> {
        check_width(width)?;

        while self.bits_in_buffer < width {
            if self.exhausted {
                return Ok(None);
            }
            match self.source.next_byte()? {
                Some(byte) => {
                    self.buffer |= u64::from(byte) << self.bits_in_buffer;
                    self.bits_in_buffer += 8;
                }
                None => {
                    self.exhausted = true;
                    return Ok(None);
                }
            }
        }

        let mask = (1u64 << width) - 1;
        let code = (self.buffer & mask) as u32;
        self.buffer >>= width;
        self.bits_in_buffer -= width;
        self.total_bits_read += u64::from(width);

        Ok(Some(code))
    }
}
