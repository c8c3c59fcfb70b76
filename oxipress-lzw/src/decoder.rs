//! LZW decoder (decompression).
//!
//! The decoder rebuilds the encoder's dictionary from the code stream alone.
//! It learns each entry one code later than the encoder did, which is why a
//! code may arrive one step before its definition: the KwKwK case, resolved
//! as the previous sequence followed by its own first byte.

use crate::config::Code;
use crate::dictionary::{CodeWidth, DecodeDictionary};
use crate::error::{LzwError, Result};
use crate::header::{HEADER_LEN, Header};
use crate::stats::{DecodeStats, WidthChange};
use oxipress_core::{BitUnpacker, ByteSource, SliceSource};
use std::io::Write;

/// LZW decoder for decompression.
///
/// The maximum code width comes from the stream header, so the decoder
/// needs no configuration.
#[derive(Debug, Clone, Default)]
pub struct LzwDecoder {
    /// Header of the most recently decoded stream.
    header: Option<Header>,
}

impl LzwDecoder {
    /// Create a new LZW decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Header of the last stream this decoder read, if any.
    pub fn header(&self) -> Option<&Header> {
        self.header.as_ref()
    }

    /// Decompress an in-memory buffer.
    pub fn decode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len().saturating_mul(2));
        self.decode_stream(SliceSource::new(input), &mut output)?;
        Ok(output)
    }

    /// Decompress the stream `source` yields into `sink`.
    ///
    /// The header is validated before anything is written to `sink`. After
    /// that, output is written code by code; if a corrupt code is found the
    /// sink holds whatever was decoded up to that point.
    ///
    /// Decoding stops when fewer bits remain than the current code width,
    /// which is how every well-formed stream ends.
    pub fn decode_stream<S, W>(&mut self, mut source: S, mut sink: W) -> Result<DecodeStats>
    where
        S: ByteSource,
        W: Write,
    {
        self.header = None;
        let header = Header::read(&mut source)?;
        let config = header.config()?;
        self.header = Some(header);

        let mut unpacker = BitUnpacker::new(source);
        let mut dict = DecodeDictionary::new(&config);
        let mut width = CodeWidth::new(&config);
        let mut stats = DecodeStats {
            max_bits: config.max_bits(),
            ..Default::default()
        };

        let mut prev: Option<Code> = None;
        // Width grown after the last code, recorded once a code is read at it.
        let mut pending_width: Option<u8> = None;

        while let Some(code) = unpacker.get(width.bits())? {
            let index = stats.codes_read;
            stats.codes_read += 1;

            if let Some(bits) = pending_width.take() {
                stats.width_changes.push(WidthChange {
                    code_index: index,
                    bits,
                });
            }

            let next_code = dict.next_code() as Code;
            let invalid = move || LzwError::InvalidCode {
                code,
                index,
                next_code,
            };

            // First byte of the sequence `code` stands for.
            let first = match (dict.get(code), prev) {
                (Some(sequence), _) => sequence[0],
                (None, Some(prev)) if u64::from(code) == dict.next_code() => {
                    // KwKwK: the previous sequence plus its own first byte.
                    dict.get(prev).ok_or_else(invalid)?[0]
                }
                (None, _) => return Err(invalid()),
            };

            if let Some(prev) = prev
                && !dict.is_full()
            {
                let prefix = dict.get(prev).ok_or_else(invalid)?;
                let mut entry = Vec::with_capacity(prefix.len() + 1);
                entry.extend_from_slice(prefix);
                entry.push(first);
                dict.insert(entry);
            }

            let sequence = dict.get(code).ok_or_else(invalid)?;
            sink.write_all(sequence)?;
            stats.bytes_out += sequence.len() as u64;

            // The decoder trails the encoder by one entry, so the next code
            // may be the one it has not learned yet.
            if width.advance(dict.next_code()) {
                pending_width = Some(width.bits());
            }

            prev = Some(code);
        }

        sink.flush()?;

        stats.bytes_in = HEADER_LEN as u64 + unpacker.bits_read().div_ceil(8);
        stats.codes_assigned = dict.next_code();
        stats.final_bits = width.bits();

        log::debug!(
            "decoded {} codes into {} bytes (final width {})",
            stats.codes_read,
            stats.bytes_out,
            stats.final_bits
        );

        Ok(stats)
    }
}
