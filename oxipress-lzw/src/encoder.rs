//! LZW encoder (compression).

use crate::config::{Code, LzwConfig};
use crate::dictionary::{CodeWidth, EncodeDictionary};
use crate::error::Result;
use crate::header::{HEADER_LEN, Header};
use crate::stats::{EncodeStats, WidthChange};
use oxipress_core::{BitPacker, ByteSource, SliceSource};
use std::io::Write;

/// LZW encoder for compression.
///
/// Each call to [`LzwEncoder::encode_stream`] compresses one complete
/// stream with a fresh dictionary; nothing carries over between calls.
#[derive(Debug, Clone)]
pub struct LzwEncoder {
    config: LzwConfig,
}

impl LzwEncoder {
    /// Create a new LZW encoder with the given configuration.
    pub fn new(config: LzwConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration this encoder writes into its headers.
    pub fn config(&self) -> &LzwConfig {
        &self.config
    }

    /// Compress an in-memory buffer.
    pub fn encode(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(input.len() / 2 + HEADER_LEN + 2);
        self.encode_stream(SliceSource::new(input), &mut output)?;
        Ok(output)
    }

    /// Compress everything `source` yields into `sink`.
    ///
    /// # Algorithm
    ///
    /// The encoder tracks the code of the longest prefix of the pending input
    /// that the dictionary knows. For each byte `c`:
    ///
    /// 1. If the prefix followed by `c` is known, that becomes the prefix.
    /// 2. Otherwise the extended sequence is learned under the next free code
    ///    (unless the table is full), the prefix's code is written at the
    ///    current width, the width is grown if the next code may not fit,
    ///    and `c` alone becomes the new prefix.
    ///
    /// At end of input the pending prefix, if any, is written. The partial
    /// last byte is flushed on every exit path, including errors from the
    /// source.
    pub fn encode_stream<S, W>(&mut self, mut source: S, mut sink: W) -> Result<EncodeStats>
    where
        S: ByteSource,
        W: Write,
    {
        Header::for_config(&self.config).write(&mut sink)?;

        let mut packer = BitPacker::new(sink);
        let mut dict = EncodeDictionary::new(&self.config);
        let mut width = CodeWidth::new(&self.config);
        let mut stats = EncodeStats::default();

        // Code of the longest known prefix of the unemitted input.
        let mut current: Option<Code> = None;

        while let Some(byte) = source.next_byte()? {
            stats.bytes_in += 1;

            let prefix = match current {
                Some(prefix) => prefix,
                None => {
                    current = Some(EncodeDictionary::literal(byte));
                    continue;
                }
            };

            if let Some(code) = dict.extend(prefix, byte) {
                current = Some(code);
                continue;
            }

            dict.insert(prefix, byte);

            packer.put(prefix, width.bits())?;
            stats.codes_emitted += 1;

            // The entry just learned is the highest code the next emission
            // can reference.
            if width.advance(dict.next_code() - 1) {
                stats.width_changes.push(WidthChange {
                    code_index: stats.codes_emitted,
                    bits: width.bits(),
                });
            }

            current = Some(EncodeDictionary::literal(byte));
        }

        if let Some(code) = current {
            packer.put(code, width.bits())?;
            stats.codes_emitted += 1;
        }

        packer.finish()?;

        stats.bytes_out = HEADER_LEN as u64 + packer.bytes_written();
        stats.codes_assigned = dict.next_code();
        stats.final_bits = width.bits();
        stats.dictionary_full = dict.is_full();

        log::debug!(
            "encoded {} bytes into {} ({} codes, {} learned, final width {})",
            stats.bytes_in,
            stats.bytes_out,
            stats.codes_emitted,
            dict.learned(),
            stats.final_bits
        );

        Ok(stats)
    }
}

impl Default for LzwEncoder {
    fn default() -> Self {
        Self {
            config: LzwConfig::DEFAULT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::LzwDecoder;
    use oxipress_core::{BitUnpacker, OxiPressError};

    /// Read back every code of a stream, assuming the widths in `stats`.
    fn codes_of(compressed: &[u8], stats: &EncodeStats) -> Vec<u32> {
        let mut unpacker = BitUnpacker::new(SliceSource::new(&compressed[HEADER_LEN..]));
        let mut changes = stats.width_changes.iter().peekable();
        let mut bits = 9;
        let mut codes = Vec::new();
        for index in 0..stats.codes_emitted {
            if let Some(change) = changes.peek()
                && change.code_index == index
            {
                bits = change.bits;
                changes.next();
            }
            codes.push(unpacker.get(bits).unwrap().unwrap());
        }
        codes
    }

    #[test]
    fn test_encode_empty() {
        let mut encoder = LzwEncoder::default();
        let compressed = encoder.encode(b"").unwrap();
        assert_eq!(compressed, vec![0x1F, 0x9D, 0x90]);
    }

    #[test]
    fn test_encode_single_byte() {
        let mut encoder = LzwEncoder::default();
        let compressed = encoder.encode(&[0x41]).unwrap();
        // One 9-bit code 0x041, LSB-first, zero padded.
        assert_eq!(compressed, vec![0x1F, 0x9D, 0x90, 0x41, 0x00]);
    }

    #[test]
    fn test_encode_codes_tobeornot() {
        let mut encoder = LzwEncoder::default();
        let mut compressed = Vec::new();
        let stats = encoder
            .encode_stream(SliceSource::new(b"TOBEORNOTTOBEORTOBEORNOT"), &mut compressed)
            .unwrap();

        let expected = vec![
            b'T' as u32,
            b'O' as u32,
            b'B' as u32,
            b'E' as u32,
            b'O' as u32,
            b'R' as u32,
            b'N' as u32,
            b'O' as u32,
            b'T' as u32,
            257, // TO
            259, // BE
            261, // OR
            266, // TOB
            260, // EO
            262, // RN
            264, // OT
        ];
        assert_eq!(codes_of(&compressed, &stats), expected);
        assert_eq!(stats.codes_emitted, 16);
        // 15 learned sequences after 257.
        assert_eq!(stats.codes_assigned, 257 + 15);
    }

    #[test]
    fn test_encode_repeating_run() {
        let mut encoder = LzwEncoder::default();
        let mut compressed = Vec::new();
        let stats = encoder
            .encode_stream(SliceSource::new(b"AAAAAAAAAA"), &mut compressed)
            .unwrap();

        // A, AA, AAA, AAAA -> 1 + 2 + 3 + 4 = 10 bytes in four codes.
        assert_eq!(codes_of(&compressed, &stats), vec![65, 257, 258, 259]);
        assert!(stats.codes_emitted < 10);
    }

    #[test]
    fn test_width_grows_after_code_511() {
        // Every emitted code but the last learns one new entry.
        let data: Vec<u8> = (0..=255u8)
            .flat_map(|a| (0..=255u8).map(move |b| [a, b]))
            .flatten()
            .take(2000)
            .collect();

        let mut encoder = LzwEncoder::default();
        let mut compressed = Vec::new();
        let stats = encoder
            .encode_stream(SliceSource::new(&data), &mut compressed)
            .unwrap();

        let first = stats.width_changes.first().unwrap();
        assert_eq!(first.bits, 10);
        // After k codes the highest reachable code is 256 + k.
        assert_eq!(first.code_index, 256);

        let mut decoder = LzwDecoder::new();
        assert_eq!(decoder.decode(&compressed).unwrap(), data);
    }

    #[test]
    fn test_stats_sizes() {
        let mut encoder = LzwEncoder::default();
        let input = b"This is a test of compression! ".repeat(10);
        let mut compressed = Vec::new();
        let stats = encoder
            .encode_stream(SliceSource::new(&input), &mut compressed)
            .unwrap();
        assert_eq!(stats.bytes_in, 310);
        assert_eq!(stats.bytes_out, compressed.len() as u64);
        assert_eq!(stats.final_bits, 9);
        assert!(!stats.dictionary_full);
    }

    struct FailingSource {
        left: usize,
    }

    impl ByteSource for FailingSource {
        fn next_byte(&mut self) -> oxipress_core::Result<Option<u8>> {
            if self.left == 0 {
                return Err(std::io::Error::other("read failed").into());
            }
            self.left -= 1;
            Ok(Some(b'A' + (self.left % 7) as u8))
        }
    }

    #[test]
    fn test_source_error_still_flushes() {
        let mut encoder = LzwEncoder::default();
        let mut compressed = Vec::new();
        let err = encoder
            .encode_stream(FailingSource { left: 40 }, &mut compressed)
            .unwrap_err();
        assert!(matches!(
            err,
            crate::error::LzwError::Format(OxiPressError::Io(_))
        ));

        // Header plus every code emitted before the failure, no partial byte lost.
        assert!(compressed.len() > HEADER_LEN);
        let mut unpacker = BitUnpacker::new(SliceSource::new(&compressed[HEADER_LEN..]));
        let mut count = 0;
        while unpacker.get(9).unwrap().is_some() {
            count += 1;
        }
        assert_eq!((count * 9usize).div_ceil(8), compressed.len() - HEADER_LEN);
    }
}
