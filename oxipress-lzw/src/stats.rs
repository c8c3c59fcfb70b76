//! Run statistics reported by the encoder and decoder.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A point in the code stream where the code width grew.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WidthChange {
    /// Zero-based index of the first code written at the new width.
    pub code_index: u64,
    /// The new width in bits.
    pub bits: u8,
}

/// Statistics for one compression run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EncodeStats {
    /// Uncompressed bytes consumed.
    pub bytes_in: u64,
    /// Compressed bytes produced, header included.
    pub bytes_out: u64,
    /// Codes written to the stream.
    pub codes_emitted: u64,
    /// Total codes assigned: 256 literals, the reserved code, and every
    /// learned sequence.
    pub codes_assigned: u64,
    /// Width the next code would have used.
    pub final_bits: u8,
    /// Width transitions, in stream order.
    pub width_changes: Vec<WidthChange>,
    /// Whether the dictionary filled up during the run.
    pub dictionary_full: bool,
}

/// Statistics for one decompression run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DecodeStats {
    /// Compressed bytes consumed, header included. Trailing padding bits
    /// count as a whole byte.
    pub bytes_in: u64,
    /// Uncompressed bytes produced.
    pub bytes_out: u64,
    /// Codes read from the stream.
    pub codes_read: u64,
    /// Total codes assigned, counted the same way as on the encode side.
    pub codes_assigned: u64,
    /// Maximum code width announced by the header.
    pub max_bits: u8,
    /// Width the next code would have used.
    pub final_bits: u8,
    /// Width transitions, in stream order.
    pub width_changes: Vec<WidthChange>,
}

impl EncodeStats {
    /// Compressed size as a fraction of the input size.
    pub fn ratio(&self) -> f64 {
        ratio(self.bytes_out, self.bytes_in)
    }

    /// Percentage of the input saved by compression.
    pub fn space_savings(&self) -> f64 {
        savings(self.bytes_out, self.bytes_in)
    }
}

impl DecodeStats {
    /// Compressed size as a fraction of the output size.
    pub fn ratio(&self) -> f64 {
        ratio(self.bytes_in, self.bytes_out)
    }

    /// Percentage of the output saved by compression.
    pub fn space_savings(&self) -> f64 {
        savings(self.bytes_in, self.bytes_out)
    }
}

fn ratio(compressed: u64, original: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    compressed as f64 / original as f64
}

fn savings(compressed: u64, original: u64) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (1.0 - compressed as f64 / original as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        let stats = EncodeStats {
            bytes_in: 200,
            bytes_out: 50,
            ..Default::default()
        };
        assert!((stats.ratio() - 0.25).abs() < f64::EPSILON);
        assert!((stats.space_savings() - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_ratio_empty_input() {
        let stats = DecodeStats::default();
        assert_eq!(stats.ratio(), 0.0);
        assert_eq!(stats.space_savings(), 0.0);
    }
}
