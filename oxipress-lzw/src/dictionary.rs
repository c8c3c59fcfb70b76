//! LZW dictionaries and the code-width policy.
//!
//! The encoder and decoder each keep their own view of the same table. The
//! encoder asks "which code extends this prefix by one byte?", the decoder
//! asks "which bytes does this code stand for?". Both views start with the
//! 256 literal codes, leave code 256 unused, and hand out 257, 258, ... in
//! the same order, so at every step they agree on every assigned code.

use crate::config::{Code, FIRST_CODE, LITERAL_CODES, LzwConfig, MIN_BITS, RESERVED_CODE};
use std::collections::HashMap;

/// Current code width and the rule for growing it.
///
/// Both state machines call [`CodeWidth::advance`] after every code with the
/// highest code the *next* code could possibly carry. The width grows while
/// that code does not fit:
///
/// ```text
/// while bits < max_bits && highest_reachable >= 1 << bits { bits += 1 }
/// ```
///
/// The encoder has already inserted the entry for its next emission when it
/// advances, so it passes `next_code - 1`. The decoder inserts one step
/// later and may see that very code (the KwKwK case), so it passes
/// `next_code`. Both values are `256 + k` after the `k`-th code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeWidth {
    bits: u8,
    max_bits: u8,
}

impl CodeWidth {
    /// Start at 9 bits.
    pub fn new(config: &LzwConfig) -> Self {
        Self {
            bits: MIN_BITS,
            max_bits: config.max_bits(),
        }
    }

    /// Width for the next code.
    pub fn bits(&self) -> u8 {
        self.bits
    }

    /// Whether the width has reached its ceiling.
    pub fn is_max(&self) -> bool {
        self.bits >= self.max_bits
    }

    /// Grow the width so that `highest_reachable` fits.
    ///
    /// Returns `true` when the width changed.
    pub fn advance(&mut self, highest_reachable: u64) -> bool {
        let before = self.bits;
        while self.bits < self.max_bits && highest_reachable >= 1u64 << self.bits {
            self.bits += 1;
        }
        if self.bits != before {
            log::debug!(
                "code width {} -> {} at code {}",
                before,
                self.bits,
                highest_reachable
            );
            true
        } else {
            false
        }
    }
}

/// Encoder view: (prefix code, next byte) -> code.
///
/// A sequence is identified by the code of its longest proper prefix plus
/// its final byte, so no byte strings are stored or hashed.
#[derive(Debug)]
pub struct EncodeDictionary {
    /// Learned sequences keyed by (prefix code, appended byte).
    entries: HashMap<(Code, u8), Code>,
    /// Next code to assign.
    next_code: u64,
    /// One past the largest assignable code.
    limit: u64,
}

impl EncodeDictionary {
    /// Create a dictionary holding only the 256 literals.
    pub fn new(config: &LzwConfig) -> Self {
        let limit = config.table_capacity();
        let expected = limit.saturating_sub(u64::from(FIRST_CODE)).min(1 << 16) as usize;
        Self {
            entries: HashMap::with_capacity(expected),
            next_code: u64::from(FIRST_CODE),
            limit,
        }
    }

    /// Code of the single-byte sequence `byte`.
    #[inline]
    pub fn literal(byte: u8) -> Code {
        Code::from(byte)
    }

    /// Code of the sequence `prefix` followed by `byte`, if it is known.
    #[inline]
    pub fn extend(&self, prefix: Code, byte: u8) -> Option<Code> {
        self.entries.get(&(prefix, byte)).copied()
    }

    /// Learn `prefix` followed by `byte` under the next free code.
    ///
    /// Returns `None` once the table is full; the dictionary then stays
    /// frozen for the rest of the stream.
    pub fn insert(&mut self, prefix: Code, byte: u8) -> Option<Code> {
        if self.is_full() {
            return None;
        }
        let code = self.next_code as Code;
        self.entries.insert((prefix, byte), code);
        self.next_code += 1;
        if self.is_full() {
            log::debug!("encode dictionary full at {} codes", self.next_code);
        }
        Some(code)
    }

    /// Next code that would be assigned.
    pub fn next_code(&self) -> u64 {
        self.next_code
    }

    /// Whether every code up to the maximum has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_code >= self.limit
    }

    /// Number of learned (multi-byte) sequences.
    pub fn learned(&self) -> usize {
        self.entries.len()
    }
}

/// Decoder view: code -> byte sequence.
///
/// An arena indexed directly by code. Slot 256 holds an empty placeholder so
/// that indices line up with codes.
#[derive(Debug)]
pub struct DecodeDictionary {
    /// Sequence for each code; empty only at the reserved slot.
    table: Vec<Vec<u8>>,
    /// One past the largest assignable code.
    limit: u64,
}

impl DecodeDictionary {
    /// Create a dictionary holding only the 256 literals.
    pub fn new(config: &LzwConfig) -> Self {
        let limit = config.table_capacity();
        let expected = limit.min(1 << 16) as usize;
        let mut table = Vec::with_capacity(expected);
        for byte in 0..LITERAL_CODES {
            table.push(vec![byte as u8]);
        }
        table.push(Vec::new()); // RESERVED_CODE
        debug_assert_eq!(table.len() as Code, FIRST_CODE);
        Self { table, limit }
    }

    /// Sequence for `code`, if it has been assigned.
    #[inline]
    pub fn get(&self, code: Code) -> Option<&[u8]> {
        if code == RESERVED_CODE {
            return None;
        }
        self.table.get(code as usize).map(Vec::as_slice)
    }

    /// Append a sequence under the next free code.
    ///
    /// Returns `None` once the table is full.
    pub fn insert(&mut self, sequence: Vec<u8>) -> Option<Code> {
        if self.is_full() {
            return None;
        }
        debug_assert!(!sequence.is_empty());
        let code = self.table.len() as Code;
        self.table.push(sequence);
        if self.is_full() {
            log::debug!("decode dictionary full at {} codes", self.table.len());
        }
        Some(code)
    }

    /// Next code that would be assigned.
    pub fn next_code(&self) -> u64 {
        self.table.len() as u64
    }

    /// Whether every code up to the maximum has been assigned.
    pub fn is_full(&self) -> bool {
        self.next_code() >= self.limit
    }
}
