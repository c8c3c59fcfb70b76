//! Byte sources feeding the codecs.
//!
//! The codecs never open files or talk to the console. They pull bytes one at
//! a time from anything implementing [`ByteSource`], which keeps the state
//! machines independent of where the data lives.

use crate::error::Result;
use std::io::{ErrorKind, Read};

/// Size of the internal buffer used by [`ReadSource`].
const READ_BUFFER_SIZE: usize = 8192;

/// A forward-only, exhaustible source of bytes.
pub trait ByteSource {
    /// Pull the next byte, or `None` once the source is exhausted.
    fn next_byte(&mut self) -> Result<Option<u8>>;
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>> {
        (**self).next_byte()
    }
}

/// A byte source over an in-memory slice.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source yielding every byte of `data` in order.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// The bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.pos..]
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>> {
        let byte = self.data.get(self.pos).copied();
        if byte.is_some() {
            self.pos += 1;
        }
        Ok(byte)
    }
}

/// A byte source over any [`Read`] implementation.
///
/// Reads are batched through an internal buffer, so wrapping an unbuffered
/// file or stdin handle is fine.
#[derive(Debug)]
pub struct ReadSource<R: Read> {
    reader: R,
    buffer: Box<[u8]>,
    pos: usize,
    filled: usize,
    total: u64,
    exhausted: bool,
}

impl<R: Read> ReadSource<R> {
    /// Wrap a reader.
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: vec![0u8; READ_BUFFER_SIZE].into_boxed_slice(),
            pos: 0,
            filled: 0,
            total: 0,
            exhausted: false,
        }
    }

    /// Total number of bytes handed out so far.
    pub fn bytes_consumed(&self) -> u64 {
        self.total
    }

    fn refill(&mut self) -> Result<()> {
        loop {
            match self.reader.read(&mut self.buffer) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(());
                }
                Ok(n) => {
                    self.pos = 0;
                    self.filled = n;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
    }
}

impl<R: Read> ByteSource for ReadSource<R> {
    #[inline]
    fn next_byte(&mut self) -> Result<Option<u8>> {
        if self.pos >= self.filled {
            if self.exhausted {
                return Ok(None);
            }
            self.refill()?;
            if self.exhausted {
                return Ok(None);
            }
        }

        let byte = self.buffer[self.pos];
        self.pos += 1;
        self.total += 1;
        Ok(Some(byte))
    }
}

/// Pull up to `count` bytes from `source`.
///
/// Returns fewer than `count` bytes only when the source ran dry.
pub fn read_prefix<S: ByteSource>(source: &mut S, count: usize) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        match source.next_byte()? {
            Some(byte) => out.push(byte),
            None => break,
        }
    }
    Ok(out)
}
