//! Bounded forward-only reader over a compressed line.

use byteorder::{ByteOrder, LittleEndian};

/// Forward-only cursor over a byte slice.
///
/// Every read is all-or-nothing: when fewer bytes remain than requested the
/// read returns `None` and the position does not move.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Number of bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Take the next `n` bytes.
    #[inline]
    pub fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        if n > self.remaining() {
            return None;
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Some(bytes)
    }

    #[inline]
    pub fn read_u8(&mut self) -> Option<u8> {
        let byte = *self.data.get(self.pos)?;
        self.pos += 1;
        Some(byte)
    }

    #[inline]
    pub fn read_i16_le(&mut self) -> Option<i16> {
        self.take(2).map(LittleEndian::read_i16)
    }

    #[inline]
    pub fn read_i32_le(&mut self) -> Option<i32> {
        self.take(4).map(LittleEndian::read_i32)
    }
}
