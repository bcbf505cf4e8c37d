//! Packed fixed-width field runs.
//!
//! A run of `nbit` bytes holds [`FIELDS_PER_RUN`] unsigned fields of `nbit`
//! bits each, little-endian, least-significant field first. With `nbit` up to
//! 15 a run spans 120 bits, so the accumulator is a `u128`.

use byteorder::{ByteOrder, LittleEndian};

use super::cursor::ByteCursor;

/// Number of fields packed into one run.
pub const FIELDS_PER_RUN: usize = 8;

/// Widest field width a 4-bit control nibble can select.
pub const MAX_FIELD_BITS: u8 = 15;

/// One run of eight `nbit`-wide fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedRun {
    acc: u128,
    nbit: u8,
}

impl PackedRun {
    /// Assemble a run from its `nbit` little-endian bytes.
    pub fn from_le_bytes(bytes: &[u8]) -> Self {
        debug_assert!(bytes.len() <= MAX_FIELD_BITS as usize);
        let acc = if bytes.is_empty() {
            0
        } else {
            LittleEndian::read_uint128(bytes, bytes.len())
        };
        Self {
            acc,
            nbit: bytes.len() as u8,
        }
    }

    /// Read a run of `nbit` bytes from the cursor.
    ///
    /// Returns `None` if fewer than `nbit` bytes remain.
    pub fn read(cursor: &mut ByteCursor<'_>, nbit: u8) -> Option<Self> {
        cursor.take(nbit as usize).map(Self::from_le_bytes)
    }

    #[inline]
    pub fn nbit(&self) -> u8 {
        self.nbit
    }

    /// Raw value of field `index` (0 = least significant).
    #[inline]
    pub fn field(&self, index: usize) -> u32 {
        debug_assert!(index < FIELDS_PER_RUN);
        let nbit = u32::from(self.nbit);
        let mask = (1u128 << nbit) - 1;
        ((self.acc >> (nbit * index as u32)) & mask) as u32
    }

    pub fn fields(self) -> impl Iterator<Item = u32> {
        (0..FIELDS_PER_RUN).map(move |index| self.field(index))
    }
}

/// Midpoint subtracted from an unsigned `nbit` field to recenter it.
#[inline]
pub fn zero_point(nbit: u8) -> i32 {
    if nbit > 1 { (1 << (nbit - 1)) - 1 } else { 0 }
}
