//! TY6 scanline decoder.
//!
//! TY6 is the differential bit-packed intensity format used by ROD detector
//! images. A line is laid out as:
//!
//! - one absolute first pixel (bias-127 byte, or a 16/32-bit escape literal)
//! - `(width - 1) / 16` blocks, each a control byte holding two 4-bit field
//!   widths, two packed runs of 8 fields, then any escape literals the block
//!   needs in slot order
//! - `(width - 1) % 16` trailing pixels, one delta byte (or escape) each
//!
//! # Lenient Handling
//!
//! Truncated input is not an error. Decoding stops at the first slot whose
//! bytes are missing and reports how many slots were produced. Slots from
//! there on stay zero.

use super::bits::{FIELDS_PER_RUN, PackedRun, zero_point};
use super::cursor::ByteCursor;
use crate::error::{Result, Ty6Error};

/// Pixels per half-block (one packed run).
pub const HALF_BLOCK: usize = FIELDS_PER_RUN;
/// Pixels per block (one control byte).
pub const BLOCK: usize = 2 * HALF_BLOCK;

/// Bias of the single-byte encoding: byte `b` stands for `b - BIAS`.
pub const BIAS: i32 = 127;
/// Byte marking a following 16-bit literal.
pub const SHORT_OVERFLOW: u8 = 254;
/// Byte marking a following 32-bit literal.
pub const LONG_OVERFLOW: u8 = 255;
/// In-block offsets at or above this are replaced by a 16-bit literal.
pub const SHORT_OVERFLOW_SIGNED: i32 = SHORT_OVERFLOW as i32 - BIAS;
/// In-block offsets at or above this are replaced by a 32-bit literal.
pub const LONG_OVERFLOW_SIGNED: i32 = LONG_OVERFLOW as i32 - BIAS;

/// Outcome of decoding one line into a caller-owned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeStatus {
    /// Requested line width.
    pub width: usize,
    /// Slots holding their final value. Slots at or past this are zero.
    pub produced: usize,
    /// Input bytes read.
    pub consumed: usize,
}

impl DecodeStatus {
    pub fn is_complete(&self) -> bool {
        self.produced == self.width
    }

    /// True when the input ran out before `width` slots were produced.
    pub fn is_truncated(&self) -> bool {
        self.produced < self.width
    }
}

/// A decoded line with its own pixel buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDecode {
    pub pixels: Vec<i32>,
    pub produced: usize,
    pub consumed: usize,
}

impl LineDecode {
    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    pub fn status(&self) -> DecodeStatus {
        DecodeStatus {
            width: self.pixels.len(),
            produced: self.produced,
            consumed: self.consumed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.status().is_complete()
    }

    pub fn is_truncated(&self) -> bool {
        self.status().is_truncated()
    }
}

/// Decode one TY6 line of `width` pixels into a new buffer.
pub fn decode_line(data: &[u8], width: usize) -> LineDecode {
    let mut pixels = vec![0i32; width];
    let status = decode_line_into(data, &mut pixels);
    LineDecode {
        pixels,
        produced: status.produced,
        consumed: status.consumed,
    }
}

/// Decode one TY6 line, rejecting a zero width up front.
pub fn try_decode_line(data: &[u8], width: usize) -> Result<LineDecode> {
    if width == 0 {
        return Err(Ty6Error::InvalidWidth(width));
    }
    Ok(decode_line(data, width))
}

/// Decode one TY6 line into `out`, whose length is the line width.
///
/// `out` is zero-filled first. No allocation takes place.
pub fn decode_line_into(data: &[u8], out: &mut [i32]) -> DecodeStatus {
    out.fill(0);
    let mut cursor = ByteCursor::new(data);
    let produced = decode_slots(&mut cursor, out);
    let status = DecodeStatus {
        width: out.len(),
        produced,
        consumed: cursor.position(),
    };
    if status.is_truncated() {
        tracing::debug!(
            produced,
            width = status.width,
            consumed = status.consumed,
            input_len = data.len(),
            "TY6 line truncated"
        );
    }
    status
}

/// Fill `out` from the cursor, returning the number of final slots.
fn decode_slots(cursor: &mut ByteCursor<'_>, out: &mut [i32]) -> usize {
    let width = out.len();
    if width == 0 {
        return 0;
    }
    let nblock = (width - 1) / BLOCK;
    let nrest = (width - 1) % BLOCK;

    let Some(first) = read_pixel(cursor) else {
        return 0;
    };
    out[0] = first;
    let mut opos = 1;

    for _ in 0..nblock {
        // Provisional offsets stay out of `out` until they are resolved.
        let mut offsets = [0i32; BLOCK];
        let Some(filled) = unpack_block(cursor, &mut offsets, width - opos) else {
            return opos;
        };
        for &provisional in &offsets[..filled] {
            let Some(offset) = resolve_escape(cursor, provisional) else {
                return opos;
            };
            out[opos] = out[opos - 1].wrapping_add(offset);
            opos += 1;
        }
    }

    for _ in 0..nrest {
        if opos >= width {
            break;
        }
        let Some(delta) = read_pixel(cursor) else {
            return opos;
        };
        out[opos] = out[opos - 1].wrapping_add(delta);
        opos += 1;
    }

    opos
}

/// Single-byte pixel: bias-127 byte, or a marker followed by a literal.
#[inline]
fn read_pixel(cursor: &mut ByteCursor<'_>) -> Option<i32> {
    match cursor.read_u8()? {
        LONG_OVERFLOW => cursor.read_i32_le(),
        SHORT_OVERFLOW => cursor.read_i16_le().map(i32::from),
        byte => Some(i32::from(byte) - BIAS),
    }
}

/// Unpack one block's two runs into provisional offsets.
///
/// Returns the number of slots filled, at most `budget`.
fn unpack_block(
    cursor: &mut ByteCursor<'_>,
    offsets: &mut [i32; BLOCK],
    budget: usize,
) -> Option<usize> {
    let bittype = cursor.read_u8()?;
    let widths = [bittype & 0x0F, (bittype >> 4) & 0x0F];

    let mut filled = 0;
    for (half, nbit) in widths.into_iter().enumerate() {
        let run = PackedRun::read(cursor, nbit)?;
        let zero_at = zero_point(nbit);
        let slots = &mut offsets[half * HALF_BLOCK..(half + 1) * HALF_BLOCK];
        for (slot, field) in slots.iter_mut().zip(run.fields()) {
            if filled == budget {
                break;
            }
            *slot = field as i32 - zero_at;
            filled += 1;
        }
    }
    Some(filled)
}

/// Replace an offset in the reserved range with its trailing literal.
#[inline]
fn resolve_escape(cursor: &mut ByteCursor<'_>, offset: i32) -> Option<i32> {
    if offset >= LONG_OVERFLOW_SIGNED {
        cursor.read_i32_le()
    } else if offset >= SHORT_OVERFLOW_SIGNED {
        cursor.read_i16_le().map(i32::from)
    } else {
        Some(offset)
    }
}

/// Decoder that reuses one output buffer across lines of equal width.
#[derive(Debug, Clone)]
pub struct LineDecoder {
    pixels: Vec<i32>,
    last: DecodeStatus,
}

impl LineDecoder {
    pub fn new(width: usize) -> Result<Self> {
        if width == 0 {
            return Err(Ty6Error::InvalidWidth(width));
        }
        Ok(Self {
            pixels: vec![0; width],
            last: DecodeStatus {
                width,
                ..Default::default()
            },
        })
    }

    pub fn width(&self) -> usize {
        self.pixels.len()
    }

    /// Decode the next line, replacing the previous one.
    pub fn decode(&mut self, data: &[u8]) -> DecodeStatus {
        self.last = decode_line_into(data, &mut self.pixels);
        self.last
    }

    /// Pixels of the most recently decoded line.
    pub fn pixels(&self) -> &[i32] {
        &self.pixels
    }

    /// Status of the most recently decoded line.
    pub fn status(&self) -> DecodeStatus {
        self.last
    }
}
