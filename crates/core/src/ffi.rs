//! C ABI entry point.
//!
//! Exposes the line decoder to hosts that share linear memory with this
//! library (C callers, or a WebAssembly embedder that places both buffers in
//! the module's memory before calling `decode_line`).

use crate::codec::ty6::decode_line_into;

/// Decode one TY6 line into a caller-allocated buffer of `width` `i32`s.
///
/// Returns the number of pixels produced. Returns 0 without touching
/// `output` when a pointer is null, `linedata_len` is negative or `width` is
/// less than 1.
///
/// # Safety
///
/// `linedata` must be valid for reads of `linedata_len` bytes and `output`
/// must be valid for writes of `width` `i32`s. The two regions must not
/// overlap.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn decode_line(
    linedata: *const u8,
    linedata_len: i32,
    width: i32,
    output: *mut i32,
) -> i32 {
    if output.is_null() || width < 1 || linedata_len < 0 {
        return 0;
    }
    if linedata.is_null() && linedata_len > 0 {
        return 0;
    }

    let data: &[u8] = if linedata_len == 0 {
        &[]
    } else {
        // SAFETY: non-null and valid for `linedata_len` bytes per the contract.
        unsafe { std::slice::from_raw_parts(linedata, linedata_len as usize) }
    };
    // SAFETY: non-null and valid for `width` writes per the contract.
    let out = unsafe { std::slice::from_raw_parts_mut(output, width as usize) };

    decode_line_into(data, out).produced as i32
}
