//! Property tests for TY6 decoding over arbitrary input.
//!
//! Any byte sequence is a valid (possibly truncated) line, so random input
//! exercises every branch: escapes, wide runs and short reads.

use proptest::prelude::*;

use ty6_core::ty6::{decode_line, decode_line_into};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_output_shape(
        data in proptest::collection::vec(any::<u8>(), 0..400),
        width in 1usize..120,
    ) {
        let line = decode_line(&data, width);
        prop_assert_eq!(line.pixels.len(), width);
        prop_assert!(line.produced <= width);
        prop_assert!(line.consumed <= data.len());
        prop_assert!(line.pixels[line.produced..].iter().all(|&v| v == 0));
    }

    #[test]
    fn prop_prefix_determinism(
        data in proptest::collection::vec(any::<u8>(), 0..300),
        width in 1usize..80,
    ) {
        let full = decode_line(&data, width);
        for cut in 0..=data.len() {
            let part = decode_line(&data[..cut], width);
            prop_assert!(part.produced <= full.produced);
            prop_assert!(part.consumed <= cut);
            prop_assert_eq!(&part.pixels[..part.produced], &full.pixels[..part.produced]);
            prop_assert!(part.pixels[part.produced..].iter().all(|&v| v == 0));
        }
    }

    #[test]
    fn prop_stale_buffer_is_irrelevant(
        data in proptest::collection::vec(any::<u8>(), 0..200),
        fill in any::<i32>(),
        width in 1usize..60,
    ) {
        let mut out = vec![fill; width];
        let status = decode_line_into(&data, &mut out);
        let line = decode_line(&data, width);
        prop_assert_eq!(status, line.status());
        prop_assert_eq!(out, line.pixels);
    }

    #[test]
    fn prop_all_zero_blocks_hold_first_pixel(first in 0u8..254, width in 1usize..100) {
        // Control byte 0 means both runs are zero bits wide; 127 is a zero delta.
        let nblock = (width - 1) / 16;
        let nrest = (width - 1) % 16;
        let mut data = vec![first];
        data.extend(std::iter::repeat_n(0u8, nblock));
        data.extend(std::iter::repeat_n(127u8, nrest));

        let line = decode_line(&data, width);
        prop_assert!(line.is_complete());
        prop_assert_eq!(line.consumed, data.len());
        let expected = vec![i32::from(first) - 127; width];
        prop_assert_eq!(line.pixels, expected);
    }
}
