//! Portable implementation which does not rely on architecture-specific
//! intrinsics.
//!
//! Lanes are kept word-sliced (`x[word][lane]`), so each quarter-round step
//! runs across every lane before the next one starts. That is the layout a
//! vector unit wants, and the compiler is free to map it onto one.

use crate::{
    STATE_WORDS, counter,
    round::{DOUBLE_ROUNDS, double_round_with, quarter_round},
};
use zeroize::Zeroize;

/// Computes one keystream block per lane; lane `i` uses counter `base + i`.
#[inline(always)]
pub(crate) fn keystream_lanes<const LANES: usize>(
    state: &[u32; STATE_WORDS],
    out: &mut [[u32; STATE_WORDS]; LANES],
) {
    let mut init = [[0u32; LANES]; STATE_WORDS];
    let base = counter::counter(state);
    for lane in 0..LANES {
        let mut lane_state = *state;
        counter::set_counter(&mut lane_state, base.wrapping_add(lane as u64));
        for (word, value) in init.iter_mut().zip(&lane_state) {
            word[lane] = *value;
        }
        lane_state.zeroize();
    }

    let mut x = init;
    for _ in 0..DOUBLE_ROUNDS {
        double_round_lanes(&mut x);
    }

    // feed-forward
    for (w, (word, init_word)) in x.iter().zip(&init).enumerate() {
        for lane in 0..LANES {
            out[lane][w] = word[lane].wrapping_add(init_word[lane]);
        }
    }

    x.zeroize();
    init.zeroize();
}

#[inline(always)]
fn double_round_lanes<const LANES: usize>(x: &mut [[u32; LANES]; STATE_WORDS]) {
    double_round_with(|[a, b, c, d]| {
        for lane in 0..LANES {
            [x[a][lane], x[b][lane], x[c][lane], x[d][lane]] =
                quarter_round([x[a][lane], x[b][lane], x[c][lane], x[d][lane]]);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::round::double_round;

    #[test]
    fn test_rfc8439_block_function() {
        // RFC 8439, section 2.3.2 (IETF layout: 32-bit counter 1, 96-bit nonce)
        #[rustfmt::skip]
        let state = [
            0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574,
            0x0302_0100, 0x0706_0504, 0x0b0a_0908, 0x0f0e_0d0c,
            0x1312_1110, 0x1716_1514, 0x1b1a_1918, 0x1f1e_1d1c,
            0x0000_0001, 0x0900_0000, 0x4a00_0000, 0x0000_0000,
        ];
        #[rustfmt::skip]
        let expected = [
            0xe4e7_f110, 0x1559_3bd1, 0x1fdd_0f50, 0xc471_20a3,
            0xc7f4_d1c7, 0x0368_c033, 0x9aaa_2204, 0x4e6c_d4c3,
            0x4664_82d2, 0x09aa_9f07, 0x05d7_c214, 0xa202_8bd9,
            0xd19c_12b5, 0xb94e_16de, 0xe883_d0cb, 0x4e3c_50a2,
        ];
        let mut out = [[0u32; STATE_WORDS]; 1];
        keystream_lanes(&state, &mut out);
        assert_eq!(out[0], expected);
    }

    #[test]
    fn test_sliced_rounds_match_plain_rounds() {
        let mut plain: [u32; STATE_WORDS] =
            core::array::from_fn(|i| (i as u32).wrapping_mul(0x9e37_79b9));
        let mut sliced = [[0u32; 2]; STATE_WORDS];
        for (word, value) in sliced.iter_mut().zip(plain) {
            *word = [value, value];
        }

        double_round(&mut plain);
        double_round_lanes(&mut sliced);

        for (word, value) in sliced.iter().zip(plain) {
            assert_eq!(*word, [value, value]);
        }
    }
}
