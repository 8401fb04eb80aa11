//! Portable SIMD implementation.
//!
//! Each lane is held as four `u32x4` rows. The column round works on whole
//! rows; the diagonal round first rotates rows 1, 2 and 3 left by one, two
//! and three words so the diagonals line up as columns, then rotates them
//! back.

use crate::{STATE_WORDS, counter, round::DOUBLE_ROUNDS};
use core::simd::prelude::*;
use zeroize::Zeroize;

type Rows = [u32x4; 4];

/// Computes one keystream block per lane; lane `i` uses counter `base + i`.
#[inline(always)]
pub(crate) fn keystream_lanes<const LANES: usize>(
    state: &[u32; STATE_WORDS],
    out: &mut [[u32; STATE_WORDS]; LANES],
) {
    let base = counter::counter(state);
    let mut init = [[u32x4::splat(0); 4]; LANES];
    for (lane, rows) in init.iter_mut().enumerate() {
        let mut lane_state = *state;
        counter::set_counter(&mut lane_state, base.wrapping_add(lane as u64));
        *rows = load(&lane_state);
        lane_state.zeroize();
    }

    let mut x = init;
    for _ in 0..DOUBLE_ROUNDS {
        for rows in x.iter_mut() {
            double_round(rows);
        }
    }

    // feed-forward
    for ((rows, init_rows), words) in x.iter_mut().zip(&init).zip(out.iter_mut()) {
        for (r, (row, init_row)) in rows.iter_mut().zip(init_rows).enumerate() {
            *row += *init_row;
            row.copy_to_slice(&mut words[4 * r..4 * r + 4]);
        }
    }

    for row in x.iter_mut().chain(init.iter_mut()).flatten() {
        row.as_mut_array().zeroize();
    }
}

#[inline(always)]
fn load(state: &[u32; STATE_WORDS]) -> Rows {
    [
        u32x4::from_slice(&state[0..4]),
        u32x4::from_slice(&state[4..8]),
        u32x4::from_slice(&state[8..12]),
        u32x4::from_slice(&state[12..16]),
    ]
}

#[inline(always)]
fn rotate_left<const N: u32>(v: u32x4) -> u32x4 {
    (v << u32x4::splat(N)) | (v >> u32x4::splat(32 - N))
}

#[inline(always)]
fn quarter_round(v: &mut Rows) {
    v[0] += v[1];
    v[3] ^= v[0];
    v[3] = rotate_left::<16>(v[3]);

    v[2] += v[3];
    v[1] ^= v[2];
    v[1] = rotate_left::<12>(v[1]);

    v[0] += v[1];
    v[3] ^= v[0];
    v[3] = rotate_left::<8>(v[3]);

    v[2] += v[3];
    v[1] ^= v[2];
    v[1] = rotate_left::<7>(v[1]);
}

#[inline(always)]
fn double_round(v: &mut Rows) {
    quarter_round(v);

    v[1] = simd_swizzle!(v[1], [1, 2, 3, 0]);
    v[2] = simd_swizzle!(v[2], [2, 3, 0, 1]);
    v[3] = simd_swizzle!(v[3], [3, 0, 1, 2]);

    quarter_round(v);

    v[1] = simd_swizzle!(v[1], [3, 0, 1, 2]);
    v[2] = simd_swizzle!(v[2], [2, 3, 0, 1]);
    v[3] = simd_swizzle!(v[3], [1, 2, 3, 0]);
}
