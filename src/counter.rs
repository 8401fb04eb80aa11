//! The 64-bit block counter.
//!
//! Words 12 and 13 of the state hold one little-endian `u64`: word 12 is the
//! low half, word 13 the high half. Advancing past `u64::MAX` wraps to zero.

use crate::STATE_WORDS;
use crate::state::COUNTER_OFFSET;

/// Reads the logical block counter.
#[inline(always)]
pub fn counter(state: &[u32; STATE_WORDS]) -> u64 {
    u64::from(state[COUNTER_OFFSET]) | (u64::from(state[COUNTER_OFFSET + 1]) << 32)
}

/// Overwrites the logical block counter.
#[inline(always)]
pub fn set_counter(state: &mut [u32; STATE_WORDS], value: u64) {
    state[COUNTER_OFFSET] = value as u32;
    state[COUNTER_OFFSET + 1] = (value >> 32) as u32;
}

/// Advances the counter by one block, wrapping at 2^64.
#[inline(always)]
pub fn advance(state: &mut [u32; STATE_WORDS]) {
    set_counter(state, counter(state).wrapping_add(1));
}

/// Blocks that can still be generated after `counter` before it wraps.
#[inline]
pub const fn remaining_blocks(counter: u64) -> u64 {
    u64::MAX - counter
}
