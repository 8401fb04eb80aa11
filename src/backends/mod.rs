//! Lane backends: N state copies advanced together, one keystream block per
//! lane.

use crate::{STATE_WORDS, counter};
use cfg_if::cfg_if;
use cipher::{
    BlockSizeUser, ParBlocks, ParBlocksSizeUser, StreamBackend,
    consts::{U1, U2, U4, U64},
};
use zeroize::Zeroize;

cfg_if! {
    if #[cfg(all(feature = "simd", not(chacha20_lanes_force_soft)))] {
        pub(crate) mod simd;
        #[cfg(test)]
        pub(crate) mod soft;
        use self::simd::keystream_lanes;
    } else {
        pub(crate) mod soft;
        use self::soft::keystream_lanes;
    }
}

/// Lane batch of width `LANES` over the caller's authoritative state.
///
/// Every generated block advances the borrowed counter by one, so the state
/// always reflects exactly the blocks handed out.
pub(crate) struct Backend<'a, const LANES: usize>(pub(crate) &'a mut [u32; STATE_WORDS]);

impl<const LANES: usize> BlockSizeUser for Backend<'_, LANES> {
    type BlockSize = U64;
}

macro_rules! lane_tiers {
    ($($lanes:literal => $size:ty),* $(,)?) => {
        $(
            impl ParBlocksSizeUser for Backend<'_, $lanes> {
                type ParBlocksSize = $size;
            }
        )*
    };
}

lane_tiers!(4 => U4, 2 => U2, 1 => U1);

impl<const LANES: usize> StreamBackend for Backend<'_, LANES>
where
    Self: ParBlocksSizeUser,
{
    #[inline]
    fn gen_ks_block(&mut self, block: &mut cipher::Block<Self>) {
        let mut lanes = [[0u32; STATE_WORDS]; 1];
        keystream_lanes(self.0, &mut lanes);
        write_block(&lanes[0], block);
        counter::advance(self.0);
        lanes.zeroize();
    }

    #[inline]
    fn gen_par_ks_blocks(&mut self, blocks: &mut ParBlocks<Self>) {
        let mut lanes = [[0u32; STATE_WORDS]; LANES];
        keystream_lanes(self.0, &mut lanes);
        for (lane, block) in lanes.iter().zip(blocks.iter_mut()) {
            write_block(lane, block);
            counter::advance(self.0);
        }
        lanes.zeroize();
    }
}

/// Serializes one lane's words as 64 little-endian bytes.
#[inline(always)]
fn write_block(lane: &[u32; STATE_WORDS], block: &mut [u8]) {
    for (chunk, word) in block.chunks_exact_mut(4).zip(lane) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}
