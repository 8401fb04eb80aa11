use crate::{
    BLOCK_SIZE, Block, STATE_WORDS,
    backends::Backend,
    counter,
    error::Error,
    xor::{into_blocks, xor_lanes},
};
use cipher::{ParBlocks, StreamBackend, consts::U64, inout::InOutBuf, typenum::Unsigned};
use tracing::{debug, trace};

/// What happens when a call would carry the block counter past `u64::MAX`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CounterPolicy {
    /// Wrap silently to zero. Never exceeding 2^64 blocks under one
    /// key/nonce pair is the caller's responsibility.
    #[default]
    Wrapping,
    /// Reject the call, before touching state or output, if the counter
    /// cannot advance by the requested block count without wrapping.
    Checked,
}

/// The keystream transform: tiered 4/2/1-lane dispatch over whole blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct Transform {
    policy: CounterPolicy,
}

impl Transform {
    /// Creates a transform with the given counter policy.
    pub const fn new(policy: CounterPolicy) -> Self {
        Self { policy }
    }

    /// The configured counter policy.
    pub const fn policy(&self) -> CounterPolicy {
        self.policy
    }

    /// XORs `nr_blocks` blocks of keystream from `state` into `buf` and
    /// advances the state's counter by `nr_blocks`.
    ///
    /// `buf` must hold exactly `nr_blocks * 64` bytes. All preconditions are
    /// checked first; on error neither `state` nor the output is modified.
    pub fn apply(
        &self,
        state: &mut [u32; STATE_WORDS],
        buf: InOutBuf<'_, '_, u8>,
        nr_blocks: usize,
    ) -> Result<(), Error> {
        let start = counter::counter(state);
        if let Err(err) = self.check(start, buf.len(), nr_blocks) {
            debug!(?err, nr_blocks, len = buf.len(), "rejected keystream transform");
            return Err(err);
        }
        let blocks = into_blocks(buf)?;
        trace!(nr_blocks, counter = start, "applying keystream");

        let tail = run_tier(&mut Backend::<4>(&mut *state), blocks);
        let tail = run_tier(&mut Backend::<2>(&mut *state), tail);
        let tail = run_tier(&mut Backend::<1>(&mut *state), tail);
        debug_assert!(tail.is_empty());
        debug_assert_eq!(counter::counter(state), start.wrapping_add(nr_blocks as u64));
        Ok(())
    }

    fn check(&self, counter: u64, len: usize, nr_blocks: usize) -> Result<(), Error> {
        let expected = nr_blocks
            .checked_mul(BLOCK_SIZE)
            .ok_or(Error::BlockCountOverflow(nr_blocks))?;
        if len != expected {
            return Err(Error::BufferLength {
                expected,
                actual: len,
            });
        }
        if self.policy == CounterPolicy::Checked {
            let blocks = nr_blocks as u64;
            if blocks > counter::remaining_blocks(counter) {
                return Err(Error::CounterOverflow { counter, blocks });
            }
        }
        Ok(())
    }
}

/// Consumes as many whole lane batches as `blocks` holds and returns the
/// blocks left over for the next, narrower tier.
fn run_tier<'inp, 'out, B>(
    backend: &mut B,
    blocks: InOutBuf<'inp, 'out, Block>,
) -> InOutBuf<'inp, 'out, Block>
where
    B: StreamBackend<BlockSize = U64>,
{
    let (batches, tail) = blocks.into_chunks::<B::ParBlocksSize>();
    if !batches.is_empty() {
        trace!(
            lanes = B::ParBlocksSize::USIZE,
            batches = batches.len(),
            tail = tail.len(),
            "lane tier"
        );
    }
    for batch in batches {
        let mut keystream = ParBlocks::<B>::default();
        backend.gen_par_ks_blocks(&mut keystream);
        xor_lanes(batch, &mut keystream);
    }
    tail
}

/// Writes `input ^ keystream` for `nr_blocks` blocks into `output`,
/// wrapping the counter silently.
///
/// `input` and `output` must both be exactly `nr_blocks * 64` bytes long.
pub fn transform(
    state: &mut [u32; STATE_WORDS],
    input: &[u8],
    output: &mut [u8],
    nr_blocks: usize,
) -> Result<(), Error> {
    let (in_len, out_len) = (input.len(), output.len());
    let mismatch = Error::LengthMismatch {
        input: in_len,
        output: out_len,
    };
    if in_len != out_len {
        debug!(?mismatch, "rejected keystream transform");
        return Err(mismatch);
    }
    let buf = InOutBuf::new(input, output).map_err(|_| mismatch)?;
    Transform::default().apply(state, buf, nr_blocks)
}

/// XORs `nr_blocks` blocks of keystream into `buf` in place, wrapping the
/// counter silently.
pub fn transform_in_place(
    state: &mut [u32; STATE_WORDS],
    buf: &mut [u8],
    nr_blocks: usize,
) -> Result<(), Error> {
    Transform::default().apply(state, buf.into(), nr_blocks)
}
