//! Keystream XOR over input/output block pairs.
//!
//! `InOut` carries separate input and output pointers that may be equal, so
//! the same code serves buffer-to-buffer and in-place calls. Each block is
//! read whole before its output is written.

use crate::{BLOCK_SIZE, Block, error::Error};
use cipher::{
    consts::U64,
    generic_array::{ArrayLength, GenericArray},
    inout::{InOut, InOutBuf},
};
use zeroize::Zeroize;

/// Splits a byte buffer into whole blocks.
///
/// Fails if the buffer length is not a multiple of the block size.
pub(crate) fn into_blocks<'inp, 'out>(
    buf: InOutBuf<'inp, 'out, u8>,
) -> Result<InOutBuf<'inp, 'out, Block>, Error> {
    let len = buf.len();
    let (blocks, tail) = buf.into_chunks::<U64>();
    if !tail.is_empty() {
        return Err(Error::BufferLength {
            expected: len - len % BLOCK_SIZE,
            actual: len,
        });
    }
    Ok(blocks)
}

/// `out = in ^ keystream` for every block of a lane batch, then wipes the
/// keystream.
#[inline(always)]
pub(crate) fn xor_lanes<N>(
    mut blocks: InOut<'_, '_, GenericArray<Block, N>>,
    keystream: &mut GenericArray<Block, N>,
) where
    N: ArrayLength<Block>,
{
    blocks.xor_in2out(keystream);
    for block in keystream.iter_mut() {
        block.as_mut_slice().zeroize();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cipher::consts::U2;

    fn keystream_pattern() -> GenericArray<Block, U2> {
        let mut ks = GenericArray::<Block, U2>::default();
        for (i, byte) in ks.iter_mut().flatten().enumerate() {
            *byte = (i as u8).wrapping_mul(31).wrapping_add(7);
        }
        ks
    }

    #[test]
    fn test_xor_separate_buffers() {
        let input: [u8; 128] = core::array::from_fn(|i| i as u8);
        let mut output = [0u8; 128];
        let expected_ks = keystream_pattern();

        let buf = InOutBuf::new(&input, &mut output).unwrap();
        let (mut chunks, _) = into_blocks(buf).unwrap().into_chunks::<U2>();
        let mut ks = keystream_pattern();
        xor_lanes(chunks.get(0), &mut ks);

        for (i, byte) in output.iter().enumerate() {
            assert_eq!(*byte, input[i] ^ expected_ks[i / 64][i % 64]);
        }
        assert!(ks.iter().flatten().all(|&b| b == 0));
    }

    #[test]
    fn test_xor_in_place_matches_separate() {
        let input: [u8; 128] = core::array::from_fn(|i| (i as u8) ^ 0x5a);
        let mut separate = [0u8; 128];
        let mut in_place = input;

        let buf = InOutBuf::new(&input, &mut separate).unwrap();
        let (mut chunks, _) = into_blocks(buf).unwrap().into_chunks::<U2>();
        xor_lanes(chunks.get(0), &mut keystream_pattern());

        let buf = InOutBuf::from(&mut in_place[..]);
        let (mut chunks, _) = into_blocks(buf).unwrap().into_chunks::<U2>();
        xor_lanes(chunks.get(0), &mut keystream_pattern());

        assert_eq!(separate, in_place);
    }

    #[test]
    fn test_partial_block_is_rejected() {
        let mut buf = [0u8; 100];
        let Err(err) = into_blocks(InOutBuf::from(&mut buf[..])) else {
            panic!("partial block accepted");
        };
        assert_eq!(
            err,
            Error::BufferLength {
                expected: 64,
                actual: 100
            }
        );
    }
}
