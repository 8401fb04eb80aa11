//! Layout of the 16-word ChaCha20 state.
//!
//! ```text
//! cccccccc  cccccccc  cccccccc  cccccccc
//! kkkkkkkk  kkkkkkkk  kkkkkkkk  kkkkkkkk
//! kkkkkkkk  kkkkkkkk  kkkkkkkk  kkkkkkkk
//! bbbbbbbb  bbbbbbbb  nnnnnnnn  nnnnnnnn
//! ```
//!
//! `c` is the constant "expand 32-byte k", `k` the key, `b` the 64-bit block
//! counter and `n` the nonce. All words are little-endian.

use crate::{BLOCK_SIZE, Key, Nonce, STATE_WORDS, counter, error::Error};
use core::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// "expand 32-byte k"
pub const CONSTANTS: [u32; 4] = [0x6170_7865, 0x3320_646e, 0x7962_2d32, 0x6b20_6574];

pub(crate) const KEY_OFFSET: usize = 4;
pub(crate) const COUNTER_OFFSET: usize = 12;
pub(crate) const NONCE_OFFSET: usize = 14;

/// A caller-owned ChaCha20 state.
///
/// The block counter is the only part the keystream transform changes.
/// The words are wiped when the state is dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[repr(transparent)]
pub struct CipherState([u32; STATE_WORDS]);

impl CipherState {
    /// Lays out `key`, `nonce` and the starting block `counter`.
    pub fn new(key: &Key, nonce: &Nonce, counter: u64) -> Self {
        let mut words = [0u32; STATE_WORDS];
        words[..KEY_OFFSET].copy_from_slice(&CONSTANTS);
        load_le(&mut words[KEY_OFFSET..COUNTER_OFFSET], key);
        load_le(&mut words[NONCE_OFFSET..], nonce);
        counter::set_counter(&mut words, counter);
        Self(words)
    }

    /// Wraps an already laid out state.
    pub const fn from_words(words: [u32; STATE_WORDS]) -> Self {
        Self(words)
    }

    /// Decodes a 64-byte little-endian state.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() != BLOCK_SIZE {
            return Err(Error::StateLength(bytes.len()));
        }
        let mut words = [0u32; STATE_WORDS];
        load_le(&mut words, bytes);
        Ok(Self(words))
    }

    /// Encodes the state as 64 little-endian bytes.
    pub fn to_bytes(&self) -> [u8; BLOCK_SIZE] {
        let mut bytes = [0u8; BLOCK_SIZE];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(&self.0) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        bytes
    }

    /// The raw words.
    pub fn words(&self) -> &[u32; STATE_WORDS] {
        &self.0
    }

    /// Mutable access to the raw words.
    pub fn words_mut(&mut self) -> &mut [u32; STATE_WORDS] {
        &mut self.0
    }

    /// Copies the raw words out; `self` is wiped on drop.
    pub fn into_words(self) -> [u32; STATE_WORDS] {
        self.0
    }

    /// Current block counter.
    pub fn counter(&self) -> u64 {
        counter::counter(&self.0)
    }

    /// XORs `nr_blocks` blocks of keystream into `buf` in place and advances
    /// the counter by `nr_blocks`.
    pub fn apply_keystream(&mut self, buf: &mut [u8], nr_blocks: usize) -> Result<(), Error> {
        crate::core::transform_in_place(&mut self.0, buf, nr_blocks)
    }

    /// Writes `input ^ keystream` to `output` and advances the counter by
    /// `nr_blocks`.
    pub fn apply_keystream_b2b(
        &mut self,
        input: &[u8],
        output: &mut [u8],
        nr_blocks: usize,
    ) -> Result<(), Error> {
        crate::core::transform(&mut self.0, input, output, nr_blocks)
    }
}

impl From<[u32; STATE_WORDS]> for CipherState {
    fn from(words: [u32; STATE_WORDS]) -> Self {
        Self(words)
    }
}

/// Key material stays out of debug output.
impl fmt::Debug for CipherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherState")
            .field("counter", &self.counter())
            .finish_non_exhaustive()
    }
}

fn load_le(words: &mut [u32], bytes: &[u8]) {
    for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
}
