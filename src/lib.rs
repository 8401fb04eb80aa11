//! Multi-lane ChaCha20 keystream core.
//!
//! Applies the ChaCha20 keystream (20 rounds, original "djb" state layout
//! with a 64-bit block counter and a 64-bit nonce) to whole 64-byte blocks.
//! Blocks are processed four lanes at a time, then two, then one, and the
//! output is identical whichever tier handled a given block.
//!
//! Block and lane sizes are expressed with the `cipher` crate's traits, so
//! the lane backends plug into the same `StreamBackend` machinery the
//! RustCrypto stream ciphers use.
//!
//! # Example
//! ```
//! use chacha20_lanes::{CipherState, Key, Nonce};
//!
//! let key = Key::from([0x42; 32]);
//! let nonce = Nonce::from([0x24; 8]);
//!
//! let mut buf = [0u8; 320];
//! let mut state = CipherState::new(&key, &nonce, 0);
//! state.apply_keystream(&mut buf, 5).unwrap();
//! assert_eq!(state.counter(), 5);
//!
//! let mut state = CipherState::new(&key, &nonce, 0);
//! state.apply_keystream(&mut buf, 5).unwrap();
//! assert!(buf.iter().all(|&b| b == 0));
//! ```
//!
//! # Configuration Flags
//!
//! - `simd` feature: portable SIMD round engine (nightly only).
//! - `chacha20_lanes_force_soft` cfg: force the scalar engine even when the
//!   `simd` feature is enabled.

#![no_std]
#![cfg_attr(feature = "simd", feature(portable_simd))]
#![warn(missing_docs, rust_2018_idioms)]
#![allow(clippy::needless_range_loop)]

pub use cipher; // Re-export cipher crate for downstream users

use cipher::{
    consts::{U8, U32, U64},
    generic_array::GenericArray,
};

// --- Components ---

pub(crate) mod backends;
pub mod counter;
pub(crate) mod core;
mod error;
#[cfg_attr(feature = "simd", allow(dead_code))]
pub(crate) mod round;
pub mod state;
pub(crate) mod xor;

pub use crate::core::{CounterPolicy, Transform, transform, transform_in_place};
pub use crate::error::{Error, Result};
pub use crate::state::CipherState;

// --- Constants ---

/// Number of 32-bit words in the cipher state.
pub const STATE_WORDS: usize = 16;

/// Size of one keystream block in bytes.
pub const BLOCK_SIZE: usize = 64;

// --- Convenience Type Aliases for Users ---

/// 256-bit ChaCha20 key.
pub type Key = GenericArray<u8, U32>;

/// 64-bit nonce of the original ChaCha20 layout.
pub type Nonce = GenericArray<u8, U8>;

/// One 64-byte block of keystream, plaintext or ciphertext.
pub type Block = GenericArray<u8, U64>;

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::{CipherState, Key, Nonce};

    #[test]
    fn test_encryption_decryption() {
        let key = Key::from([0x01; 32]);
        let nonce = Nonce::from([0x02; 8]);
        let message = b"This is a test message for the lane keystream xor";
        let mut plaintext = [0u8; 192];
        plaintext[..message.len()].copy_from_slice(message);
        let original_plaintext = plaintext;

        let mut state = CipherState::new(&key, &nonce, 0);
        state.apply_keystream(&mut plaintext, 3).unwrap();
        assert_ne!(original_plaintext, plaintext);

        let mut state = CipherState::new(&key, &nonce, 0);
        state.apply_keystream(&mut plaintext, 3).unwrap();
        assert_eq!(original_plaintext, plaintext);
    }

    #[test]
    fn test_keystream_generation() {
        let key = Key::from([0x03; 32]);
        let nonce = Nonce::from([0x04; 8]);
        let mut data1 = [0u8; 128];
        let mut data2 = [0u8; 128];

        let mut state1 = CipherState::new(&key, &nonce, 0);
        state1.apply_keystream(&mut data1, 2).unwrap();
        let mut state2 = CipherState::new(&key, &nonce, 0);
        state2.apply_keystream(&mut data2[..64], 1).unwrap();

        assert_eq!(data1[..64], data2[..64]);
        assert_ne!(data1[..64], data1[64..]);
    }
}
