/// Contract violations reported by the keystream transform.
///
/// Every check runs before the state or the output buffer is touched, so an
/// `Err` leaves both exactly as they were.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A buffer does not hold exactly `nr_blocks * 64` bytes.
    #[error("buffer holds {actual} bytes, expected {expected} for the requested block count")]
    BufferLength {
        /// `nr_blocks * 64`.
        expected: usize,
        /// Length of the buffer that was passed.
        actual: usize,
    },
    /// Input and output buffers differ in length.
    #[error("input ({input} bytes) and output ({output} bytes) differ in length")]
    LengthMismatch {
        /// Input length.
        input: usize,
        /// Output length.
        output: usize,
    },
    /// The requested block count does not fit in an addressable byte length.
    #[error("{0} blocks exceed the addressable buffer size")]
    BlockCountOverflow(usize),
    /// A byte-encoded state is not exactly 64 bytes.
    #[error("cipher state must be 64 bytes, got {0}")]
    StateLength(usize),
    /// The block counter would wrap past 2^64 under [`CounterPolicy::Checked`].
    ///
    /// [`CounterPolicy::Checked`]: crate::CounterPolicy::Checked
    #[error("counter {counter} cannot advance by {blocks} blocks without wrapping")]
    CounterOverflow {
        /// Counter value before the call.
        counter: u64,
        /// Number of blocks requested.
        blocks: u64,
    },
}

/// Result alias for this crate.
pub type Result<T> = core::result::Result<T, Error>;
