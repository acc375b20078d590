//! Counter-mode output generation.
//!
//! This module produces the actual pseudorandom bytes: a ChaCha-based
//! keystream keyed from pool digests, with strict no-counter-reuse
//! accounting.

mod stream;

pub use stream::{CipherAlgorithm, KeyStream, BLOCK_BYTES};
