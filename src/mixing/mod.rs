//! Entropy accumulation via streaming cryptographic digests.
//!
//! This module turns an arbitrary ordered sequence of raw entropy inputs
//! into fixed-size key material. It uses well-established hash functions
//! to remove bias and correlations; input quality is never inspected.

mod digest;
mod pool;

pub use digest::{HashAlgorithm, PoolDigest, KEY_BYTES};
pub use pool::EntropyPool;
