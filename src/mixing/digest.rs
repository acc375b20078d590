//! Streaming digest used to accumulate pool entropy.
//!
//! Raw entropy is folded into a running cryptographic hash rather than
//! buffered, so the pool holds a fixed-size commitment to everything it
//! has ever absorbed, in absorption order.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Hash primitives available for pool accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// BLAKE3 - fast, secure, recommended default.
    #[default]
    Blake3,
    /// SHA-256 - widely deployed, conservative choice.
    Sha256,
}

/// Size of derived key material in bytes (both supported hashes emit 32).
pub const KEY_BYTES: usize = 32;

enum DigestState {
    Blake3(blake3::Hasher),
    Sha256(Sha256),
}

/// Incremental digest over the pool's entropy history.
///
/// Bytes fed via [`update`](PoolDigest::update) are absorbed in call
/// order. [`finalize_reset`](PoolDigest::finalize_reset) closes the
/// current absorption window and starts a fresh one under the same
/// algorithm; chaining across windows is the caller's concern.
pub struct PoolDigest {
    algorithm: HashAlgorithm,
    state: DigestState,
}

impl PoolDigest {
    /// Creates an empty digest for the given algorithm.
    pub fn new(algorithm: HashAlgorithm) -> Self {
        let state = match algorithm {
            HashAlgorithm::Blake3 => DigestState::Blake3(blake3::Hasher::new()),
            HashAlgorithm::Sha256 => DigestState::Sha256(Sha256::new()),
        };
        Self { algorithm, state }
    }

    /// Returns the configured algorithm.
    #[inline]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Absorbs bytes into the digest. Zero-length input is a no-op.
    pub fn update(&mut self, bytes: &[u8]) {
        match &mut self.state {
            DigestState::Blake3(h) => {
                h.update(bytes);
            }
            DigestState::Sha256(h) => {
                h.update(bytes);
            }
        }
    }

    /// Finalizes the current window into key material and resets the
    /// digest to its empty state.
    pub fn finalize_reset(&mut self) -> [u8; KEY_BYTES] {
        match &mut self.state {
            DigestState::Blake3(h) => {
                let out = *h.finalize().as_bytes();
                h.reset();
                out
            }
            DigestState::Sha256(h) => {
                let result = h.finalize_reset();
                let mut out = [0u8; KEY_BYTES];
                out.copy_from_slice(&result);
                out
            }
        }
    }
}

impl std::fmt::Debug for PoolDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolDigest")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_update_matches_single_update() {
        for algorithm in [HashAlgorithm::Blake3, HashAlgorithm::Sha256] {
            let mut split = PoolDigest::new(algorithm);
            split.update(b"hello ");
            split.update(b"world");

            let mut whole = PoolDigest::new(algorithm);
            whole.update(b"hello world");

            assert_eq!(split.finalize_reset(), whole.finalize_reset());
        }
    }

    #[test]
    fn test_algorithms_disagree() {
        let mut blake = PoolDigest::new(HashAlgorithm::Blake3);
        let mut sha = PoolDigest::new(HashAlgorithm::Sha256);
        blake.update(b"same input");
        sha.update(b"same input");

        assert_ne!(blake.finalize_reset(), sha.finalize_reset());
    }

    #[test]
    fn test_reset_starts_fresh_window() {
        let mut digest = PoolDigest::new(HashAlgorithm::Blake3);
        digest.update(b"first window");
        let first = digest.finalize_reset();

        digest.update(b"first window");
        let second = digest.finalize_reset();

        // Identical input over a fresh window reproduces the digest.
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut with_empty = PoolDigest::new(HashAlgorithm::Sha256);
        with_empty.update(b"data");
        with_empty.update(&[]);

        let mut without = PoolDigest::new(HashAlgorithm::Sha256);
        without.update(b"data");

        assert_eq!(with_empty.finalize_reset(), without.finalize_reset());
    }
}
