//! Keyed counter-mode byte stream.
//!
//! Output is produced by a ChaCha stream cipher: successive block-counter
//! values encrypted under the current key. The owning pool installs keys;
//! this type only enforces that a (key, counter) pair is never reused by
//! bounding how far the counter may advance under one key.

use rand_chacha::{ChaCha12Rng, ChaCha20Rng, ChaCha8Rng};
use rand_core::{RngCore, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::mixing::KEY_BYTES;

/// Stream ciphers available for output generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CipherAlgorithm {
    /// ChaCha8 - reduced rounds, fastest.
    ChaCha8,
    /// ChaCha12 - middle ground.
    ChaCha12,
    /// ChaCha20 - full rounds, recommended default.
    #[default]
    ChaCha20,
}

/// Cipher block size in bytes.
pub const BLOCK_BYTES: usize = 64;

const WORDS_PER_BLOCK: u128 = 16;
const WORD_BYTES: u128 = 4;

enum CipherState {
    ChaCha8(ChaCha8Rng),
    ChaCha12(ChaCha12Rng),
    ChaCha20(ChaCha20Rng),
}

impl CipherState {
    fn from_key(algorithm: CipherAlgorithm, key: [u8; KEY_BYTES]) -> Self {
        match algorithm {
            CipherAlgorithm::ChaCha8 => Self::ChaCha8(ChaCha8Rng::from_seed(key)),
            CipherAlgorithm::ChaCha12 => Self::ChaCha12(ChaCha12Rng::from_seed(key)),
            CipherAlgorithm::ChaCha20 => Self::ChaCha20(ChaCha20Rng::from_seed(key)),
        }
    }

    fn fill(&mut self, buf: &mut [u8]) {
        match self {
            Self::ChaCha8(rng) => rng.fill_bytes(buf),
            Self::ChaCha12(rng) => rng.fill_bytes(buf),
            Self::ChaCha20(rng) => rng.fill_bytes(buf),
        }
    }

    fn word_pos(&self) -> u128 {
        match self {
            Self::ChaCha8(rng) => rng.get_word_pos(),
            Self::ChaCha12(rng) => rng.get_word_pos(),
            Self::ChaCha20(rng) => rng.get_word_pos(),
        }
    }
}

/// Counter-mode keystream with a per-key output budget.
///
/// Starts unkeyed: no output can be produced until the first
/// [`rekey`](KeyStream::rekey). Rekeying resets the block counter to
/// zero. Callers must check [`spare_bytes`](KeyStream::spare_bytes) and
/// rekey before the budget runs out; requesting more is a contract
/// violation.
pub struct KeyStream {
    algorithm: CipherAlgorithm,
    /// Blocks a single key may produce before a rekey is required.
    block_budget: u64,
    state: Option<CipherState>,
}

impl KeyStream {
    /// Creates an unkeyed stream for the given cipher and budget.
    pub fn new(algorithm: CipherAlgorithm, block_budget: u64) -> Self {
        Self {
            algorithm,
            block_budget,
            state: None,
        }
    }

    /// Returns the configured cipher.
    #[inline]
    pub fn algorithm(&self) -> CipherAlgorithm {
        self.algorithm
    }

    /// Returns true once a key has been installed.
    #[inline]
    pub fn is_keyed(&self) -> bool {
        self.state.is_some()
    }

    /// Installs a new key and resets the block counter to zero.
    pub fn rekey(&mut self, key: [u8; KEY_BYTES]) {
        self.state = Some(CipherState::from_key(self.algorithm, key));
        tracing::debug!(cipher = ?self.algorithm, "Keystream rekeyed");
    }

    /// Whole blocks consumed under the current key.
    pub fn blocks_used(&self) -> u64 {
        match &self.state {
            Some(state) => state.word_pos().div_ceil(WORDS_PER_BLOCK) as u64,
            None => 0,
        }
    }

    /// Bytes that may still be produced under the current key without
    /// exceeding the block budget. Zero when unkeyed.
    pub fn spare_bytes(&self) -> u64 {
        let Some(state) = &self.state else {
            return 0;
        };
        let total_words = self.block_budget as u128 * WORDS_PER_BLOCK;
        let spare_words = total_words.saturating_sub(state.word_pos());
        u64::try_from(spare_words * WORD_BYTES).unwrap_or(u64::MAX)
    }

    /// Emits `buf.len()` keystream bytes, advancing the counter.
    ///
    /// # Panics
    ///
    /// Panics if the stream is unkeyed or the request exceeds
    /// [`spare_bytes`](KeyStream::spare_bytes); both are caller contract
    /// violations, not recoverable conditions.
    pub fn generate(&mut self, buf: &mut [u8]) {
        assert!(
            buf.len() as u128 <= self.spare_bytes() as u128,
            "keystream request of {} bytes exceeds remaining key budget",
            buf.len()
        );
        let state = self.state.as_mut().expect("keystream has no key installed");
        state.fill(buf);
    }
}

impl std::fmt::Debug for KeyStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyStream")
            .field("algorithm", &self.algorithm)
            .field("block_budget", &self.block_budget)
            .field("keyed", &self.is_keyed())
            .finish()
    }
}
