//! A pool: entropy accumulator, keystream and trust policy.
//!
//! The pool is where reseed scheduling happens. Entropy additions may
//! trigger scheduled reseeds (cumulative policy); reads enforce the trust
//! policy before any byte is emitted and force rekeys when a key's block
//! budget runs out mid-stream.

use thiserror::Error;

use super::policy::TrustPolicy;
use crate::config::GeneratorConfig;
use crate::keystream::KeyStream;
use crate::mixing::EntropyPool;

/// Steady-state generator errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RandomError {
    /// The pool has not absorbed enough entropy to back the request.
    /// Recoverable: add entropy and retry. No output was written.
    #[error("not enough entropy accumulated to satisfy the request")]
    NotEnoughEntropy,
}

/// One entropy pool with its derived keystream and trust policy.
pub struct Pool {
    entropy: EntropyPool,
    keystream: KeyStream,
    policy: TrustPolicy,
    /// Permanent latch for the cumulative policy.
    trusted: bool,
    /// Set by a barrier: the next read must rekey even where the policy
    /// would have reused the current key.
    key_stale: bool,
}

impl Pool {
    /// Creates an empty pool under the given policy and domain label.
    pub fn new(config: &GeneratorConfig, policy: TrustPolicy, domain: &'static [u8]) -> Self {
        Self {
            entropy: EntropyPool::new(config.hash, domain),
            keystream: KeyStream::new(config.cipher, config.key_block_budget),
            policy,
            trusted: false,
            key_stale: false,
        }
    }

    /// Folds bytes into the pool and runs the scheduled reseed check.
    pub fn add_entropy(&mut self, bytes: &[u8]) {
        self.entropy.add(bytes);
        if let TrustPolicy::Cumulative { reseed_bytes, .. } = self.policy {
            if let Some(key) = self.entropy.reseed_if_ready(reseed_bytes) {
                self.keystream.rekey(key);
                self.update_trust();
            }
        }
    }

    /// Whether the next [`read`](Pool::read) would succeed. Non-mutating.
    pub fn is_ready(&self) -> bool {
        match self.policy {
            TrustPolicy::Cumulative { min_reseeds, .. } => {
                self.trusted || self.entropy.reseed_events() > min_reseeds
            }
            TrustPolicy::PerRead => self.entropy.pending_bytes() > 0,
        }
    }

    /// Cumulative reseed events absorbed by this pool.
    pub fn reseed_events(&self) -> u64 {
        self.entropy.reseed_events()
    }

    /// Marks the current key stale so the next read reseeds first.
    pub fn invalidate_key(&mut self) {
        self.key_stale = true;
    }

    /// Fills `buf` with pseudorandom bytes, or refuses without writing.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        match self.policy {
            TrustPolicy::Cumulative { reseed_bytes, .. } => {
                // Opportunistic: catch pending entropy that small adds
                // left below the threshold.
                if let Some(key) = self.entropy.reseed_if_ready(reseed_bytes) {
                    self.keystream.rekey(key);
                }
                self.update_trust();
                if !self.trusted {
                    tracing::debug!(
                        reseed_events = self.entropy.reseed_events(),
                        "Read refused: pool not yet trusted"
                    );
                    return Err(RandomError::NotEnoughEntropy);
                }
                if self.key_stale {
                    self.force_rekey();
                }
                self.fill(buf);
                Ok(())
            }
            TrustPolicy::PerRead => {
                let Some(key) = self.entropy.reseed_if_ready(1) else {
                    tracing::debug!("Read refused: no fresh entropy since last reseed");
                    return Err(RandomError::NotEnoughEntropy);
                };
                self.keystream.rekey(key);
                self.key_stale = false;
                self.fill(buf);
                Ok(())
            }
        }
    }

    fn update_trust(&mut self) {
        if self.trusted {
            return;
        }
        if let TrustPolicy::Cumulative { min_reseeds, .. } = self.policy {
            if self.entropy.reseed_events() > min_reseeds {
                self.trusted = true;
                tracing::info!(
                    reseed_events = self.entropy.reseed_events(),
                    "Pool crossed its trust threshold"
                );
            }
        }
    }

    fn force_rekey(&mut self) {
        let key = self.entropy.force_reseed();
        self.keystream.rekey(key);
        self.key_stale = false;
    }

    /// Emits keystream bytes, rekeying whenever the per-key block budget
    /// runs out so a (key, counter) pair is never reused.
    fn fill(&mut self, buf: &mut [u8]) {
        let mut filled = 0;
        while filled < buf.len() {
            let spare = self.keystream.spare_bytes();
            if spare == 0 {
                self.force_rekey();
                continue;
            }
            let take = (buf.len() - filled).min(usize::try_from(spare).unwrap_or(usize::MAX));
            self.keystream.generate(&mut buf[filled..filled + take]);
            filled += take;
        }
    }
}

impl std::fmt::Debug for Pool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("policy", &self.policy)
            .field("trusted", &self.trusted)
            .field("key_stale", &self.key_stale)
            .field("reseed_events", &self.entropy.reseed_events())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOMAIN: &[u8] = b"pool-test";

    fn small_config() -> GeneratorConfig {
        GeneratorConfig {
            reseed_bytes: 16,
            min_reseeds: 2,
            ..GeneratorConfig::default()
        }
    }

    fn cumulative(config: &GeneratorConfig) -> Pool {
        let policy = TrustPolicy::Cumulative {
            reseed_bytes: config.reseed_bytes,
            min_reseeds: config.min_reseeds,
        };
        Pool::new(config, policy, DOMAIN)
    }

    fn per_read(config: &GeneratorConfig) -> Pool {
        Pool::new(config, TrustPolicy::PerRead, DOMAIN)
    }

    #[test]
    fn test_cumulative_trust_threshold() {
        let config = small_config();
        let mut pool = cumulative(&config);
        let mut buf = [0u8; 8];

        // min_reseeds = 2 must be strictly exceeded: two adds of one
        // threshold each are not enough, the third is.
        for _ in 0..2 {
            pool.add_entropy(&[0u8; 16]);
            assert_eq!(pool.read(&mut buf), Err(RandomError::NotEnoughEntropy));
        }
        pool.add_entropy(&[0u8; 16]);
        assert_eq!(pool.read(&mut buf), Ok(()));
    }

    #[test]
    fn test_cumulative_refusal_writes_nothing() {
        let config = small_config();
        let mut pool = cumulative(&config);
        let mut buf = [0u8; 32];

        pool.add_entropy(&[0u8; 16]);
        assert!(pool.read(&mut buf).is_err());
        assert_eq!(buf, [0u8; 32]);
    }

    #[test]
    fn test_cumulative_never_fails_once_trusted() {
        let config = small_config();
        let mut pool = cumulative(&config);
        for _ in 0..3 {
            pool.add_entropy(&[0u8; 16]);
        }

        let mut buf = [0u8; 8];
        for _ in 0..100 {
            assert_eq!(pool.read(&mut buf), Ok(()));
        }
    }

    #[test]
    fn test_cumulative_ready_matches_read() {
        let config = small_config();
        let mut pool = cumulative(&config);
        assert!(!pool.is_ready());

        for _ in 0..3 {
            pool.add_entropy(&[0u8; 16]);
        }
        assert!(pool.is_ready());
    }

    #[test]
    fn test_small_adds_aggregate_to_one_reseed() {
        let config = small_config();
        let mut pool = cumulative(&config);

        // Eight adds of two bytes cross the 16-byte threshold once.
        for _ in 0..8 {
            pool.add_entropy(&[0u8; 2]);
        }
        assert_eq!(pool.reseed_events(), 1);
    }

    #[test]
    fn test_per_read_requires_fresh_entropy() {
        let config = small_config();
        let mut pool = per_read(&config);
        let mut buf = [0u8; 8];

        assert_eq!(pool.read(&mut buf), Err(RandomError::NotEnoughEntropy));

        pool.add_entropy(&[1u8; 4]);
        assert_eq!(pool.read(&mut buf), Ok(()));

        // Already consumed: the same entropy cannot back a second read.
        assert_eq!(pool.read(&mut buf), Err(RandomError::NotEnoughEntropy));

        pool.add_entropy(&[2u8; 4]);
        assert_eq!(pool.read(&mut buf), Ok(()));
    }

    #[test]
    fn test_per_read_keys_are_one_off() {
        let config = small_config();
        let mut pool = per_read(&config);
        let mut first = [0u8; 32];
        let mut second = [0u8; 32];

        pool.add_entropy(&[1u8; 4]);
        pool.read(&mut first).unwrap();
        pool.add_entropy(&[1u8; 4]);
        pool.read(&mut second).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn test_block_budget_forces_rekey_mid_read() {
        let config = GeneratorConfig {
            key_block_budget: 1, // one 64-byte block per key
            ..small_config()
        };
        let mut pool = cumulative(&config);
        for _ in 0..3 {
            pool.add_entropy(&[0u8; 16]);
        }

        let mut buf = [0u8; 200];
        assert_eq!(pool.read(&mut buf), Ok(()));
        // More reseeds than the three scheduled ones: the 200-byte read
        // crossed the budget at least twice.
        assert!(pool.reseed_events() > 3);
    }

    #[test]
    fn test_budget_spanning_read_is_deterministic() {
        let config = GeneratorConfig {
            key_block_budget: 1,
            ..small_config()
        };
        let mut a = cumulative(&config);
        let mut b = cumulative(&config);
        for pool in [&mut a, &mut b] {
            for _ in 0..3 {
                pool.add_entropy(&[0u8; 16]);
            }
        }

        let mut out_a = [0u8; 300];
        let mut out_b = [0u8; 300];
        a.read(&mut out_a).unwrap();
        b.read(&mut out_b).unwrap();
        assert_eq!(out_a, out_b);
    }

    #[test]
    fn test_stale_key_is_not_reused() {
        let config = small_config();
        let mut a = cumulative(&config);
        let mut b = cumulative(&config);
        for pool in [&mut a, &mut b] {
            for _ in 0..3 {
                pool.add_entropy(&[0u8; 16]);
            }
        }

        // Twin pools with identical histories; only one is invalidated.
        b.invalidate_key();
        let mut out_a = [0u8; 64];
        let mut out_b = [0u8; 64];
        a.read(&mut out_a).unwrap();
        b.read(&mut out_b).unwrap();

        assert_ne!(out_a, out_b);
    }

    #[test]
    fn test_identical_histories_identical_output() {
        let config = small_config();
        let mut a = per_read(&config);
        let mut b = per_read(&config);

        for pool in [&mut a, &mut b] {
            pool.add_entropy(b"some fixed entropy");
        }
        let mut out_a = [0u8; 128];
        let mut out_b = [0u8; 128];
        a.read(&mut out_a).unwrap();
        b.read(&mut out_b).unwrap();

        assert_eq!(out_a, out_b);
    }
}
