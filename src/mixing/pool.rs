//! Entropy accumulation pool.
//!
//! Tracks how much entropy has arrived since the last key derivation and
//! chains each derived key into the next digest window, so every key
//! depends on the pool's entire input history in order.

use super::digest::{HashAlgorithm, PoolDigest, KEY_BYTES};

/// Accumulates raw entropy into a streaming digest.
///
/// The pool never inspects entropy quality; it only counts bytes and
/// reseed events. Key material leaves the pool exclusively through
/// [`reseed_if_ready`](EntropyPool::reseed_if_ready), which drains the
/// accumulator.
pub struct EntropyPool {
    /// Running digest over the current absorption window.
    digest: PoolDigest,
    /// Domain label chained into every window.
    domain: &'static [u8],
    /// Bytes absorbed since the last successful reseed.
    pending_bytes: u64,
    /// Cumulative count of successful reseeds.
    reseed_events: u64,
}

impl EntropyPool {
    /// Creates an empty pool whose digest chain starts from `domain`.
    ///
    /// Distinct domains guarantee that two pools fed identical entropy
    /// never derive identical keys.
    pub fn new(algorithm: HashAlgorithm, domain: &'static [u8]) -> Self {
        let mut digest = PoolDigest::new(algorithm);
        digest.update(domain);
        Self {
            digest,
            domain,
            pending_bytes: 0,
            reseed_events: 0,
        }
    }

    /// Folds bytes into the pool in call order.
    ///
    /// Accepts any length including zero; never fails.
    pub fn add(&mut self, bytes: &[u8]) {
        self.digest.update(bytes);
        self.pending_bytes += bytes.len() as u64;

        tracing::trace!(
            bytes_added = bytes.len(),
            pending_bytes = self.pending_bytes,
            "Folded entropy into pool"
        );
    }

    /// Bytes absorbed since the last successful reseed.
    #[inline]
    pub fn pending_bytes(&self) -> u64 {
        self.pending_bytes
    }

    /// Cumulative count of successful reseeds.
    #[inline]
    pub fn reseed_events(&self) -> u64 {
        self.reseed_events
    }

    /// Derives new key material if at least `threshold` bytes are pending.
    ///
    /// On success the accumulator is drained: the derived key, the reseed
    /// ordinal and the domain label are chained into the next digest
    /// window. Returns `None` below the threshold, leaving state untouched.
    pub fn reseed_if_ready(&mut self, threshold: u64) -> Option<[u8; KEY_BYTES]> {
        if self.pending_bytes < threshold {
            tracing::trace!(
                pending_bytes = self.pending_bytes,
                threshold,
                "Pool below reseed threshold"
            );
            return None;
        }
        Some(self.reseed())
    }

    /// Derives new key material unconditionally, draining whatever is
    /// pending (possibly nothing).
    pub fn force_reseed(&mut self) -> [u8; KEY_BYTES] {
        self.reseed()
    }

    fn reseed(&mut self) -> [u8; KEY_BYTES] {
        self.reseed_events += 1;
        let key = self.digest.finalize_reset();

        // Chain this window's key into the next so later keys commit to
        // the full ordered history, not just the bytes since this point.
        self.digest.update(self.domain);
        self.digest.update(&self.reseed_events.to_le_bytes());
        self.digest.update(&key);

        let drained = self.pending_bytes;
        self.pending_bytes = 0;

        tracing::debug!(
            reseed_events = self.reseed_events,
            drained_bytes = drained,
            "Pool reseeded"
        );

        key
    }
}

impl std::fmt::Debug for EntropyPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntropyPool")
            .field("algorithm", &self.digest.algorithm())
            .field("pending_bytes", &self.pending_bytes)
            .field("reseed_events", &self.reseed_events)
            .finish()
    }
}
