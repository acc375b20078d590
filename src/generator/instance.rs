//! Generator instance: the dual-stream public contract.
//!
//! One instance owns two pools fed from the same entropy additions but
//! scheduled independently: a cumulative-trust pool for cheap randomness
//! and a per-read pool for security-sensitive values. The instance has no
//! internal locking; concurrent callers must serialize whole-instance
//! access externally.

use crate::config::GeneratorConfig;
use crate::scheduling::{Pool, RandomError, TrustPolicy};
use crate::source::{EntropySource, SourceError};

/// Domain label for the insecure pool's digest chain.
const INSECURE_DOMAIN: &[u8] = b"pooled-random/insecure-pool/v1";
/// Domain label for the secure pool's digest chain.
const SECURE_DOMAIN: &[u8] = b"pooled-random/secure-pool/v1";

/// A dual-pool pseudorandom generator.
///
/// Output is a deterministic function of the configured primitives and
/// the exact ordered sequence of entropy additions, which is what makes
/// known-answer testing possible. Duplicating an instance's memory (for
/// example across a fork) duplicates that function: the duplicated side
/// must call [`barrier`](Generator::barrier) and then add a
/// context-unique value before its output diverges.
pub struct Generator {
    insecure: Pool,
    secure: Pool,
}

impl Generator {
    /// Creates an instance with empty pools under the given configuration.
    ///
    /// Any output request before entropy has been added fails with
    /// [`RandomError::NotEnoughEntropy`].
    ///
    /// # Panics
    ///
    /// Panics if the configuration is invalid; validate at load time via
    /// [`GeneratorConfig::validate`].
    pub fn new(config: GeneratorConfig) -> Self {
        config.validate().expect("invalid generator configuration");
        let insecure_policy = TrustPolicy::Cumulative {
            reseed_bytes: config.reseed_bytes,
            min_reseeds: config.min_reseeds,
        };
        Self {
            insecure: Pool::new(&config, insecure_policy, INSECURE_DOMAIN),
            secure: Pool::new(&config, TrustPolicy::PerRead, SECURE_DOMAIN),
        }
    }

    /// Creates an instance with the default primitives and thresholds.
    pub fn standard() -> Self {
        Self::new(GeneratorConfig::default())
    }

    /// Routes entropy to both pools in receipt order. Never fails;
    /// zero-length input is accepted and contributes nothing.
    pub fn add_entropy(&mut self, bytes: &[u8]) {
        self.insecure.add_entropy(bytes);
        self.secure.add_entropy(bytes);
    }

    /// Pulls `bytes` raw bytes from `source` and feeds them through
    /// [`add_entropy`](Generator::add_entropy). The supplier's quality is
    /// not inspected.
    pub fn seed_from(
        &mut self,
        source: &mut dyn EntropySource,
        bytes: usize,
    ) -> Result<(), SourceError> {
        let mut buf = vec![0u8; bytes];
        source.fill(&mut buf)?;
        self.add_entropy(&buf);
        Ok(())
    }

    /// Fills `buf` from the insecure stream.
    ///
    /// Fails with `NotEnoughEntropy` until the insecure pool has crossed
    /// its trust threshold; never fails again afterwards.
    ///
    /// # Panics
    ///
    /// Panics on an empty output buffer (caller contract violation).
    pub fn insecure_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        assert!(!buf.is_empty(), "output buffer must not be empty");
        self.insecure.read(buf)
    }

    /// Fills `buf` from the secure stream.
    ///
    /// Every call consumes entropy added since the previous successful
    /// secure read; with nothing fresh pending it fails with
    /// `NotEnoughEntropy` and writes nothing.
    ///
    /// # Panics
    ///
    /// Panics on an empty output buffer (caller contract violation).
    pub fn secure_bytes(&mut self, buf: &mut [u8]) -> Result<(), RandomError> {
        assert!(!buf.is_empty(), "output buffer must not be empty");
        self.secure.read(buf)
    }

    /// Invalidates the cached key state of both pools so each pool's next
    /// read reseeds even where its policy would have reused the current
    /// key.
    ///
    /// Call this on the duplicated side of a process duplication, then
    /// add a context-unique value (pid, timestamp, address); the core
    /// cannot detect duplication itself.
    pub fn barrier(&mut self) {
        self.insecure.invalidate_key();
        self.secure.invalidate_key();
        tracing::info!("Barrier: cached key state invalidated on both pools");
    }

    /// Whether the next [`insecure_bytes`](Generator::insecure_bytes)
    /// call would succeed.
    pub fn insecure_ready(&self) -> bool {
        self.insecure.is_ready()
    }

    /// Whether the next [`secure_bytes`](Generator::secure_bytes) call
    /// would succeed.
    pub fn secure_ready(&self) -> bool {
        self.secure.is_ready()
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("insecure", &self.insecure)
            .field("secure", &self.secure)
            .finish()
    }
}
