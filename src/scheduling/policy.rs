//! Trust policies governing when a pool may release output.

/// Decides when accumulated entropy is considered sufficient to back
/// output, and how long a derived key may be reused.
///
/// Both roles share one pool implementation; only this policy differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrustPolicy {
    /// Output is allowed once the pool has absorbed strictly more than
    /// `min_reseeds` scheduled reseeds, each draining `reseed_bytes`
    /// pending bytes. The trust latch is permanent and the current key
    /// serves many reads between scheduled reseeds.
    Cumulative {
        /// Pending bytes consumed per scheduled reseed.
        reseed_bytes: u64,
        /// Reseed events to strictly exceed before the first output.
        min_reseeds: u64,
    },
    /// Every read derives a one-off key from entropy added after the
    /// previous successful reseed. A read with nothing fresh pending is
    /// refused, so compromising one key reveals nothing about earlier
    /// output.
    PerRead,
}
