//! Dual-Pool Entropy-Accumulating CSPRNG
//!
//! A randomness primitive for portable runtimes: raw entropy is folded
//! into two independently scheduled pools backing two byte streams - a
//! fast "insecure" stream for non-adversarial randomness and a hardened
//! "secure" stream for keys and tokens.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! source → mixing → scheduling → generator
//!             ↓          ↓
//!         (digest)  (trust policy)
//! ```
//!
//! # Design Principles
//!
//! - **Fail-closed**: output is refused until a pool's trust policy is
//!   satisfied, and the secure stream refuses rather than reuse a key
//! - **Deterministic core**: output is a pure function of the configured
//!   primitives and the ordered entropy sequence, so fixed inputs give
//!   bit-identical streams for known-answer testing
//! - **Uses standard primitives**: BLAKE3/SHA-256 for pool accumulation,
//!   ChaCha for the counter-mode keystream
//! - **Duplication is a caller contract**: after a fork-like event the
//!   copy must call [`Generator::barrier`] and add a context-unique
//!   value; the core cannot detect duplication itself
//!
//! # Example
//!
//! ```
//! use pooled_random::{Generator, OsSource};
//!
//! let mut generator = Generator::standard();
//! let mut source = OsSource::new();
//!
//! // Seed until the fast stream crosses its trust threshold.
//! while !generator.insecure_ready() {
//!     generator.seed_from(&mut source, 2048).unwrap();
//! }
//!
//! let mut token = [0u8; 32];
//! generator.insecure_bytes(&mut token).unwrap();
//!
//! // The hardened stream consumes entropy added since the last secure
//! // read; everything seeded above is still fresh to it.
//! let mut key = [0u8; 32];
//! generator.secure_bytes(&mut key).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod generator;
pub mod keystream;
pub mod mixing;
pub mod scheduling;
pub mod source;

// Re-export commonly used types at crate root
pub use config::{ConfigError, GeneratorConfig};
pub use generator::{process, Generator};
pub use keystream::{CipherAlgorithm, KeyStream};
pub use mixing::{EntropyPool, HashAlgorithm};
pub use scheduling::{Pool, RandomError, TrustPolicy};
pub use source::{EntropySource, OsSource, PatternSource, SourceError};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
