//! Raw entropy input.
//!
//! This module provides the seam between the generator core and whatever
//! supplies raw entropy bytes: the OS device in production, deterministic
//! patterns in tests. How entropy is collected is the supplier's concern;
//! the core only consumes bytes.

mod os;
mod supplier;

pub use os::OsSource;
pub use supplier::{EntropySource, PatternSource, SourceError};
