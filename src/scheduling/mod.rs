//! Reseed scheduling and trust enforcement.
//!
//! A [`Pool`] pairs an entropy accumulator with a keystream and decides,
//! per its [`TrustPolicy`], when accumulated entropy becomes output and
//! when keys must be replaced.

mod policy;
mod pool;

pub use policy::TrustPolicy;
pub use pool::{Pool, RandomError};
