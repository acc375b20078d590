//! OS-backed raw entropy supplier.

use rand_core::RngCore;

use super::supplier::{EntropySource, SourceError};

/// Supplier backed by the operating system's entropy device.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsSource;

impl OsSource {
    pub fn new() -> Self {
        Self
    }
}

impl EntropySource for OsSource {
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), SourceError> {
        rand_core::OsRng
            .try_fill_bytes(buf)
            .map_err(|_| SourceError::Unsupported)
    }
}
