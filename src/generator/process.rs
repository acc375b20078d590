//! Process-scoped generator with an explicit lifecycle.
//!
//! Many callers want one shared generator per process without carrying a
//! handle around. This is that generator, made explicit: it must be
//! initialized before use, can be torn down, and is guarded by a mutex
//! because [`Generator`] itself has no internal synchronization.
//!
//! On process duplication the duplicated side must call
//! [`after_duplication`] before requesting any output; the generator core
//! cannot observe the duplication itself.

use std::sync::{Mutex, PoisonError};

use thiserror::Error;

use super::instance::Generator;
use crate::config::GeneratorConfig;

static PROCESS: Mutex<Option<Generator>> = Mutex::new(None);

/// Lifecycle errors for the process-scoped generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("process generator is already initialized")]
    AlreadyInitialized,
    #[error("process generator is not initialized")]
    NotInitialized,
}

/// Initializes the process-scoped generator.
pub fn init(config: GeneratorConfig) -> Result<(), ProcessError> {
    let mut guard = lock();
    if guard.is_some() {
        return Err(ProcessError::AlreadyInitialized);
    }
    *guard = Some(Generator::new(config));
    tracing::info!("Process generator initialized");
    Ok(())
}

/// Tears down the process-scoped generator. Idempotent.
pub fn shutdown() {
    let mut guard = lock();
    if guard.take().is_some() {
        tracing::info!("Process generator shut down");
    }
}

/// Runs `f` with exclusive access to the process-scoped generator.
pub fn with<R>(f: impl FnOnce(&mut Generator) -> R) -> Result<R, ProcessError> {
    let mut guard = lock();
    let generator = guard.as_mut().ok_or(ProcessError::NotInitialized)?;
    Ok(f(generator))
}

/// Re-establishes independence after a process duplication.
///
/// Applies the duplication contract to the process generator: a barrier
/// followed by a context-unique value built from `tag`, the process id
/// and the current timestamp.
pub fn after_duplication(tag: &[u8]) -> Result<(), ProcessError> {
    with(|g| {
        g.barrier();
        let mut unique = Vec::with_capacity(tag.len() + 12);
        unique.extend_from_slice(tag);
        unique.extend_from_slice(&std::process::id().to_le_bytes());
        unique.extend_from_slice(&chrono::Utc::now().timestamp_micros().to_le_bytes());
        g.add_entropy(&unique);
        tracing::info!("Process generator rekeyed for new execution context");
    })
}

fn lock() -> std::sync::MutexGuard<'static, Option<Generator>> {
    PROCESS.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Single test: the process generator is one global, and the
    // lifecycle steps only make sense in order.
    #[test]
    fn test_process_lifecycle() {
        assert_eq!(
            with(|_| ()).unwrap_err(),
            ProcessError::NotInitialized
        );

        init(GeneratorConfig::default()).unwrap();
        assert_eq!(
            init(GeneratorConfig::default()).unwrap_err(),
            ProcessError::AlreadyInitialized
        );

        with(|g| g.add_entropy(&[0u8; 2048])).unwrap();
        let ok = with(|g| {
            let mut buf = [0u8; 32];
            g.secure_bytes(&mut buf).is_ok()
        })
        .unwrap();
        assert!(ok);

        // Freshness was consumed; after_duplication injects a new
        // context-unique value, so a secure read works again.
        after_duplication(b"test-child").unwrap();
        let ok = with(|g| {
            let mut buf = [0u8; 32];
            g.secure_bytes(&mut buf).is_ok()
        })
        .unwrap();
        assert!(ok);

        shutdown();
        assert_eq!(
            with(|_| ()).unwrap_err(),
            ProcessError::NotInitialized
        );
        // Idempotent.
        shutdown();
    }
}
