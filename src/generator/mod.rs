//! Generator instances and process-scoped convenience state.
//!
//! [`Generator`] is the public face of the crate: two independently
//! scheduled pools behind four operations plus the duplication barrier.
//! The [`process`] submodule wraps one instance in explicit process-wide
//! state for callers that do not want to carry a handle.

mod instance;
pub mod process;

pub use instance::Generator;
