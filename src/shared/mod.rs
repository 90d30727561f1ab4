/// Shared kernel: error types, the crate-wide `Result` alias and
/// filesystem security checks used by every adapter.
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
