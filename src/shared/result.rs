/// Type alias for Result with anyhow::Error as the error type.
/// Adapters and use cases return this; the graph core only fails on rendering.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
