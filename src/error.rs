//! Structured error types for gridview.
//!
//! Most misuse of the public surface is deliberately *not* an error: the
//! defined behavior is a warning plus a no-op. `GridError` covers the cases
//! where an operation cannot produce a grid at all.

/// All errors that can occur when building or reconfiguring a grid.
#[derive(Debug, thiserror::Error)]
pub enum GridError {
    /// Frozen-band counts exceed the axis total, or a similar violation of
    /// construction-time configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A per-axis side array cannot be reconciled with the declared counts.
    #[error("Inconsistent axis data: {0}")]
    AxisData(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GridError>;
