//! Error types.

use thiserror::Error;

/// Invalid [`StackingConfig`](crate::engine::StackingConfig).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("max_groups must be at least 1, got {0}")]
    InvalidMaxGroups(usize),

    #[error("parallel_threshold must be at least 2, got {0}")]
    InvalidParallelThreshold(usize),
}
