//! Error types for traversal and code-split loading.

use thiserror::Error;

/// Errors raised while preparing a tree.
///
/// A failing prepare hook rejects the whole traversal. Nothing in the
/// traversal swallows these; components that expect failures must convert
/// them into state themselves.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PrepareError {
    /// A prepare hook failed.
    #[error("prepare failed: {0}")]
    Failed(String),

    /// A code-split load failed and the caller chose to propagate it.
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// A spawned branch of the traversal panicked or was cancelled.
    #[error("traversal branch failed: {0}")]
    Branch(String),

    /// The tree was deeper than the configured bound.
    #[error("traversal exceeded max depth of {0}")]
    DepthExceeded(usize),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors raised while loading a code-split module or its chunks.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LoadError {
    /// The module load failed.
    #[error("module load failed: {0}")]
    Failed(String),

    /// A chunk loader registered in context failed.
    #[error("chunk {chunk} failed to load: {message}")]
    ChunkFailed {
        /// The chunk that failed.
        chunk: String,
        /// Error message.
        message: String,
    },

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
