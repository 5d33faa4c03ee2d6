//! Module loading behind a split boundary.

use async_trait::async_trait;
use preflight_core::{ChunkId, ElementType, LoadError};
use std::fmt;
use std::future::Future;

/// A loaded module. `default` is the component the split boundary renders.
#[derive(Debug, Clone)]
pub struct Module {
    /// The module's default export.
    pub default: ElementType,
}

impl Module {
    /// A module whose default export is `default`.
    pub fn new(default: impl Into<ElementType>) -> Self {
        Self {
            default: default.into(),
        }
    }
}

/// Something that can load the module behind a split boundary.
///
/// [`Load::chunk_ids`] is read once per load attempt, just before the load
/// starts. Concurrent prepares of one boundary share that attempt.
#[async_trait]
pub trait Load: Send + Sync {
    /// Chunk ids that make up this module. Defaults to none.
    fn chunk_ids(&self) -> Vec<ChunkId> {
        Vec::new()
    }

    /// Load the module.
    async fn load(&self) -> Result<Module, LoadError>;
}

/// A [`Load`] backed by an async closure. Build with [`load_fn`].
pub struct LoadFn<F> {
    load: F,
    chunks: Vec<ChunkId>,
}

/// Adapt an async closure into a [`Load`] with no chunk ids.
///
/// ```ignore
/// let load = load_fn(|| async { Ok(Module::new(dashboard())) })
///     .with_chunks(["dashboard"]);
/// ```
pub fn load_fn<F, Fut>(load: F) -> LoadFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Module, LoadError>> + Send + 'static,
{
    LoadFn {
        load,
        chunks: Vec::new(),
    }
}

impl<F> LoadFn<F> {
    /// Attach chunk ids to report for every load.
    pub fn with_chunks<I, C>(mut self, chunks: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ChunkId>,
    {
        self.chunks = chunks.into_iter().map(Into::into).collect();
        self
    }
}

impl<F> fmt::Debug for LoadFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadFn")
            .field("chunks", &self.chunks)
            .finish()
    }
}

#[async_trait]
impl<F, Fut> Load for LoadFn<F>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Module, LoadError>> + Send + 'static,
{
    fn chunk_ids(&self) -> Vec<ChunkId> {
        self.chunks.clone()
    }

    async fn load(&self) -> Result<Module, LoadError> {
        (self.load)().await
    }
}
