//! Shared append-only channels carried through context.
//!
//! Every branch of a traversal gets its own [`crate::Context`], but these two
//! collections are handed down by reference so that code-split boundaries
//! anywhere in the tree can report into one place. Both are cheap to clone;
//! clones share the same underlying list.

use crate::error::LoadError;
use crate::id::ChunkId;
use async_trait::async_trait;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // Appends never leave the list half-written, so a poisoned lock is still usable.
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Chunk ids the server response should tell the client to preload.
#[derive(Clone, Default)]
pub struct PreloadChunks {
    inner: Arc<Mutex<Vec<ChunkId>>>,
}

impl PreloadChunks {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk id.
    pub fn push(&self, chunk: ChunkId) {
        lock(&self.inner).push(chunk);
    }

    /// Append several chunk ids in order.
    pub fn extend<I: IntoIterator<Item = ChunkId>>(&self, chunks: I) {
        lock(&self.inner).extend(chunks);
    }

    /// A copy of everything appended so far.
    pub fn snapshot(&self) -> Vec<ChunkId> {
        lock(&self.inner).clone()
    }

    /// Number of chunk ids appended so far.
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether two handles point at the same list.
    pub fn same_channel(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for PreloadChunks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(lock(&self.inner).iter()).finish()
    }
}

/// Loads the chunks that make up a split boundary.
///
/// Registered in [`SplitLoaders`]; every split load runs all registered
/// loaders alongside the module load itself.
#[async_trait]
pub trait ChunkLoader: Send + Sync {
    /// Load (or schedule loading of) the given chunks.
    async fn load_chunks(&self, chunks: &[ChunkId]) -> Result<(), LoadError>;
}

/// Chunk loaders registered for every split boundary below a provider.
#[derive(Clone, Default)]
pub struct SplitLoaders {
    inner: Arc<Mutex<Vec<Arc<dyn ChunkLoader>>>>,
}

impl SplitLoaders {
    /// Create an empty channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a loader.
    pub fn register(&self, loader: Arc<dyn ChunkLoader>) {
        lock(&self.inner).push(loader);
    }

    /// The loaders registered so far.
    pub fn snapshot(&self) -> Vec<Arc<dyn ChunkLoader>> {
        lock(&self.inner).clone()
    }

    /// Number of registered loaders.
    pub fn len(&self) -> usize {
        lock(&self.inner).len()
    }

    /// True when no loader is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for SplitLoaders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitLoaders")
            .field("len", &self.len())
            .finish()
    }
}
