//! Context: data flowing from a parent to all of its descendants.

use crate::channel::{PreloadChunks, SplitLoaders};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Reserved key that reads `true` while a traversal is in flight.
pub const IS_PREPARE_KEY: &str = "__IS_PREPARE__";

static TRUE: Value = Value::Bool(true);
static FALSE: Value = Value::Bool(false);

/// Context handed to every component during a traversal.
///
/// Values are copy-on-write: [`Context::insert`] and [`Context::merge`] never
/// touch a map another branch can see. The prepare marker and the two
/// channels are shared with every context derived from the same root.
/// A traversal gives its root a fresh marker with [`Context::detach_marker`],
/// so clones of one base context never see each other's traversals.
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<Map<String, Value>>,
    preparing: Arc<AtomicBool>,
    preload_chunks: Option<PreloadChunks>,
    split_loaders: Option<SplitLoaders>,
}

impl Context {
    /// An empty context, not preparing, with no channels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from a JSON object. Non-object values yield an empty context.
    pub fn from_value(value: Value) -> Self {
        let mut ctx = Self::new();
        if let Value::Object(map) = value {
            for (k, v) in map {
                ctx.insert(k, v);
            }
        }
        ctx
    }

    /// Look up a value. The reserved [`IS_PREPARE_KEY`] reflects the
    /// traversal marker.
    pub fn get(&self, key: &str) -> Option<&Value> {
        if key == IS_PREPARE_KEY {
            return Some(if self.is_preparing() { &TRUE } else { &FALSE });
        }
        self.values.get(key)
    }

    /// Insert a value into this context only.
    ///
    /// Inserting [`IS_PREPARE_KEY`] sets the shared marker instead.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        if key == IS_PREPARE_KEY {
            self.set_preparing(value.as_bool().unwrap_or(false));
            return;
        }
        Arc::make_mut(&mut self.values).insert(key, value);
    }

    /// Builder form of [`Context::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Whether a traversal is currently running over this context.
    pub fn is_preparing(&self) -> bool {
        self.preparing.load(Ordering::Acquire)
    }

    /// Set the traversal marker. Visible through every context derived from
    /// this one.
    pub fn set_preparing(&self, preparing: bool) {
        self.preparing.store(preparing, Ordering::Release);
    }

    /// Replace the prepare marker with a new one, initially `false`.
    ///
    /// Values and channels are kept. Contexts this one was cloned from keep
    /// their own marker.
    pub fn detach_marker(mut self) -> Self {
        self.preparing = Arc::new(AtomicBool::new(false));
        self
    }

    /// The preload chunk channel, if a provider seeded one.
    pub fn preload_chunks(&self) -> Option<&PreloadChunks> {
        self.preload_chunks.as_ref()
    }

    /// The split loader channel, if a provider seeded one.
    pub fn split_loaders(&self) -> Option<&SplitLoaders> {
        self.split_loaders.as_ref()
    }

    /// Builder: attach a preload chunk channel.
    pub fn with_preload_chunks(mut self, chunks: PreloadChunks) -> Self {
        self.preload_chunks = Some(chunks);
        self
    }

    /// Builder: attach a split loader channel.
    pub fn with_split_loaders(mut self, loaders: SplitLoaders) -> Self {
        self.split_loaders = Some(loaders);
        self
    }

    /// Derive a child context: this context's values overlaid with `patch`.
    ///
    /// The result shares the prepare marker with `self`. Channels in the
    /// patch replace the inherited ones; absent channels are inherited.
    pub fn merge(&self, patch: ContextPatch) -> Self {
        let mut child = self.clone();
        if !patch.values.is_empty() {
            let values = Arc::make_mut(&mut child.values);
            for (k, v) in patch.values {
                if k != IS_PREPARE_KEY {
                    values.insert(k, v);
                }
            }
        }
        if let Some(chunks) = patch.preload_chunks {
            child.preload_chunks = Some(chunks);
        }
        if let Some(loaders) = patch.split_loaders {
            child.split_loaders = Some(loaders);
        }
        child
    }

    /// Restrict values to `keys`. The marker and channels always carry over.
    /// An empty key list keeps everything.
    pub fn select(&self, keys: &[String]) -> Self {
        if keys.is_empty() {
            return self.clone();
        }
        let values = keys
            .iter()
            .filter_map(|k| self.values.get(k).map(|v| (k.clone(), v.clone())))
            .collect();
        Self {
            values: Arc::new(values),
            ..self.clone()
        }
    }

    /// Iterate over the stored values (the reserved marker is not stored).
    pub fn values(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values)
            .field("preparing", &self.is_preparing())
            .field("preload_chunks", &self.preload_chunks)
            .field("split_loaders", &self.split_loaders)
            .finish()
    }
}

/// What a composite contributes to its children's context.
#[derive(Debug, Clone, Default)]
pub struct ContextPatch {
    /// Values overlaid on the inherited context.
    pub values: Map<String, Value>,
    /// Replacement preload chunk channel.
    pub preload_chunks: Option<PreloadChunks>,
    /// Replacement split loader channel.
    pub split_loaders: Option<SplitLoaders>,
}

impl ContextPatch {
    /// An empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder: provide a preload chunk channel.
    pub fn with_preload_chunks(mut self, chunks: PreloadChunks) -> Self {
        self.preload_chunks = Some(chunks);
        self
    }

    /// Builder: provide a split loader channel.
    pub fn with_split_loaders(mut self, loaders: SplitLoaders) -> Self {
        self.split_loaders = Some(loaders);
        self
    }
}
