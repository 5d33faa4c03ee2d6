//! Side table from component identity to prepare descriptor.

use crate::descriptor::PrepareDescriptor;
use preflight_core::{ComponentId, ElementType};
use std::collections::HashMap;
use std::sync::{Arc, LazyLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

static GLOBAL: LazyLock<Arc<PrepareRegistry>> = LazyLock::new(|| Arc::new(PrepareRegistry::new()));

/// Side-table from component identity to its preparedness descriptor.
///
/// Populated when a component is decorated, read during traversal. Entries
/// are never removed: a declared type keeps its descriptor for the life of
/// the registry.
#[derive(Debug, Default)]
pub struct PrepareRegistry {
    entries: RwLock<HashMap<ComponentId, Arc<PrepareDescriptor>>>,
}

impl PrepareRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry used by [`crate::prepared`] and the
    /// traversal unless another one is supplied.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ComponentId, Arc<PrepareDescriptor>>> {
        self.entries
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ComponentId, Arc<PrepareDescriptor>>> {
        self.entries
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Attach a descriptor to a component id, replacing any previous one.
    pub fn register(&self, id: ComponentId, descriptor: PrepareDescriptor) -> Arc<PrepareDescriptor> {
        let descriptor = Arc::new(descriptor);
        self.write().insert(id, Arc::clone(&descriptor));
        descriptor
    }

    /// Look up the descriptor for a component id.
    pub fn get(&self, id: ComponentId) -> Option<Arc<PrepareDescriptor>> {
        self.read().get(&id).cloned()
    }

    /// Look up the descriptor for an element type. Host elements and
    /// wrappers never have one.
    pub fn get_for(&self, ty: &ElementType) -> Option<Arc<PrepareDescriptor>> {
        ty.component_id().and_then(|id| self.get(id))
    }

    /// Whether a descriptor is registered for this element type.
    pub fn is_prepared(&self, ty: &ElementType) -> bool {
        self.get_for(ty).is_some()
    }

    /// Number of registered descriptors.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether `ty` carries a descriptor in the global registry.
pub fn is_prepared(ty: &ElementType) -> bool {
    GLOBAL.is_prepared(ty)
}

/// The descriptor `ty` carries in the global registry, if any.
pub fn get_prepare(ty: &ElementType) -> Option<Arc<PrepareDescriptor>> {
    GLOBAL.get_for(ty)
}
