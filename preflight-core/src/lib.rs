//! # preflight-core: protocol types for async prepare traversal
//!
//! This crate defines the vocabulary shared by every other preflight crate:
//! what an element looks like before it is instantiated, how context flows
//! down the tree, and what a component has to implement so that a traversal
//! can render it without producing any markup.
//!
//! ## The Pieces
//!
//! | Piece | Types | What it does |
//! |-------|-------|-------------|
//! | ① Elements | [`Element`], [`ElementType`], [`Node`], [`Props`] | Immutable tree description |
//! | ② Components | [`Component`], [`CompositeType`], [`FunctionComponent`] | How a type turns into children |
//! | ③ Context | [`Context`], [`ContextPatch`] | Copy-on-write data flowing to descendants |
//! | ④ Channels | [`PreloadChunks`], [`SplitLoaders`] | Shared append-only collections carried by context |
//! | ⑤ Classifier | [`classify`], [`Variant`] | One dispatch point for element shapes |
//!
//! ## Shared State
//!
//! Context values are never shared mutably between branches: every merge
//! produces a new [`Context`]. The only exceptions are the `__IS_PREPARE__`
//! marker, which is a single flag per traversal root, and the two channels,
//! which are `Arc<Mutex<Vec<_>>>` so that concurrent branches can append to
//! them.

#![deny(missing_docs)]

pub mod channel;
pub mod classify;
pub mod component;
pub mod context;
pub mod element;
pub mod error;
pub mod id;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use channel::{ChunkLoader, PreloadChunks, SplitLoaders};
pub use classify::{Variant, WrapperKind, classify};
pub use component::{Component, CompositeType, FunctionComponent, Updater};
pub use context::{Context, ContextPatch, IS_PREPARE_KEY};
pub use element::{Element, ElementType, Node, Props};
pub use error::{LoadError, PrepareError};
pub use id::{ChunkId, ComponentId};
