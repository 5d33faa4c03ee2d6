#![deny(missing_docs)]
//! # preflight: umbrella crate
//!
//! A single import surface for preflight. Re-exports the protocol and the
//! prepared decorator unconditionally, the traversal engine, code-split
//! boundaries and server glue behind feature flags, plus a `prelude` for the
//! happy path.

pub use preflight_core;
pub use preflight_prepared;
#[cfg(feature = "split")]
pub use preflight_split;
#[cfg(feature = "traverse")]
pub use preflight_traverse;

#[cfg(feature = "server")]
pub mod server;

/// Happy-path imports for preparing a tree.
pub mod prelude {
    pub use preflight_core::{
        ChunkId, ChunkLoader, Component, CompositeType, Context, ContextPatch, Element,
        ElementType, FunctionComponent, IS_PREPARE_KEY, LoadError, Node, PrepareError,
        PreloadChunks, Props, SplitLoaders,
    };

    pub use preflight_prepared::{PrepareOptions, Prepared, exclude, prepared, with_prepare};

    #[cfg(feature = "traverse")]
    pub use preflight_traverse::{Fanout, Traversal, TraversalConfig, prepare};

    #[cfg(feature = "split")]
    pub use preflight_split::{
        Load, LoadState, Module, PrepareProvider, Split, SplitOptions, load_fn, split,
    };

    #[cfg(feature = "server")]
    pub use crate::server::{RenderContext, prepare_plugin, prepare_request};
}
