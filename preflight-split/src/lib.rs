#![deny(missing_docs)]
//! Code-split boundaries for preflight.
//!
//! [`split`] declares a component whose implementation lives in a module
//! that has to be loaded first. Until the load settles the boundary renders a
//! loading component; afterwards it renders the loaded component, or an
//! error component if the load failed. The load runs as the boundary's
//! prepare hook, so a traversal resolves it before the real render.
//!
//! Chunk ids reported by a load are appended to the [`PreloadChunks`]
//! channel in context, and every [`ChunkLoader`] registered in the
//! [`SplitLoaders`] channel runs alongside the load. [`PrepareProvider`]
//! seeds both channels.
//!
//! [`PreloadChunks`]: preflight_core::PreloadChunks
//! [`SplitLoaders`]: preflight_core::SplitLoaders
//! [`ChunkLoader`]: preflight_core::ChunkLoader

mod load;
mod provider;
mod split;

pub use load::{Load, LoadFn, Module, load_fn};
pub use provider::PrepareProvider;
pub use split::{LoadState, Split, SplitOptions, split, split_in};
