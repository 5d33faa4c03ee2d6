#![deny(missing_docs)]
//! Preparedness descriptors and the `prepared` decorator for preflight.
//!
//! A component type becomes "prepared" when a [`PrepareDescriptor`] is
//! registered for its [`ComponentId`](preflight_core::ComponentId) in a
//! [`PrepareRegistry`]. The traversal looks descriptors up by identity; it
//! never inspects the component itself. [`prepared`] wraps any component in a
//! composite that carries a descriptor and also re-runs the same prepare
//! function from its real-render lifecycle hooks.

mod decorator;
mod descriptor;
mod exclude;
mod registry;

pub use decorator::{PrepareOptions, Prepared, prepared, with_prepare};
pub use descriptor::{PrepareDescriptor, PrepareFn, PrepareFuture};
pub use exclude::exclude;
pub use registry::{PrepareRegistry, get_prepare, is_prepared};
