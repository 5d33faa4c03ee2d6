//! Marking subtrees the traversal must not enter.

use crate::decorator::{PrepareOptions, Prepared};
use crate::descriptor::PrepareFn;
use preflight_core::{CompositeType, ElementType};

/// Stop the traversal at `inner`.
///
/// Useful for keeping the prepare pass away from subtrees known to need no
/// data. The wrapper still renders `inner` normally during a real render.
pub fn exclude(inner: impl Into<ElementType>) -> CompositeType {
    Prepared::from_fn(
        PrepareFn::resolved(),
        PrepareOptions {
            defer: true,
            component_did_mount: false,
            component_will_receive_props: false,
            ..PrepareOptions::default()
        },
    )
    .wrap(inner)
}
