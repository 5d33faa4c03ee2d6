#![deny(missing_docs)]
//! Async prepare traversal over preflight element trees.
//!
//! [`prepare`] walks a tree the way a server render would, without producing
//! markup: function components are called, composites are instantiated and
//! rendered, and every composite with a registered
//! [`PrepareDescriptor`](preflight_prepared::PrepareDescriptor) has its hook
//! awaited before its subtree is visited. Sibling subtrees are prepared
//! concurrently; the first failure rejects the whole traversal.
//!
//! The reserved `__IS_PREPARE__` context marker reads `true` while a
//! traversal is in flight and `false` once it settles, whatever the outcome.
//! Each run attaches its own marker to the context it is given, so
//! concurrent runs over clones of one base context do not interfere and the
//! caller's context is left untouched.

mod config;

pub use config::{Fanout, TraversalConfig};

use futures::FutureExt;
use futures::future::{BoxFuture, try_join_all};
use preflight_core::{
    CompositeType, Context, Element, ElementType, Node, PrepareError, Props, Variant, WrapperKind,
    classify,
};
use preflight_prepared::PrepareRegistry;
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::Instrument;

/// Prepare `root` with the global registry and default configuration.
pub async fn prepare(root: impl Into<Node>, context: Context) -> Result<(), PrepareError> {
    Traversal::new().run(root, context).await
}

/// A configured traversal. Cheap to build; each [`Traversal::run`] is
/// independent of every other.
#[derive(Debug, Clone)]
pub struct Traversal {
    registry: Arc<PrepareRegistry>,
    config: TraversalConfig,
}

impl Traversal {
    /// A traversal over the global registry with default configuration.
    pub fn new() -> Self {
        Self {
            registry: PrepareRegistry::global(),
            config: TraversalConfig::default(),
        }
    }

    /// Look descriptors up in `registry` instead of the global one.
    pub fn with_registry(mut self, registry: Arc<PrepareRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: TraversalConfig) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Prepare every node reachable from `root`.
    ///
    /// Resolves once every reachable prepare hook has been awaited and every
    /// non-stopped subtree visited. Fails with the first hook error.
    ///
    /// Every context seen during the run reports `__IS_PREPARE__` as `true`
    /// until the run settles; `context` itself is not modified.
    pub async fn run(&self, root: impl Into<Node>, context: Context) -> Result<(), PrepareError> {
        let walker = Arc::new(Walker {
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
            runtime: Handle::try_current().ok(),
        });

        let context = context.detach_marker();
        context.set_preparing(true);
        let span = tracing::debug_span!("prepare", fanout = ?self.config.fanout);
        let result = walk(walker, root.into(), context.clone(), 0)
            .instrument(span)
            .await;
        context.set_preparing(false);

        match &result {
            Ok(()) => tracing::debug!("prepare complete"),
            Err(e) => tracing::debug!(error = %e, "prepare failed"),
        }
        result
    }
}

impl Default for Traversal {
    fn default() -> Self {
        Self::new()
    }
}

struct Walker {
    registry: Arc<PrepareRegistry>,
    config: TraversalConfig,
    runtime: Option<Handle>,
}

fn walk(
    walker: Arc<Walker>,
    node: Node,
    context: Context,
    depth: usize,
) -> BoxFuture<'static, Result<(), PrepareError>> {
    async move {
        if let Some(max) = walker.config.max_depth {
            if depth > max {
                return Err(PrepareError::DepthExceeded(max));
            }
        }

        let (children, child_context) = resolve(&walker, node, context).await?;
        let mut children = children.into_children();
        match children.len() {
            0 => Ok(()),
            1 => {
                let only = children.remove(0);
                walk(walker, only, child_context, depth + 1).await
            }
            _ => fan_out(walker, children, child_context, depth + 1).await,
        }
    }
    .boxed()
}

/// Resolve one node into the children to visit next and the context they
/// receive.
async fn resolve(
    walker: &Walker,
    node: Node,
    context: Context,
) -> Result<(Node, Context), PrepareError> {
    let variant = classify(&node);
    tracing::trace!(?variant, "visit");

    let el = match (variant, node) {
        (Variant::Wrapper(WrapperKind::List), list) => return Ok((list, context)),
        (_, Node::Element(el)) => el,
        _ => return Ok((Node::Empty, context)),
    };
    if variant.is_pass_through() {
        return Ok((el.props.children, context));
    }

    let Element { ty, props } = *el;
    match (variant, ty) {
        (Variant::Function, ElementType::Function(f)) => {
            let children = f.call(&props, &context);
            Ok((children, context))
        }
        (Variant::Composite, ElementType::Composite(ty)) => {
            resolve_composite(walker, &ty, props, context).await
        }
        _ => Ok((Node::Empty, context)),
    }
}

async fn resolve_composite(
    walker: &Walker,
    ty: &CompositeType,
    props: Props,
    context: Context,
) -> Result<(Node, Context), PrepareError> {
    let mut instance = ty.instantiate(&props, &context);
    let descriptor = walker.registry.get(ty.id());

    if let Some(descriptor) = &descriptor {
        tracing::debug!(
            component = %ty.name(),
            defer = descriptor.defer,
            boundary = descriptor.boundary,
            "running prepare hook"
        );
        if let Err(e) = descriptor.prepare(props, context.clone()).await {
            tracing::warn!(component = %ty.name(), error = %e, "prepare hook failed");
            return Err(e);
        }
        if descriptor.defer {
            return Ok((Node::Empty, context));
        }
    }

    let child_context = match instance.child_context() {
        Some(patch) => context.merge(patch),
        None => context,
    };
    instance.will_mount();
    let children = instance.render();

    if descriptor.is_some_and(|d| d.stops_descent()) {
        tracing::trace!(component = %ty.name(), "boundary reached, not descending");
        return Ok((Node::Empty, child_context));
    }
    Ok((children, child_context))
}

async fn fan_out(
    walker: Arc<Walker>,
    children: Vec<Node>,
    context: Context,
    depth: usize,
) -> Result<(), PrepareError> {
    match (walker.config.fanout, walker.runtime.clone()) {
        (Fanout::Spawned, Some(runtime)) => {
            let handles: Vec<_> = children
                .into_iter()
                .map(|child| runtime.spawn(walk(Arc::clone(&walker), child, context.clone(), depth)))
                .collect();
            // Dropping a JoinHandle detaches the task, so siblings of a
            // failed branch run to completion.
            try_join_all(handles.into_iter().map(|handle| async move {
                match handle.await {
                    Ok(result) => result,
                    Err(e) => Err(PrepareError::Branch(e.to_string())),
                }
            }))
            .await?;
        }
        _ => {
            try_join_all(
                children
                    .into_iter()
                    .map(|child| walk(Arc::clone(&walker), child, context.clone(), depth)),
            )
            .await?;
        }
    }
    Ok(())
}
