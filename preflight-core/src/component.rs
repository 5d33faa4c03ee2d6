//! The component protocol: how a declared type turns into children.

use crate::context::{Context, ContextPatch};
use crate::element::{Node, Props};
use crate::id::ComponentId;
use std::fmt;
use std::sync::Arc;

/// A live instance of a composite component.
///
/// Instances are created by [`CompositeType::instantiate`] with the props and
/// context they render with. A traversal calls [`Component::child_context`],
/// then [`Component::will_mount`], then [`Component::render`], and drops the
/// instance. The remaining hooks belong to a real render and are never
/// called by a traversal.
pub trait Component: Send {
    /// Produce this instance's children.
    fn render(&mut self) -> Node;

    /// Context contributed to every descendant.
    fn child_context(&self) -> Option<ContextPatch> {
        None
    }

    /// Called once, right before the first `render`.
    fn will_mount(&mut self) {}

    /// Called by a host renderer after the instance is mounted.
    fn did_mount(&mut self, _updater: &Updater) {}

    /// Called by a host renderer before new props are applied.
    fn will_receive_props(&mut self, _next_props: &Props, _next_context: &Context) {}

    /// Called by a host renderer after an update has been applied.
    fn did_update(&mut self, _updater: &Updater) {}
}

type Factory = dyn Fn(&Props, &Context) -> Box<dyn Component> + Send + Sync;

/// A declared stateful component type.
///
/// Cloning keeps the identity: clones compare equal by [`CompositeType::id`].
#[derive(Clone)]
pub struct CompositeType {
    id: ComponentId,
    name: Arc<str>,
    factory: Arc<Factory>,
}

impl CompositeType {
    /// Declare a new composite type from a constructor.
    pub fn new<F, C>(name: impl Into<Arc<str>>, construct: F) -> Self
    where
        F: Fn(&Props, &Context) -> C + Send + Sync + 'static,
        C: Component + 'static,
    {
        Self {
            id: ComponentId::next(),
            name: name.into(),
            factory: Arc::new(move |props: &Props, ctx: &Context| -> Box<dyn Component> {
                Box::new(construct(props, ctx))
            }),
        }
    }

    /// This type's identity.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Construct an instance with the given props and context.
    pub fn instantiate(&self, props: &Props, context: &Context) -> Box<dyn Component> {
        (self.factory)(props, context)
    }
}

impl fmt::Debug for CompositeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeType")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for CompositeType {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for CompositeType {}

type RenderFn = dyn Fn(&Props, &Context) -> Node + Send + Sync;

/// A declared stateless component: a function of props and context.
#[derive(Clone)]
pub struct FunctionComponent {
    id: ComponentId,
    name: Arc<str>,
    render: Arc<RenderFn>,
}

impl FunctionComponent {
    /// Declare a new function component.
    pub fn new<F, N>(name: impl Into<Arc<str>>, render: F) -> Self
    where
        F: Fn(&Props, &Context) -> N + Send + Sync + 'static,
        N: Into<Node>,
    {
        Self {
            id: ComponentId::next(),
            name: name.into(),
            render: Arc::new(move |props: &Props, ctx: &Context| -> Node { render(props, ctx).into() }),
        }
    }

    /// This type's identity.
    pub fn id(&self) -> ComponentId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render with the given props and context.
    pub fn call(&self, props: &Props, context: &Context) -> Node {
        (self.render)(props, context)
    }
}

impl fmt::Debug for FunctionComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionComponent")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

impl PartialEq for FunctionComponent {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for FunctionComponent {}

/// Handle a host renderer passes to lifecycle hooks so an instance can ask
/// to be rendered again.
#[derive(Clone)]
pub struct Updater {
    force: Arc<dyn Fn() + Send + Sync>,
}

impl Updater {
    /// Wrap a re-render callback.
    pub fn new(force: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            force: Arc::new(force),
        }
    }

    /// An updater that ignores re-render requests.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Request a re-render.
    pub fn force_update(&self) {
        (self.force)();
    }
}

impl Default for Updater {
    fn default() -> Self {
        Self::noop()
    }
}

impl fmt::Debug for Updater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Updater")
    }
}
