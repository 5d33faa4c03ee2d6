//! Prepare hooks and the immutable descriptors that carry them.

use futures::FutureExt;
use futures::future::BoxFuture;
use preflight_core::{Context, PrepareError, Props};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

/// The future a prepare hook returns.
pub type PrepareFuture = BoxFuture<'static, Result<(), PrepareError>>;

/// A shareable async prepare hook: `(props, context) -> future`.
#[derive(Clone)]
pub struct PrepareFn {
    inner: Arc<dyn Fn(Props, Context) -> PrepareFuture + Send + Sync>,
}

impl PrepareFn {
    /// Wrap an async function. Whatever future it returns is boxed, so callers
    /// always get a [`PrepareFuture`] back.
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Props, Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), PrepareError>> + Send + 'static,
    {
        Self {
            inner: Arc::new(move |props, ctx| f(props, ctx).boxed()),
        }
    }

    /// A hook that resolves immediately.
    pub fn resolved() -> Self {
        Self::new(|_, _| async { Ok::<(), PrepareError>(()) })
    }

    /// Invoke the hook.
    pub fn call(&self, props: Props, context: Context) -> PrepareFuture {
        (self.inner)(props, context)
    }
}

impl fmt::Debug for PrepareFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrepareFn")
    }
}

/// What the traversal needs to know about a prepared component type.
///
/// Created once when the type is declared and immutable afterwards. Shared
/// by `Arc`, never cloned per traversal.
#[derive(Debug, Clone)]
pub struct PrepareDescriptor {
    /// The async hook.
    pub prepare: PrepareFn,
    /// Run the hook but do not render or descend in this pass.
    pub defer: bool,
    /// Run the hook and render once, but do not descend into the output.
    pub boundary: bool,
}

impl PrepareDescriptor {
    /// A descriptor with neither `defer` nor `boundary` set.
    pub fn new(prepare: PrepareFn) -> Self {
        Self {
            prepare,
            defer: false,
            boundary: false,
        }
    }

    /// Builder: set `defer`.
    pub fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }

    /// Builder: set `boundary`.
    pub fn with_boundary(mut self, boundary: bool) -> Self {
        self.boundary = boundary;
        self
    }

    /// Invoke the hook.
    pub fn prepare(&self, props: Props, context: Context) -> PrepareFuture {
        self.prepare.call(props, context)
    }

    /// Whether the traversal should stop at this component.
    pub fn stops_descent(&self) -> bool {
        self.defer || self.boundary
    }
}
