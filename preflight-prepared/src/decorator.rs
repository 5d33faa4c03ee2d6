//! The `prepared` decorator: wraps a component and registers its prepare hook.

use crate::descriptor::{PrepareDescriptor, PrepareFn, PrepareFuture};
use crate::registry::PrepareRegistry;
use preflight_core::{
    Component, CompositeType, Context, Element, ElementType, Node, PrepareError, Props, Updater,
};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::Arc;

/// Options for [`prepared`].
///
/// Every field has a default, so partial configuration deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareOptions {
    /// Run the hook during traversal but do not render or descend.
    pub defer: bool,
    /// Run the hook and render during traversal but do not descend.
    pub boundary: bool,
    /// Re-run the hook after a real mount.
    pub component_did_mount: bool,
    /// Re-run the hook with the incoming props before an update.
    pub component_will_receive_props: bool,
    /// Re-run the hook after an update.
    pub component_did_update: bool,
    /// Context keys lifecycle-time calls see. Empty means all of them.
    pub context_types: Vec<String>,
    /// Ask the host to re-render once the mount-time hook resolves.
    pub force_update: bool,
}

impl Default for PrepareOptions {
    fn default() -> Self {
        Self {
            defer: false,
            boundary: false,
            component_did_mount: true,
            component_will_receive_props: false,
            component_did_update: false,
            context_types: Vec::new(),
            force_update: false,
        }
    }
}

/// A decorator built by [`prepared`]; apply it with [`Prepared::wrap`].
#[derive(Debug, Clone)]
pub struct Prepared {
    prepare: PrepareFn,
    options: PrepareOptions,
    registry: Arc<PrepareRegistry>,
}

/// Build a decorator that attaches `prepare` to whatever it wraps.
///
/// ```ignore
/// let UserPage = prepared(
///     |props, _ctx| async move { fetch_user(&props).await },
///     PrepareOptions::default(),
/// )
/// .wrap(user_view);
/// ```
pub fn prepared<F, Fut>(prepare: F, options: PrepareOptions) -> Prepared
where
    F: Fn(Props, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PrepareError>> + Send + 'static,
{
    Prepared::from_fn(PrepareFn::new(prepare), options)
}

/// Alias of [`prepared`].
pub fn with_prepare<F, Fut>(prepare: F, options: PrepareOptions) -> Prepared
where
    F: Fn(Props, Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), PrepareError>> + Send + 'static,
{
    prepared(prepare, options)
}

impl Prepared {
    /// Build a decorator from an already-boxed hook.
    pub fn from_fn(prepare: PrepareFn, options: PrepareOptions) -> Self {
        Self {
            prepare,
            options,
            registry: PrepareRegistry::global(),
        }
    }

    /// Register wrapped components in `registry` instead of the global one.
    pub fn in_registry(mut self, registry: Arc<PrepareRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// The options this decorator applies.
    pub fn options(&self) -> &PrepareOptions {
        &self.options
    }

    /// Wrap a component. The result renders `inner` with the same props and
    /// is registered as prepared.
    pub fn wrap(&self, inner: impl Into<ElementType>) -> CompositeType {
        let inner = inner.into();
        let name = format!("PreparedComponent({})", inner.name());
        let shared = Arc::new(Shared {
            name: name.clone(),
            inner,
            prepare: self.prepare.clone(),
            options: self.options.clone(),
        });

        let ty = CompositeType::new(name, move |props: &Props, ctx: &Context| {
            PreparedInstance {
                shared: Arc::clone(&shared),
                props: props.clone(),
                context: ctx.clone(),
            }
        });

        let descriptor = PrepareDescriptor::new(self.prepare.clone())
            .with_defer(self.options.defer)
            .with_boundary(self.options.boundary);
        self.registry.register(ty.id(), descriptor);
        tracing::trace!(
            component = %ty.name(),
            defer = self.options.defer,
            boundary = self.options.boundary,
            "registered prepare descriptor"
        );
        ty
    }
}

struct Shared {
    name: String,
    inner: ElementType,
    prepare: PrepareFn,
    options: PrepareOptions,
}

struct PreparedInstance {
    shared: Arc<Shared>,
    props: Props,
    context: Context,
}

impl PreparedInstance {
    fn call(&self, props: &Props, context: &Context) -> PrepareFuture {
        let context = context.select(&self.shared.options.context_types);
        self.shared.prepare.call(props.clone(), context)
    }
}

impl Component for PreparedInstance {
    fn render(&mut self) -> Node {
        Element::new(self.shared.inner.clone(), self.props.clone()).into()
    }

    fn did_mount(&mut self, updater: &Updater) {
        if !self.shared.options.component_did_mount {
            return;
        }
        let pending = self.call(&self.props, &self.context);
        let updater = self.shared.options.force_update.then(|| updater.clone());
        spawn_detached(&self.shared.name, "did_mount", async move {
            pending.await?;
            if let Some(updater) = updater {
                updater.force_update();
            }
            Ok(())
        });
    }

    fn will_receive_props(&mut self, next_props: &Props, next_context: &Context) {
        if self.shared.options.component_will_receive_props {
            let pending = self.call(next_props, next_context);
            spawn_detached(&self.shared.name, "will_receive_props", pending);
        }
        self.props = next_props.clone();
        self.context = next_context.clone();
    }

    fn did_update(&mut self, _updater: &Updater) {
        if self.shared.options.component_did_update {
            let pending = self.call(&self.props, &self.context);
            spawn_detached(&self.shared.name, "did_update", pending);
        }
    }
}

/// Run a lifecycle-time prepare outside of any traversal. Failures are only
/// logged; nothing awaits the result.
fn spawn_detached<F>(component: &str, hook: &'static str, pending: F)
where
    F: Future<Output = Result<(), PrepareError>> + Send + 'static,
{
    let component = component.to_owned();
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                if let Err(e) = pending.await {
                    tracing::warn!(component = %component, hook, error = %e, "lifecycle prepare failed");
                }
            });
        }
        Err(_) => {
            tracing::warn!(component = %component, hook, "no tokio runtime, skipping lifecycle prepare");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_values() {
        let opts = PrepareOptions::default();
        assert!(!opts.defer);
        assert!(!opts.boundary);
        assert!(opts.component_did_mount);
        assert!(!opts.component_will_receive_props);
        assert!(!opts.component_did_update);
        assert!(opts.context_types.is_empty());
        assert!(!opts.force_update);
    }

    #[test]
    fn partial_options_deserialize() {
        let opts: PrepareOptions =
            serde_json::from_value(json!({"defer": true, "context_types": ["user"]})).unwrap();
        assert!(opts.defer);
        assert!(opts.component_did_mount);
        assert_eq!(opts.context_types, vec!["user".to_string()]);
    }
}
