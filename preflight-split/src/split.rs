//! Split boundaries and their load state.

use crate::load::Load;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared as SharedFuture, try_join, try_join_all};
use preflight_core::{
    ChunkId, CompositeType, Context, Element, ElementType, FunctionComponent, LoadError, Node,
    PrepareError, Props,
};
use preflight_prepared::{PrepareDescriptor, PrepareOptions, PrepareRegistry, prepared};
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

/// Context keys a split boundary reads at lifecycle time.
const CONTEXT_TYPES: [&str; 2] = ["splitComponentLoaders", "preloadChunks"];

/// Where a split boundary's module load stands.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// No load has finished yet. Renders the loading component.
    Loading,
    /// The module loaded. Renders its default export.
    Loaded(ElementType),
    /// The load failed. Renders the error component.
    Failed(Arc<LoadError>),
}

impl LoadState {
    /// True for `Loaded` and `Failed`. A settled boundary never loads again.
    pub fn is_settled(&self) -> bool {
        !matches!(self, LoadState::Loading)
    }
}

/// Options for [`split`].
#[derive(Clone)]
pub struct SplitOptions {
    /// Run the load during traversal but do not render or descend.
    pub defer: bool,
    /// Loads the module.
    pub load: Arc<dyn Load>,
    /// Rendered until the load settles.
    pub loading: ElementType,
    /// Rendered after a failed load, with an `error` prop holding the message.
    pub error: ElementType,
}

impl SplitOptions {
    /// Options with `defer` off.
    pub fn new(
        load: impl Load + 'static,
        loading: impl Into<ElementType>,
        error: impl Into<ElementType>,
    ) -> Self {
        Self {
            defer: false,
            load: Arc::new(load),
            loading: loading.into(),
            error: error.into(),
        }
    }

    /// Builder: set `defer`.
    pub fn with_defer(mut self, defer: bool) -> Self {
        self.defer = defer;
        self
    }
}

impl fmt::Debug for SplitOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitOptions")
            .field("defer", &self.defer)
            .field("loading", &self.loading)
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// A split boundary built by [`split`].
///
/// Clones share the same load state.
#[derive(Clone)]
pub struct Split {
    component: CompositeType,
    registry: Arc<PrepareRegistry>,
    shared: Arc<Shared>,
}

/// Declare a split boundary registered in the global registry.
pub fn split(options: SplitOptions) -> Split {
    split_in(PrepareRegistry::global(), options)
}

/// Declare a split boundary registered in `registry`.
pub fn split_in(registry: Arc<PrepareRegistry>, options: SplitOptions) -> Split {
    let shared = Arc::new(Shared {
        load: options.load,
        loading: options.loading,
        error: options.error,
        slot: Mutex::new(Slot {
            state: LoadState::Loading,
            chunks: Vec::new(),
            pending: None,
        }),
    });

    let shell = {
        let shared = Arc::clone(&shared);
        FunctionComponent::new("SplitComponent", move |props: &Props, _: &Context| {
            shared.render(props)
        })
    };

    let prepare_options = PrepareOptions {
        defer: options.defer,
        context_types: CONTEXT_TYPES.iter().map(|k| k.to_string()).collect(),
        force_update: true,
        ..PrepareOptions::default()
    };
    let hook_shared = Arc::clone(&shared);
    let component = prepared(
        move |_props: Props, context: Context| {
            let shared = Arc::clone(&hook_shared);
            async move { shared.prepare(context).await }
        },
        prepare_options,
    )
    .in_registry(Arc::clone(&registry))
    .wrap(shell);

    Split {
        component,
        registry,
        shared,
    }
}

impl Split {
    /// The prepared composite to place in a tree.
    pub fn component(&self) -> CompositeType {
        self.component.clone()
    }

    /// An element of this boundary with the given props.
    pub fn element(&self, props: Props) -> Element {
        Element::new(self.component.clone(), props)
    }

    /// The current load state.
    pub fn state(&self) -> LoadState {
        self.shared.slot().state.clone()
    }

    /// Chunk ids reported by the most recent load attempt.
    pub fn chunk_ids(&self) -> Vec<ChunkId> {
        self.shared.slot().chunks.clone()
    }

    /// The descriptor registered for [`Split::component`].
    pub fn descriptor(&self) -> Option<Arc<PrepareDescriptor>> {
        self.registry.get(self.component.id())
    }
}

impl fmt::Debug for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Split")
            .field("component", &self.component)
            .field("state", &self.state())
            .finish()
    }
}

/// A load attempt every concurrent prepare of one boundary awaits.
type PendingLoad = SharedFuture<BoxFuture<'static, Result<ElementType, Arc<LoadError>>>>;

struct Slot {
    state: LoadState,
    chunks: Vec<ChunkId>,
    pending: Option<PendingLoad>,
}

struct Shared {
    load: Arc<dyn Load>,
    loading: ElementType,
    error: ElementType,
    slot: Mutex<Slot>,
}

impl Shared {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn render(&self, props: &Props) -> Node {
        match &self.slot().state {
            LoadState::Failed(e) => {
                Element::new(self.error.clone(), Props::new().with("error", e.to_string())).into()
            }
            LoadState::Loading => Element::new(self.loading.clone(), Props::new()).into(),
            LoadState::Loaded(ty) => Element::new(ty.clone(), props.clone()).into(),
        }
    }

    /// The prepare hook body. Load failures are recorded in the state and
    /// never returned.
    ///
    /// At most one load runs per boundary. Prepares that arrive while it is
    /// in flight report its chunks and await the same attempt; only the
    /// first to observe the outcome moves the state out of `Loading`.
    async fn prepare(&self, context: Context) -> Result<(), PrepareError> {
        let pending = {
            let mut slot = self.slot();
            let joined = slot.pending.clone();
            if slot.state.is_settled() || joined.is_some() {
                if let Some(preload) = context.preload_chunks() {
                    preload.extend(slot.chunks.iter().cloned());
                }
            }
            if slot.state.is_settled() {
                return Ok(());
            }
            match joined {
                Some(pending) => pending,
                None => {
                    let pending = self.start_load(&mut slot, &context);
                    slot.pending = Some(pending.clone());
                    pending
                }
            }
        };

        let outcome = pending.await;
        {
            let mut slot = self.slot();
            if slot.state.is_settled() {
                return Ok(());
            }
            slot.pending = None;
            slot.state = match &outcome {
                Ok(ty) => LoadState::Loaded(ty.clone()),
                Err(e) => LoadState::Failed(Arc::clone(e)),
            };
        }

        match outcome {
            Ok(ty) => tracing::debug!(component = %ty.name(), "split module loaded"),
            Err(e) => report_failure(&context, e),
        }
        Ok(())
    }

    fn start_load(&self, slot: &mut Slot, context: &Context) -> PendingLoad {
        let chunks = self.load.chunk_ids();
        if let Some(preload) = context.preload_chunks() {
            preload.extend(chunks.iter().cloned());
        }
        slot.chunks = chunks.clone();

        let loaders = context
            .split_loaders()
            .map(|loaders| loaders.snapshot())
            .unwrap_or_default();
        tracing::debug!(chunks = chunks.len(), loaders = loaders.len(), "loading split module");

        let load = Arc::clone(&self.load);
        async move {
            let loads = try_join_all(loaders.iter().map(|loader| loader.load_chunks(&chunks)));
            let (module, _) = try_join(load.load(), loads).await.map_err(Arc::new)?;
            Ok::<_, Arc<LoadError>>(module.default)
        }
        .boxed()
        .shared()
    }
}

fn report_failure(context: &Context, error: Arc<LoadError>) {
    if context.is_preparing() {
        tracing::debug!(error = %error, "split module failed to load");
        return;
    }
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(async move {
                tracing::error!(error = %error, "split module failed to load");
            });
        }
        Err(_) => tracing::error!(error = %error, "split module failed to load"),
    }
}
