//! Per-request glue for server renderers.
//!
//! A renderer keeps one [`RenderContext`] per request. [`prepare_plugin`]
//! wraps the request's element in a [`PrepareProvider`] so split boundaries
//! report into the request's [`PreloadChunks`]; [`prepare_request`] does that
//! and runs the traversal, returning the collected chunk ids.

use preflight_core::{ChunkId, Context, Element, PrepareError, PreloadChunks};
use preflight_split::PrepareProvider;
use preflight_traverse::Traversal;

/// Per-request render state.
#[derive(Debug, Default)]
pub struct RenderContext {
    /// The element to render. `None` means the request renders nothing.
    pub element: Option<Element>,
    /// Chunk ids to preload, filled in during preparation.
    pub preload_chunks: PreloadChunks,
}

impl RenderContext {
    /// A render context for `element` with an empty preload channel.
    pub fn new(element: Element) -> Self {
        Self {
            element: Some(element),
            preload_chunks: PreloadChunks::new(),
        }
    }
}

/// Wrap the request's element in a provider bound to its preload channel.
/// Does nothing when there is no element.
pub fn prepare_plugin(ctx: &mut RenderContext) {
    if let Some(element) = ctx.element.take() {
        ctx.element = Some(PrepareProvider::element(ctx.preload_chunks.clone(), element));
    }
}

/// Apply [`prepare_plugin`], prepare the element with the default traversal
/// and return every chunk id reported while preparing.
pub async fn prepare_request(ctx: &mut RenderContext) -> Result<Vec<ChunkId>, PrepareError> {
    prepare_request_with(ctx, &Traversal::new(), Context::new()).await
}

/// [`prepare_request`] with an explicit traversal and root context.
pub async fn prepare_request_with(
    ctx: &mut RenderContext,
    traversal: &Traversal,
    context: Context,
) -> Result<Vec<ChunkId>, PrepareError> {
    prepare_plugin(ctx);
    let Some(element) = ctx.element.clone() else {
        tracing::debug!("no element to prepare");
        return Ok(Vec::new());
    };
    traversal.run(element, context).await?;
    let chunks = ctx.preload_chunks.snapshot();
    tracing::debug!(chunks = chunks.len(), "request prepared");
    Ok(chunks)
}
