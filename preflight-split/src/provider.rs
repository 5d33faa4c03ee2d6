//! The provider that seeds split channels for a subtree.

use preflight_core::{
    Component, CompositeType, Context, ContextPatch, Element, Node, PreloadChunks, Props,
    SplitLoaders,
};

/// Seeds the channels split boundaries report into.
///
/// Every instance starts a fresh [`SplitLoaders`] list and hands down the
/// [`PreloadChunks`] it was built with, then renders its child unchanged.
#[derive(Debug, Clone, Copy)]
pub struct PrepareProvider;

impl PrepareProvider {
    /// A provider type bound to `preload_chunks`.
    pub fn component(preload_chunks: PreloadChunks) -> CompositeType {
        CompositeType::new("PrepareProvider", move |props: &Props, _: &Context| {
            ProviderInstance {
                split_loaders: SplitLoaders::new(),
                preload_chunks: preload_chunks.clone(),
                child: props.children.clone(),
            }
        })
    }

    /// Wrap `child` in a provider bound to `preload_chunks`.
    pub fn element(preload_chunks: PreloadChunks, child: impl Into<Node>) -> Element {
        Element::of(Self::component(preload_chunks)).child(child)
    }
}

struct ProviderInstance {
    split_loaders: SplitLoaders,
    preload_chunks: PreloadChunks,
    child: Node,
}

impl Component for ProviderInstance {
    fn child_context(&self) -> Option<ContextPatch> {
        Some(
            ContextPatch::new()
                .with_split_loaders(self.split_loaders.clone())
                .with_preload_chunks(self.preload_chunks.clone()),
        )
    }

    fn render(&mut self) -> Node {
        std::mem::take(&mut self.child)
    }
}
