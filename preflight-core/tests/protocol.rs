//! Acceptance tests for the protocol types.
//!
//! Tests cover:
//! - Send + Sync of everything a traversal moves between tasks
//! - Component identity
//! - Context construction and shared channels
//! - Error display

use preflight_core::*;
use serde_json::json;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Send + Sync
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

fn _assert_send_sync<T: Send + Sync>() {}
fn _assert_send<T: Send>() {}

#[test]
fn tree_types_are_send_sync() {
    _assert_send_sync::<Node>();
    _assert_send_sync::<Element>();
    _assert_send_sync::<Context>();
    _assert_send_sync::<CompositeType>();
    _assert_send_sync::<FunctionComponent>();
}

#[test]
fn component_instances_are_send() {
    _assert_send::<Box<dyn Component>>();
}

#[test]
fn chunk_loader_is_object_safe_send_sync() {
    _assert_send_sync::<std::sync::Arc<dyn ChunkLoader>>();
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Identity
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

struct Leaf;

impl Component for Leaf {
    fn render(&mut self) -> Node {
        Node::Empty
    }
}

#[test]
fn clones_keep_identity_and_declarations_do_not() {
    let a = CompositeType::new("Leaf", |_, _| Leaf);
    let b = CompositeType::new("Leaf", |_, _| Leaf);
    assert_eq!(a, a.clone());
    assert_ne!(a, b);
    assert_eq!(
        ElementType::from(a.clone()).component_id(),
        Some(a.id())
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Context
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn from_value_ignores_non_objects() {
    let ctx = Context::from_value(json!([1, 2, 3]));
    assert!(ctx.values().next().is_none());
    let ctx = Context::from_value(json!({"user": "ada"}));
    assert_eq!(ctx.get("user"), Some(&json!("ada")));
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Errors
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test]
fn errors_display_their_cause() {
    let err = PrepareError::Failed("no data".into());
    assert_eq!(err.to_string(), "prepare failed: no data");

    let err: PrepareError = LoadError::ChunkFailed {
        chunk: "42".into(),
        message: "404".into(),
    }
    .into();
    assert_eq!(err.to_string(), "load error: chunk 42 failed to load: 404");

    assert_eq!(
        PrepareError::DepthExceeded(8).to_string(),
        "traversal exceeded max depth of 8"
    );
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Channels
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Default)]
struct RecordingLoader {
    seen: std::sync::Mutex<Vec<String>>,
}

#[async_trait::async_trait]
impl ChunkLoader for RecordingLoader {
    async fn load_chunks(&self, chunks: &[ChunkId]) -> Result<(), LoadError> {
        for chunk in chunks {
            self.seen.lock().unwrap().push(chunk.to_string());
        }
        Ok(())
    }
}

#[tokio::test]
async fn split_loaders_are_shared_through_merged_contexts() {
    let recorder = std::sync::Arc::new(RecordingLoader::default());
    let loaders = SplitLoaders::new();
    let root = Context::new().with_split_loaders(loaders.clone());
    let child = root.merge(ContextPatch::new().with("k", 1));

    child
        .split_loaders()
        .unwrap()
        .register(recorder.clone());
    assert_eq!(loaders.len(), 1);

    for loader in loaders.snapshot() {
        loader
            .load_chunks(&[ChunkId::new("a"), ChunkId::new("b")])
            .await
            .unwrap();
    }
    assert_eq!(*recorder.seen.lock().unwrap(), vec!["a", "b"]);
}
