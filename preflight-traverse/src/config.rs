//! Configuration types for the traversal.

use serde::{Deserialize, Serialize};

/// How sibling subtrees are driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fanout {
    /// Each child subtree runs as its own Tokio task. When one branch fails
    /// the traversal returns immediately and the other tasks keep running
    /// to completion in the background. Falls back to `Joined` outside a
    /// Tokio runtime.
    #[default]
    Spawned,
    /// All branches are polled inside the caller's task. When one branch
    /// fails the others are dropped.
    Joined,
}

/// Configuration for a [`crate::Traversal`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    /// How sibling subtrees are driven.
    pub fanout: Fanout,
    /// Maximum element depth before the traversal gives up.
    /// `None` means no limit.
    pub max_depth: Option<usize>,
}
