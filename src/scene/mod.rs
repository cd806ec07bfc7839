pub mod memory;

pub use memory::MemoryScene;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Handle referencing a node within a scene graph.
///
/// The handle is stable across renames; only the display path changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

/// Broad classification of scene nodes. Transforms carry hierarchy and may
/// own child shapes; everything else is opaque to the rename engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Transform,
    Shape,
    Other,
}

/// Which nodes a [`SceneGraph::list`] call returns.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector {
    /// The current selection, in selection order.
    Selection,
    /// Every node of the given kind, in scene order.
    Kind(NodeKind),
    /// Every node in the scene, in scene order.
    All,
}

/// Path separator used in full node paths, e.g. `|group|arm|armShape`.
pub const PATH_SEPARATOR: char = '|';

/// Root transforms present in a freshly created scene. Shape-name
/// synchronization leaves these alone.
pub const DEFAULT_ROOTS: [&str; 4] = ["persp", "top", "front", "side"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("node {0:?} is not in the scene")]
    UnknownNode(NodeId),
    #[error("cannot rename {path} to {name:?}: a sibling already has that name")]
    RenameConflict { path: String, name: String },
    #[error("node name cannot be empty")]
    EmptyName,
}

/// Minimal contract a host scene graph exposes to the rename engine.
///
/// A production host (a 3D content-creation application) implements this over
/// its own node store; [`MemoryScene`] is the in-process implementation used
/// in tests and headless runs.
pub trait SceneGraph {
    /// Nodes matching `selector`. Selection order is preserved for
    /// [`Selector::Selection`].
    fn list(&self, selector: Selector) -> Vec<NodeId>;

    /// Every node below `node`, depth first. Does not include `node` itself.
    fn all_descendants(&self, node: NodeId) -> Vec<NodeId>;

    /// Direct shape children of `node`.
    fn shapes(&self, node: NodeId) -> Vec<NodeId>;

    /// Full `|`-separated path of `node`, starting with the separator.
    fn full_path(&self, node: NodeId) -> Result<String, SceneError>;

    /// Give `node` the short name `name`. The host enforces its own
    /// uniqueness policy among siblings.
    fn rename(&mut self, node: NodeId, name: &str) -> Result<(), SceneError>;

    /// Replace the current selection.
    fn select(&mut self, nodes: &[NodeId]);

    /// Leaf component of the node's full path.
    fn short_name(&self, node: NodeId) -> Result<String, SceneError> {
        let path = self.full_path(node)?;
        Ok(path
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or_default()
            .to_string())
    }
}
