pub mod rename;
pub mod scene;

pub use rename::{
    AffixPosition, BatchReport, NumberPattern, PatternError, RenameError, ReplaceScope, TrimEnd,
};
pub use scene::{MemoryScene, NodeId, NodeKind, SceneError, SceneGraph, Selector};
