use super::{
    DEFAULT_ROOTS, NodeId, NodeKind, PATH_SEPARATOR, SceneError, SceneGraph, Selector,
};

#[derive(Debug)]
struct NodeRecord {
    name: String,
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-process [`SceneGraph`] backed by an ordinary node table.
///
/// Stands in for the host application during tests and headless runs. It
/// enforces the same sibling name-uniqueness policy a real host would:
/// renaming a node to a name already held by one of its siblings fails with
/// [`SceneError::RenameConflict`].
#[derive(Debug, Default)]
pub struct MemoryScene {
    nodes: Vec<NodeRecord>,
    selection: Vec<NodeId>,
}

impl MemoryScene {
    /// A scene seeded with the default camera roots (`persp`, `top`, `front`,
    /// `side`), each already carrying a conforming `<name>Shape` child.
    pub fn new() -> Self {
        let mut scene = Self::empty();
        for root in DEFAULT_ROOTS {
            let camera = scene
                .add_transform(root, None)
                .expect("default roots are unique");
            scene
                .add_shape(&format!("{root}Shape"), camera)
                .expect("default shapes are unique");
        }
        scene
    }

    /// A scene with no nodes at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn add_transform(
        &mut self,
        name: &str,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        self.add_node(name, NodeKind::Transform, parent)
    }

    pub fn add_shape(&mut self, name: &str, parent: NodeId) -> Result<NodeId, SceneError> {
        self.add_node(name, NodeKind::Shape, Some(parent))
    }

    pub fn add_node(
        &mut self,
        name: &str,
        kind: NodeKind,
        parent: Option<NodeId>,
    ) -> Result<NodeId, SceneError> {
        if name.is_empty() {
            return Err(SceneError::EmptyName);
        }
        if let Some(parent) = parent {
            self.record(parent)?;
        }
        if self.sibling_named(parent, name, None).is_some() {
            return Err(SceneError::RenameConflict {
                path: self.path_for(parent, name),
                name: name.to_string(),
            });
        }

        let id = NodeId::from_raw(self.nodes.len() as u64);
        self.nodes.push(NodeRecord {
            name: name.to_string(),
            kind,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.to_raw() as usize].children.push(id);
        }
        Ok(id)
    }

    /// Resolve a full `|`-separated path back to a node, mostly useful in
    /// assertions.
    pub fn find_path(&self, path: &str) -> Option<NodeId> {
        let mut current: Option<NodeId> = None;
        for part in path.split(PATH_SEPARATOR).filter(|part| !part.is_empty()) {
            current = Some(self.sibling_named(current, part, None)?);
        }
        current
    }

    pub fn selection(&self) -> &[NodeId] {
        &self.selection
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn record(&self, node: NodeId) -> Result<&NodeRecord, SceneError> {
        self.nodes
            .get(node.to_raw() as usize)
            .ok_or(SceneError::UnknownNode(node))
    }

    fn sibling_named(&self, parent: Option<NodeId>, name: &str, skip: Option<NodeId>) -> Option<NodeId> {
        let mut siblings = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, record)| (NodeId::from_raw(index as u64), record))
            .filter(|(_, record)| record.parent == parent);
        siblings
            .find(|(id, record)| Some(*id) != skip && record.name == name)
            .map(|(id, _)| id)
    }

    fn path_for(&self, parent: Option<NodeId>, name: &str) -> String {
        match parent.and_then(|parent| self.full_path(parent).ok()) {
            Some(parent_path) => format!("{parent_path}{PATH_SEPARATOR}{name}"),
            None => format!("{PATH_SEPARATOR}{name}"),
        }
    }

    fn collect_descendants(&self, node: NodeId, out: &mut Vec<NodeId>) {
        if let Ok(record) = self.record(node) {
            for &child in &record.children {
                out.push(child);
                self.collect_descendants(child, out);
            }
        }
    }
}

impl SceneGraph for MemoryScene {
    fn list(&self, selector: Selector) -> Vec<NodeId> {
        match selector {
            Selector::Selection => self.selection.clone(),
            Selector::Kind(kind) => self
                .nodes
                .iter()
                .enumerate()
                .filter(|(_, record)| record.kind == kind)
                .map(|(index, _)| NodeId::from_raw(index as u64))
                .collect(),
            Selector::All => (0..self.nodes.len() as u64).map(NodeId::from_raw).collect(),
        }
    }

    fn all_descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(node, &mut out);
        out
    }

    fn shapes(&self, node: NodeId) -> Vec<NodeId> {
        self.record(node)
            .map(|record| {
                record
                    .children
                    .iter()
                    .copied()
                    .filter(|&child| {
                        self.record(child)
                            .map(|record| record.kind == NodeKind::Shape)
                            .unwrap_or(false)
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn full_path(&self, node: NodeId) -> Result<String, SceneError> {
        let mut parts = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let record = self.record(id)?;
            parts.push(record.name.clone());
            current = record.parent;
        }
        parts.reverse();
        let mut path = String::new();
        for part in parts {
            path.push(PATH_SEPARATOR);
            path.push_str(&part);
        }
        Ok(path)
    }

    fn rename(&mut self, node: NodeId, name: &str) -> Result<(), SceneError> {
        if name.is_empty() {
            return Err(SceneError::EmptyName);
        }
        let parent = self.record(node)?.parent;
        if self.sibling_named(parent, name, Some(node)).is_some() {
            return Err(SceneError::RenameConflict {
                path: self.full_path(node)?,
                name: name.to_string(),
            });
        }
        self.nodes[node.to_raw() as usize].name = name.to_string();
        Ok(())
    }

    fn select(&mut self, nodes: &[NodeId]) {
        self.selection = nodes
            .iter()
            .copied()
            .filter(|node| (node.to_raw() as usize) < self.nodes.len())
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_follow_hierarchy() {
        let mut scene = MemoryScene::empty();
        let group = scene.add_transform("group", None).unwrap();
        let arm = scene.add_transform("arm", Some(group)).unwrap();
        let shape = scene.add_shape("armShape", arm).unwrap();

        assert_eq!(scene.full_path(shape).unwrap(), "|group|arm|armShape");
        assert_eq!(scene.short_name(shape).unwrap(), "armShape");
        assert_eq!(scene.find_path("|group|arm"), Some(arm));
    }

    #[test]
    fn rename_updates_descendant_paths() {
        let mut scene = MemoryScene::empty();
        let group = scene.add_transform("group", None).unwrap();
        let arm = scene.add_transform("arm", Some(group)).unwrap();

        scene.rename(group, "rig").unwrap();
        assert_eq!(scene.full_path(arm).unwrap(), "|rig|arm");
    }

    #[test]
    fn sibling_name_collision_is_rejected() {
        let mut scene = MemoryScene::empty();
        let group = scene.add_transform("group", None).unwrap();
        scene.add_transform("left", Some(group)).unwrap();
        let right = scene.add_transform("right", Some(group)).unwrap();

        let err = scene.rename(right, "left").unwrap_err();
        assert!(matches!(err, SceneError::RenameConflict { .. }));
        assert_eq!(scene.short_name(right).unwrap(), "right");
    }

    #[test]
    fn rename_to_current_name_is_allowed() {
        let mut scene = MemoryScene::empty();
        let node = scene.add_transform("solo", None).unwrap();
        scene.rename(node, "solo").unwrap();
        assert_eq!(scene.short_name(node).unwrap(), "solo");
    }

    #[test]
    fn same_short_name_under_different_parents_is_fine() {
        let mut scene = MemoryScene::empty();
        let left = scene.add_transform("left", None).unwrap();
        let right = scene.add_transform("right", None).unwrap();
        scene.add_transform("hand", Some(left)).unwrap();
        assert!(scene.add_transform("hand", Some(right)).is_ok());
    }

    #[test]
    fn descendants_are_depth_first_and_exclude_self() {
        let mut scene = MemoryScene::empty();
        let root = scene.add_transform("root", None).unwrap();
        let a = scene.add_transform("a", Some(root)).unwrap();
        let a_shape = scene.add_shape("aShape", a).unwrap();
        let b = scene.add_transform("b", Some(root)).unwrap();

        assert_eq!(scene.all_descendants(root), vec![a, a_shape, b]);
        assert_eq!(scene.shapes(a), vec![a_shape]);
    }

    #[test]
    fn default_scene_carries_conforming_camera_shapes() {
        let scene = MemoryScene::new();
        assert_eq!(scene.node_count(), 8);
        assert!(scene.find_path("|persp|perspShape").is_some());
        assert!(scene.find_path("|side|sideShape").is_some());
    }

    #[test]
    fn selection_drops_unknown_handles() {
        let mut scene = MemoryScene::empty();
        let node = scene.add_transform("only", None).unwrap();
        scene.select(&[node, NodeId::from_raw(99)]);
        assert_eq!(scene.selection(), &[node]);
    }
}
