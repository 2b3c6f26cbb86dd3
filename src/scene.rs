//! The host object model the grid builds into.
//!
//! Grid construction never touches an engine directly. Instead it drives a
//! [`SceneContainer`]: something that can instantiate objects, parent them,
//! position them, and destroy them again. [`MemoryScene`] is a plain
//! in-memory implementation used by the CLI and the tests; engine
//! integrations implement the trait over their own scene graph.

use glam::Vec3;
use std::collections::{BTreeMap, BTreeSet};

/// Handle to a node in a scene.
pub type NodeId = u32;

/// Operations the grid needs from a scene graph.
pub trait SceneContainer {
    type Object;

    /// The node that owns everything the grid builds.
    fn root(&self) -> NodeId;

    /// Creates a new node holding `object`, parented to the root.
    fn instantiate(&mut self, object: Self::Object) -> NodeId;

    /// Destroys `node` and all of its descendants immediately.
    fn destroy(&mut self, node: NodeId);

    fn set_parent(&mut self, node: NodeId, parent: NodeId);

    fn set_local_position(&mut self, node: NodeId, position: Vec3);

    /// Direct children of `parent`, in creation order.
    fn children(&self, parent: NodeId) -> Vec<NodeId>;

    /// Destroys every child of `parent`, leaving `parent` itself in place.
    fn destroy_children(&mut self, parent: NodeId) {
        for child in self.children(parent) {
            self.destroy(child);
        }
    }
}

#[derive(Clone, Debug)]
struct Node<T> {
    object: Option<T>,
    parent: Option<NodeId>,
    /// Ordered by id, which is creation order.
    children: BTreeSet<NodeId>,
    position: Vec3,
}

impl<T> Node<T> {
    fn new(object: Option<T>, parent: Option<NodeId>) -> Self {
        Self {
            object,
            parent,
            children: BTreeSet::new(),
            position: Vec3::ZERO,
        }
    }
}

/// A scene graph kept entirely in memory.
#[derive(Clone, Debug)]
pub struct MemoryScene<T> {
    nodes: BTreeMap<NodeId, Node<T>>,
    root: NodeId,
    next_id: NodeId,
}

impl<T> Default for MemoryScene<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> MemoryScene<T> {
    pub fn new() -> Self {
        let root = 0;
        let mut nodes = BTreeMap::new();
        nodes.insert(root, Node::new(None, None));
        Self {
            nodes,
            root,
            next_id: root + 1,
        }
    }

    /// Number of live nodes, not counting the root.
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn object(&self, node: NodeId) -> Option<&T> {
        self.nodes.get(&node)?.object.as_ref()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node)?.parent
    }

    pub fn local_position(&self, node: NodeId) -> Option<Vec3> {
        self.nodes.get(&node).map(|n| n.position)
    }

    /// Removes `node` and its descendants without unlinking it from its parent.
    fn remove_subtree(&mut self, node: NodeId) {
        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                pending.extend(removed.children);
            }
        }
    }

    /// True if `ancestor` is `node` or one of its ancestors.
    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}

impl<T> SceneContainer for MemoryScene<T> {
    type Object = T;

    fn root(&self) -> NodeId {
        self.root
    }

    fn instantiate(&mut self, object: T) -> NodeId {
        let id = self.next_id;
        self.next_id += 1;
        self.nodes.insert(id, Node::new(Some(object), Some(self.root)));
        if let Some(root) = self.nodes.get_mut(&self.root) {
            root.children.insert(id);
        }
        id
    }

    fn destroy(&mut self, node: NodeId) {
        if node == self.root {
            return;
        }
        let Some(parent) = self.parent(node) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.remove(&node);
        }
        self.remove_subtree(node);
    }

    fn set_parent(&mut self, node: NodeId, parent: NodeId) {
        if node == self.root || !self.nodes.contains_key(&node) {
            return;
        }
        if !self.nodes.contains_key(&parent) || self.is_ancestor(node, parent) {
            return;
        }
        let old = self.parent(node);
        if old == Some(parent) {
            return;
        }
        if let Some(p) = old.and_then(|id| self.nodes.get_mut(&id)) {
            p.children.remove(&node);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.insert(node);
        }
        if let Some(n) = self.nodes.get_mut(&node) {
            n.parent = Some(parent);
        }
    }

    fn set_local_position(&mut self, node: NodeId, position: Vec3) {
        if let Some(n) = self.nodes.get_mut(&node) {
            n.position = position;
        }
    }

    fn children(&self, parent: NodeId) -> Vec<NodeId> {
        self.nodes
            .get(&parent)
            .map(|n| n.children.iter().copied().collect())
            .unwrap_or_default()
    }

    fn destroy_children(&mut self, parent: NodeId) {
        let children = match self.nodes.get_mut(&parent) {
            Some(n) => std::mem::take(&mut n.children),
            None => return,
        };
        for child in children {
            self.remove_subtree(child);
        }
    }
}
