use std::collections::HashMap;

use super::description::NodeDescription;
use super::node::{DragType, Node, NodeId, NodeKey};
use super::registry::IdentityRegistry;

/// Input accepted by [`NodeTree::construct`].
#[derive(Debug, Clone)]
pub enum NodeSource<P> {
    /// An already-live node; construction hands it back untouched.
    Live(NodeKey),
    Description(NodeDescription<P>),
}

impl<P> From<NodeKey> for NodeSource<P> {
    fn from(key: NodeKey) -> Self {
        NodeSource::Live(key)
    }
}

impl<P> From<NodeDescription<P>> for NodeSource<P> {
    fn from(desc: NodeDescription<P>) -> Self {
        NodeSource::Description(desc)
    }
}

/// Arena of nodes forming one or more trees.
///
/// Every live node is registered by id in the tree's own
/// [`IdentityRegistry`]. Roots are always droppable and have depth 0; every
/// other node shares its parent's root and sits one level deeper.
#[derive(Debug)]
pub struct NodeTree<P> {
    nodes: HashMap<NodeKey, Node<P>>,
    roots: Vec<NodeKey>,
    registry: IdentityRegistry,
    next_key: u64,
}

impl<P> Default for NodeTree<P> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            registry: IdentityRegistry::new(),
            next_key: 0,
        }
    }
}

impl<P> NodeTree<P> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a node (and its descendants) from `source`.
    ///
    /// A live key is returned unchanged. A description becomes a new root when
    /// `parent` is `None`, otherwise it is appended as the last child of
    /// `parent`. Returns `None` only when the source key or the parent is not
    /// live.
    pub fn construct(
        &mut self,
        source: impl Into<NodeSource<P>>,
        parent: Option<NodeKey>,
    ) -> Option<NodeKey> {
        match source.into() {
            NodeSource::Live(key) => self.contains(key).then_some(key),
            NodeSource::Description(desc) => match parent {
                Some(parent) => {
                    if !self.contains(parent) {
                        tracing::debug!(parent = ?parent, "construct skipped: parent not live");
                        return None;
                    }
                    let key = self.build(desc, Some(parent));
                    self.attach(parent, key, None);
                    Some(key)
                }
                None => {
                    let key = self.build(desc, None);
                    self.roots.push(key);
                    Some(key)
                }
            },
        }
    }

    /// Remove `key` from its parent (or from the root set) and drop it and its
    /// descendants from the arena and the registry.
    pub fn delete_node(&mut self, key: NodeKey) -> bool {
        let Some(node) = self.nodes.get(&key) else {
            return false;
        };
        match node.parent {
            Some(parent) => {
                if let Some(parent) = self.nodes.get_mut(&parent) {
                    parent.children.retain(|child| *child != key);
                }
            }
            None => self.roots.retain(|root| *root != key),
        }
        for doomed in self.subtree(key) {
            if let Some(node) = self.nodes.remove(&doomed) {
                self.registry.deregister(&node.id, doomed);
            }
        }
        tracing::debug!(node = ?key, "deleted node");
        true
    }

    /// Insert a fresh copy of `source` next to `target`, before or after it.
    ///
    /// With [`DragType::Move`] the original `source` is deleted once the copy
    /// is in place. Returns the key of the inserted copy, or `None` when
    /// nothing changed: a missing node, a parentless `target`, or a move of
    /// `source` onto itself or one of its own descendants.
    pub fn insert_node(
        &mut self,
        target: NodeKey,
        source: NodeKey,
        insert_before: bool,
        drag_type: DragType,
    ) -> Option<NodeKey>
    where
        P: Clone,
    {
        let parent = self.nodes.get(&target)?.parent;
        if !self.contains(source) {
            return None;
        }
        let Some(parent) = parent else {
            tracing::debug!(target = ?target, "sibling insert skipped: target is a root");
            return None;
        };
        if drag_type == DragType::Move && self.is_ancestor_or_self(source, target) {
            tracing::debug!(source = ?source, target = ?target, "move into own subtree skipped");
            return None;
        }
        let desc = self.describe(source)?.without_ids();
        let copy = self.build(desc, Some(parent));
        let offset = usize::from(!insert_before);
        self.attach(parent, copy, Some((target, offset)));
        tracing::debug!(
            source = ?source,
            target = ?target,
            copy = ?copy,
            insert_before,
            ?drag_type,
            "inserted node"
        );
        if drag_type == DragType::Move {
            self.delete_node(source);
        }
        Some(copy)
    }

    /// Insert a fresh copy of `source` as the first (`insert_before`) or last
    /// child of `target`. Same move semantics as [`NodeTree::insert_node`].
    pub fn insert_node_in_container(
        &mut self,
        target: NodeKey,
        source: NodeKey,
        insert_before: bool,
        drag_type: DragType,
    ) -> Option<NodeKey>
    where
        P: Clone,
    {
        if !self.contains(target) || !self.contains(source) {
            return None;
        }
        if drag_type == DragType::Move && self.is_ancestor_or_self(source, target) {
            tracing::debug!(source = ?source, target = ?target, "move into own subtree skipped");
            return None;
        }
        let desc = self.describe(source)?.without_ids();
        let copy = self.build(desc, Some(target));
        if let Some(container) = self.nodes.get_mut(&target) {
            if insert_before {
                container.children.insert(0, copy);
            } else {
                container.children.push(copy);
            }
        }
        tracing::debug!(
            source = ?source,
            container = ?target,
            copy = ?copy,
            insert_before,
            ?drag_type,
            "inserted node into container"
        );
        if drag_type == DragType::Move {
            self.delete_node(source);
        }
        Some(copy)
    }

    pub fn get(&self, key: NodeKey) -> Option<&Node<P>> {
        self.nodes.get(&key)
    }

    pub fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<P>> {
        self.nodes.get_mut(&key)
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Registry lookup by id.
    pub fn get_node(&self, id: &NodeId) -> Option<&Node<P>> {
        self.nodes.get(&self.registry.lookup(id)?)
    }

    pub fn key_of(&self, id: &NodeId) -> Option<NodeKey> {
        self.registry
            .lookup(id)
            .filter(|key| self.nodes.contains_key(key))
    }

    /// Walk upward from the node for `id` (inclusive) to the first droppable
    /// node.
    pub fn get_closest_droppable_node(&self, id: &NodeId) -> Option<&Node<P>> {
        let mut current = self.get_node(id);
        while let Some(node) = current {
            if node.droppable {
                return Some(node);
            }
            current = node.parent.and_then(|parent| self.nodes.get(&parent));
        }
        None
    }

    /// Forget every id. Nodes stay in the arena and remain reachable by key.
    pub fn clear(&mut self) {
        self.registry.clear();
    }

    pub fn registry(&self) -> &IdentityRegistry {
        &self.registry
    }

    pub fn roots(&self) -> &[NodeKey] {
        &self.roots
    }

    pub fn children(&self, key: NodeKey) -> &[NodeKey] {
        self.nodes
            .get(&key)
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `ancestor` is `node` or lies on its parent chain.
    pub fn is_ancestor_or_self(&self, ancestor: NodeKey, node: NodeKey) -> bool {
        let mut current = Some(node);
        while let Some(key) = current {
            if key == ancestor {
                return true;
            }
            current = self.nodes.get(&key).and_then(|n| n.parent);
        }
        false
    }

    /// `key` and all its descendants in pre-order.
    pub fn subtree(&self, key: NodeKey) -> Vec<NodeKey> {
        let mut out = Vec::new();
        let mut stack = vec![key];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(&current) else {
                continue;
            };
            out.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Snapshot `key` and its descendants as a description, ids included.
    pub fn describe(&self, key: NodeKey) -> Option<NodeDescription<P>>
    where
        P: Clone,
    {
        let node = self.nodes.get(&key)?;
        Some(NodeDescription {
            id: Some(node.id.clone()),
            droppable: node.droppable,
            drag_type: node.drag_type,
            properties: node.properties.clone(),
            children: node
                .children
                .iter()
                .filter_map(|child| self.describe(*child))
                .collect(),
        })
    }

    /// Flat list form of the tree under `key`: one description per child.
    pub fn to_list(&self, key: NodeKey) -> Vec<NodeDescription<P>>
    where
        P: Clone,
    {
        self.children(key)
            .iter()
            .filter_map(|child| self.describe(*child))
            .collect()
    }

    fn allocate_key(&mut self) -> NodeKey {
        let key = NodeKey(self.next_key);
        self.next_key += 1;
        key
    }

    fn claim_id(&self, requested: Option<NodeId>) -> NodeId {
        if let Some(id) = requested.filter(|id| !id.as_str().is_empty()) {
            if !self.registry.contains(&id) {
                return id;
            }
            tracing::warn!(id = %id, "duplicate node id, assigning a fresh one");
        }
        loop {
            let id = NodeId::generate();
            if !self.registry.contains(&id) {
                return id;
            }
        }
    }

    fn build(&mut self, desc: NodeDescription<P>, parent: Option<NodeKey>) -> NodeKey {
        let NodeDescription {
            id,
            droppable,
            drag_type,
            properties,
            children,
        } = desc;
        let key = self.allocate_key();
        let (root, depth) = match parent.and_then(|parent| self.nodes.get(&parent)) {
            Some(parent) => (parent.root, parent.depth + 1),
            None => (key, 0),
        };
        let id = self.claim_id(id);
        self.registry.register(id.clone(), key);
        self.nodes.insert(
            key,
            Node {
                key,
                id,
                parent,
                root,
                depth,
                droppable: droppable || parent.is_none(),
                drag_type,
                properties,
                children: Vec::new(),
            },
        );
        let children = children
            .into_iter()
            .map(|child| self.build(child, Some(key)))
            .collect();
        if let Some(node) = self.nodes.get_mut(&key) {
            node.children = children;
        }
        key
    }

    /// Place `child` in `parent`'s children, either relative to a sibling
    /// (`offset` 0 = before, 1 = after) or at the end.
    fn attach(&mut self, parent: NodeKey, child: NodeKey, anchor: Option<(NodeKey, usize)>) {
        let Some(parent) = self.nodes.get_mut(&parent) else {
            return;
        };
        let index = anchor
            .and_then(|(sibling, offset)| {
                parent
                    .children
                    .iter()
                    .position(|c| *c == sibling)
                    .map(|pos| pos + offset)
            })
            .unwrap_or(parent.children.len());
        parent.children.insert(index, child);
    }
}

impl<P: Default> NodeTree<P> {
    /// Build a droppable root holding `list` as its children.
    pub fn from_list(&mut self, list: Vec<NodeDescription<P>>) -> NodeKey {
        let desc = NodeDescription::new(P::default())
            .droppable(true)
            .with_children(list);
        let key = self.build(desc, None);
        self.roots.push(key);
        key
    }
}
