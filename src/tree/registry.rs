use std::collections::HashMap;

use super::node::{NodeId, NodeKey};

/// Lookup from node id to arena slot.
///
/// Holds keys rather than nodes, so it never keeps a deleted node alive.
#[derive(Debug, Default, Clone)]
pub struct IdentityRegistry {
    entries: HashMap<NodeId, NodeKey>,
}

impl IdentityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookup(&self, id: &NodeId) -> Option<NodeKey> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn register(&mut self, id: NodeId, key: NodeKey) {
        self.entries.insert(id, key);
    }

    /// Remove `id` only while it still points at `key`.
    pub fn deregister(&mut self, id: &NodeId, key: NodeKey) -> bool {
        if self.entries.get(id) == Some(&key) {
            self.entries.remove(id);
            true
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, NodeKey)> {
        self.entries.iter().map(|(id, key)| (id, *key))
    }
}
