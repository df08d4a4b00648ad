use std::fmt;

use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{NODE_ID_ALPHABET, NODE_ID_LEN};

/// Arena slot of a node inside a [`NodeTree`](super::NodeTree).
///
/// Keys are handed out monotonically and never reused, so a key held after
/// its node was deleted simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub(crate) u64);

/// Stable, externally visible node identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a collision-resistant random id.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..NODE_ID_LEN)
            .map(|_| NODE_ID_ALPHABET[rng.random_range(0..NODE_ID_ALPHABET.len())] as char)
            .collect();
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// How a node behaves when it is dropped somewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DragType {
    #[default]
    Move,
    Copy,
}

impl DragType {
    /// Parse a drag type, falling back to [`DragType::Move`] for anything
    /// unrecognised.
    pub fn parse_lossy(value: &str) -> Self {
        if value.eq_ignore_ascii_case("copy") {
            DragType::Copy
        } else {
            DragType::Move
        }
    }
}

impl<'de> Deserialize<'de> for DragType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(s) => DragType::parse_lossy(&s),
            _ => DragType::Move,
        })
    }
}

/// One element of a tree.
///
/// Structural fields are read-only from the outside; every edit goes through
/// [`NodeTree`](super::NodeTree) so parent, root and depth stay consistent.
#[derive(Debug, Clone)]
pub struct Node<P> {
    pub(crate) key: NodeKey,
    pub(crate) id: NodeId,
    pub(crate) parent: Option<NodeKey>,
    pub(crate) root: NodeKey,
    pub(crate) depth: usize,
    pub(crate) droppable: bool,
    pub(crate) drag_type: DragType,
    pub(crate) properties: P,
    pub(crate) children: Vec<NodeKey>,
}

impl<P> Node<P> {
    pub fn key(&self) -> NodeKey {
        self.key
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    pub fn root(&self) -> NodeKey {
        self.root
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn droppable(&self) -> bool {
        self.droppable
    }

    pub fn drag_type(&self) -> DragType {
        self.drag_type
    }

    pub fn properties(&self) -> &P {
        &self.properties
    }

    /// Application payload; editing it never touches tree mechanics.
    pub fn properties_mut(&mut self) -> &mut P {
        &mut self.properties
    }

    pub fn children(&self) -> &[NodeKey] {
        &self.children
    }
}
