//! Identity-indexed, parent-linked node trees.
//!
//! Nodes live in an arena owned by [`NodeTree`]; parent and root links are
//! [`NodeKey`]s rather than references, and ids resolve through the tree's
//! own [`IdentityRegistry`].

pub mod description;
pub mod node;
pub mod node_tree;
pub mod registry;

pub use description::{NodeDescription, load_list, parse_list};
pub use node::{DragType, Node, NodeId, NodeKey};
pub use node_tree::{NodeSource, NodeTree};
pub use registry::IdentityRegistry;

/// Property bag used by the binaries.
pub type Properties = serde_json::Map<String, serde_json::Value>;
