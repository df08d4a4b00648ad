use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::node::{DragType, NodeId};
use crate::error::LoadError;

/// Plain, serializable description of a node and its descendants.
///
/// This is the external list form: `{ id?, droppable?, dragType?,
/// properties?, children? }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription<P> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NodeId>,
    #[serde(default)]
    pub droppable: bool,
    #[serde(default)]
    pub drag_type: DragType,
    #[serde(default)]
    pub properties: P,
    #[serde(default)]
    pub children: Vec<NodeDescription<P>>,
}

impl<P> NodeDescription<P> {
    pub fn new(properties: P) -> Self {
        Self {
            id: None,
            droppable: false,
            drag_type: DragType::Move,
            properties,
            children: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn droppable(mut self, droppable: bool) -> Self {
        self.droppable = droppable;
        self
    }

    pub fn with_drag_type(mut self, drag_type: DragType) -> Self {
        self.drag_type = drag_type;
        self
    }

    pub fn with_child(mut self, child: NodeDescription<P>) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = NodeDescription<P>>) -> Self {
        self.children.extend(children);
        self
    }

    /// Drop every id in this subtree so construction assigns fresh ones.
    pub fn without_ids(mut self) -> Self {
        self.id = None;
        self.children = self.children.into_iter().map(Self::without_ids).collect();
        self
    }
}

/// Parse a JSON array of node descriptions.
pub fn parse_list<P: DeserializeOwned + Default>(
    json: &str,
) -> Result<Vec<NodeDescription<P>>, LoadError> {
    serde_json::from_str(json).map_err(LoadError::from)
}

/// Read and parse a JSON array of node descriptions from disk.
pub fn load_list<P: DeserializeOwned + Default>(
    path: impl AsRef<Path>,
) -> Result<Vec<NodeDescription<P>>, LoadError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_list(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Properties;

    #[test]
    fn missing_fields_take_defaults() {
        let list: Vec<NodeDescription<Properties>> =
            parse_list(r#"[{"properties": {"label": "a"}}, {}]"#).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, None);
        assert!(!list[0].droppable);
        assert_eq!(list[0].drag_type, DragType::Move);
        assert_eq!(list[0].properties["label"], "a");
        assert!(list[1].properties.is_empty());
    }

    #[test]
    fn invalid_drag_type_is_normalized() {
        let list: Vec<NodeDescription<Properties>> =
            parse_list(r#"[{"dragType": "sideways"}, {"dragType": 7}, {"dragType": "copy"}]"#)
                .unwrap();
        assert_eq!(list[0].drag_type, DragType::Move);
        assert_eq!(list[1].drag_type, DragType::Move);
        assert_eq!(list[2].drag_type, DragType::Copy);
    }

    #[test]
    fn without_ids_strips_nested_ids() {
        let desc = NodeDescription::new(())
            .with_id("a")
            .with_child(NodeDescription::new(()).with_id("b"));
        let stripped = desc.without_ids();
        assert_eq!(stripped.id, None);
        assert_eq!(stripped.children[0].id, None);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let result: Result<Vec<NodeDescription<Properties>>, _> = parse_list("{not json");
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }
}
