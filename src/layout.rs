//! Row layout: one rectangle per node, indented by depth, in pre-order.

use ratatui::layout::Rect;

use crate::gesture::BoundsHost;
use crate::hit_test::Bounds;
use crate::tree::{NodeId, NodeKey, NodeTree};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowLayout {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub row_height: f64,
    pub indent: f64,
}

impl Default for RowLayout {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 100.0,
            row_height: 20.0,
            indent: 10.0,
        }
    }
}

impl From<Rect> for RowLayout {
    /// One terminal row per node, two columns of indent per level.
    fn from(area: Rect) -> Self {
        Self {
            left: f64::from(area.x),
            top: f64::from(area.y),
            width: f64::from(area.width),
            row_height: 1.0,
            indent: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutRow {
    pub key: NodeKey,
    pub id: NodeId,
    pub depth: usize,
    pub bounds: Bounds,
}

impl RowLayout {
    /// Lay out `root` and its descendants. Depth is measured from `root`, so
    /// laying out a subtree starts it flush left.
    pub fn rows<P>(&self, tree: &NodeTree<P>, root: NodeKey) -> Vec<LaidOutRow> {
        let base_depth = tree.get(root).map_or(0, |node| node.depth());
        tree.subtree(root)
            .into_iter()
            .filter_map(|key| tree.get(key))
            .enumerate()
            .map(|(index, node)| {
                let depth = node.depth() - base_depth;
                let inset = (depth as f64 * self.indent).min(self.width);
                LaidOutRow {
                    key: node.key(),
                    id: node.id().clone(),
                    depth,
                    bounds: Bounds::new(
                        self.left + inset,
                        self.top + index as f64 * self.row_height,
                        self.width - inset,
                        self.row_height,
                    ),
                }
            })
            .collect()
    }

    pub fn host<P>(&self, tree: &NodeTree<P>, root: NodeKey) -> BoundsHost {
        self.rows(tree, root)
            .into_iter()
            .map(|row| (row.id, row.bounds))
            .collect()
    }
}
