//! Terminal rendering of a [`NodeTree`], and the geometry the gesture
//! controller hit-tests against.
//!
//! The view owns no tree state. Each frame it lays the tree out into one row
//! per node, remembers those rows as a [`BoundsHost`], and draws them. Drag
//! feedback comes in through listeners registered with [`TreeView::attach`].

use std::cell::RefCell;
use std::rc::Rc;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::gesture::{BoundsHost, DragEventType, DragNotification, GestureController};
use crate::layout::{LaidOutRow, RowLayout};
use crate::tree::{Node, NodeId, NodeKey, NodeTree, Properties};

pub type LabelFn<P> = Rc<dyn Fn(&Node<P>) -> String>;

/// Label from the `label` property, falling back to the node id.
pub fn property_label(node: &Node<Properties>) -> String {
    node.properties()
        .get("label")
        .and_then(|value| value.as_str())
        .map_or_else(|| node.id().to_string(), str::to_string)
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct DragPreview {
    /// Label of the node being dragged.
    pub dragging: Option<String>,
    pub dragged_id: Option<NodeId>,
    /// Id of the node currently under the pointer.
    pub hover: Option<NodeId>,
    /// Summary of the last finished drag.
    pub last_drop: Option<String>,
}

pub struct TreeView<P> {
    title: String,
    label: LabelFn<P>,
    rows: Vec<LaidOutRow>,
    host: BoundsHost,
    preview: Rc<RefCell<DragPreview>>,
}

impl<P: 'static> TreeView<P> {
    pub fn new(title: impl Into<String>, label: impl Fn(&Node<P>) -> String + 'static) -> Self {
        Self {
            title: title.into(),
            label: Rc::new(label),
            rows: Vec::new(),
            host: BoundsHost::new(),
            preview: Rc::new(RefCell::new(DragPreview::default())),
        }
    }

    /// Subscribe to the controller's lifecycle notifications.
    pub fn attach(&self, controller: &mut GestureController<P>) {
        let preview = Rc::clone(&self.preview);
        let label = Rc::clone(&self.label);
        controller.subscribe(DragEventType::DragStart, move |n: &DragNotification<'_, P>| {
            let mut preview = preview.borrow_mut();
            preview.dragging = n.node.map(|node| label(node));
            preview.dragged_id = n.node.map(|node| node.id().clone());
            preview.hover = None;
        });

        let preview = Rc::clone(&self.preview);
        controller.subscribe(DragEventType::Dragging, move |n: &DragNotification<'_, P>| {
            preview.borrow_mut().hover = n.node.map(|node| node.id().clone());
        });

        let preview = Rc::clone(&self.preview);
        let label = Rc::clone(&self.label);
        controller.subscribe(DragEventType::DragEnd, move |n: &DragNotification<'_, P>| {
            let mut preview = preview.borrow_mut();
            let dragged = preview
                .dragging
                .take()
                .unwrap_or_else(|| "nothing".to_string());
            preview.dragged_id = None;
            preview.last_drop = Some(match n.node {
                Some(node) => format!("dropped {dragged} on {}", label(node)),
                None => format!("dropped {dragged} outside the tree"),
            });
            preview.hover = None;
        });
    }

    pub fn preview(&self) -> DragPreview {
        self.preview.borrow().clone()
    }

    /// Geometry from the last [`TreeView::layout`] or [`TreeView::render`].
    pub fn host(&self) -> &BoundsHost {
        &self.host
    }

    pub fn rows(&self) -> &[LaidOutRow] {
        &self.rows
    }

    /// Recompute row geometry for `root` inside `area` (the block's inner
    /// area).
    pub fn layout(&mut self, tree: &NodeTree<P>, root: NodeKey, area: Rect) {
        let mut rows = RowLayout::from(area).rows(tree, root);
        rows.truncate(usize::from(area.height));
        self.host = rows
            .iter()
            .map(|row| (row.id.clone(), row.bounds))
            .collect();
        self.rows = rows;
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, tree: &NodeTree<P>, root: NodeKey) {
        let [tree_area, status_area] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .areas(area);

        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.title.as_str())
            .border_style(Style::default().fg(crate::theme::accent()));
        let inner = block.inner(tree_area);
        frame.render_widget(block, tree_area);
        self.layout(tree, root, inner);

        let preview = self.preview.borrow();
        for row in &self.rows {
            let Some(node) = tree.get(row.key) else {
                continue;
            };
            let rect = Rect {
                x: row.bounds.left as u16,
                y: row.bounds.top as u16,
                width: row.bounds.width as u16,
                height: 1,
            };
            frame.render_widget(Paragraph::new(self.row_line(node, &preview)), rect);
        }

        let status = match (&preview.dragging, &preview.last_drop) {
            (Some(dragging), _) => format!(" dragging {dragging}"),
            (None, Some(last)) => format!(" {last}"),
            (None, None) => {
                " drag a row; drop on the left half to insert before, q quits".to_string()
            }
        };
        frame.render_widget(
            Paragraph::new(status).style(
                Style::default()
                    .bg(crate::theme::status_bg())
                    .fg(crate::theme::status_fg()),
            ),
            status_area,
        );
    }

    fn row_line(&self, node: &Node<P>, preview: &DragPreview) -> Line<'static> {
        let hovered = preview.hover.as_ref() == Some(node.id());
        let mut style = Style::default().fg(if node.droppable() {
            crate::theme::container_fg()
        } else {
            crate::theme::row_fg()
        });
        if hovered {
            style = style
                .fg(crate::theme::accent_alt())
                .add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        if !hovered && preview.dragged_id.as_ref() == Some(node.id()) {
            style = style.fg(crate::theme::dragged_fg());
        }
        let marker = if node.droppable() { "▾ " } else { "• " };
        Line::from(vec![
            Span::styled(marker, style),
            Span::styled((self.label)(node), style),
        ])
    }
}
