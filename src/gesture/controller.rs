use std::rc::Rc;
use std::time::{Duration, Instant};

use super::event::{DragEventType, DragNotification, PointerEvent, PointerKind};
use super::host::DragHost;
use super::listeners::{Listener, ListenerRegistry};
use crate::constants::{DRAG_DEBOUNCE, DRAG_DISTANCE_THRESHOLD};
use crate::hit_test::{Point, cursor_placement};
use crate::tree::{DragType, NodeId, NodeKey, NodeTree};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragStatus {
    #[default]
    Normal,
    Dragging,
}

/// Drag-intent threshold. A move starts a drag only when it is strictly
/// farther than `distance_threshold` from the press and strictly later than
/// `debounce` after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub distance_threshold: f64,
    pub debounce: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            distance_threshold: DRAG_DISTANCE_THRESHOLD,
            debounce: DRAG_DEBOUNCE,
        }
    }
}

/// How a completed drag changed the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Released over a droppable node; a copy was appended to it. The source
    /// is left in place even when it belongs to the same tree.
    IntoContainer {
        container: NodeKey,
        inserted: Option<NodeKey>,
    },
    /// Released over a non-droppable node; inserted next to it.
    Sibling {
        target: NodeKey,
        inserted: Option<NodeKey>,
        insert_before: bool,
        drag_type: DragType,
    },
    /// Nothing to drop, nothing under the pointer, or no geometry for it.
    Nothing,
}

#[derive(Debug, Clone)]
struct Press {
    position: Point,
    time: Instant,
    serial: u64,
    node: Option<NodeId>,
}

/// Turns pointer down/move/up events into drag-start, dragging and drag-end
/// steps, and performs the drop on the tree.
///
/// States are `Normal` and `Dragging`. A press only arms the controller; the
/// first move past the [`GestureConfig`] threshold enters `Dragging`. The
/// release always returns to `Normal` and forgets the dragged node.
pub struct GestureController<P> {
    config: GestureConfig,
    status: DragStatus,
    position: Point,
    drag_start_position: Option<Point>,
    drag_end_position: Option<Point>,
    press: Option<Press>,
    dragged: Option<NodeKey>,
    listeners: ListenerRegistry<P>,
}

impl<P> Default for GestureController<P> {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<P> GestureController<P> {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            status: DragStatus::Normal,
            position: Point::default(),
            drag_start_position: None,
            drag_end_position: None,
            press: None,
            dragged: None,
            listeners: ListenerRegistry::new(),
        }
    }

    pub fn config(&self) -> GestureConfig {
        self.config
    }

    pub fn status(&self) -> DragStatus {
        self.status
    }

    pub fn is_dragging(&self) -> bool {
        self.status == DragStatus::Dragging
    }

    pub fn dragged(&self) -> Option<NodeKey> {
        self.dragged
    }

    /// Last pointer position seen while dragging.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn drag_start_position(&self) -> Option<Point> {
        self.drag_start_position
    }

    pub fn drag_end_position(&self) -> Option<Point> {
        self.drag_end_position
    }

    /// Register `listener` for `kind`. Returns `false` if it already was.
    pub fn on(&mut self, kind: DragEventType, listener: Listener<P>) -> bool {
        self.listeners.on(kind, listener)
    }

    pub fn off(&mut self, kind: DragEventType, listener: &Listener<P>) -> bool {
        self.listeners.off(kind, listener)
    }

    /// Wrap `f` as a listener, register it, and hand it back for `off`.
    pub fn subscribe<F>(&mut self, kind: DragEventType, f: F) -> Listener<P>
    where
        F: Fn(&DragNotification<'_, P>) + 'static,
    {
        let listener: Listener<P> = Rc::new(f);
        self.listeners.on(kind, listener.clone());
        listener
    }

    pub fn is_valid_drag_start<T>(&self, event: &PointerEvent<T>) -> bool {
        let Some(press) = self.press.as_ref() else {
            return false;
        };
        let distance = event.position.distance_to(press.position);
        let elapsed = event.timestamp.saturating_duration_since(press.time);
        event.serial != press.serial
            && distance > self.config.distance_threshold
            && elapsed > self.config.debounce
    }

    /// Route `event` by kind. Returns the drop outcome for an up-event that
    /// ended a drag.
    pub fn handle<H: DragHost>(
        &mut self,
        tree: &mut NodeTree<P>,
        host: &H,
        event: &PointerEvent<H::Target>,
    ) -> Option<DropOutcome>
    where
        P: Clone,
    {
        match event.kind {
            PointerKind::Down => {
                self.pointer_down(host, event);
                None
            }
            PointerKind::Move => {
                self.pointer_move(tree, host, event);
                None
            }
            PointerKind::Up => self.pointer_up(tree, host, event),
        }
    }

    /// Record where and when the press happened, and the node under it.
    pub fn pointer_down<H: DragHost>(&mut self, host: &H, event: &PointerEvent<H::Target>) {
        let node = host.closest_node_id(&event.target);
        tracing::debug!(serial = event.serial, node = ?node, "pointer down");
        self.press = Some(Press {
            position: event.position,
            time: event.timestamp,
            serial: event.serial,
            node,
        });
    }

    pub fn pointer_move<H: DragHost>(
        &mut self,
        tree: &NodeTree<P>,
        host: &H,
        event: &PointerEvent<H::Target>,
    ) {
        if self.status == DragStatus::Normal {
            if !self.is_valid_drag_start(event) {
                return;
            }
            self.start_drag(tree, event);
        }
        self.drag_over(tree, host, event);
    }

    /// Finish the gesture. A no-op returning `None` unless a drag is active.
    pub fn pointer_up<H: DragHost>(
        &mut self,
        tree: &mut NodeTree<P>,
        host: &H,
        event: &PointerEvent<H::Target>,
    ) -> Option<DropOutcome>
    where
        P: Clone,
    {
        self.press = None;
        if self.status != DragStatus::Dragging {
            return None;
        }
        self.status = DragStatus::Normal;
        self.drag_end_position = Some(event.position);

        let target = host
            .closest_node_id(&event.target)
            .and_then(|id| tree.key_of(&id));
        let outcome = match (self.dragged.take(), target) {
            (Some(dragged), Some(target)) => self.drop_on(tree, host, event, dragged, target),
            _ => DropOutcome::Nothing,
        };
        tracing::debug!(serial = event.serial, ?outcome, "drag end");

        self.listeners.emit(&DragNotification {
            kind: DragEventType::DragEnd,
            position: event.position,
            serial: event.serial,
            node: target.and_then(|key| tree.get(key)),
        });
        Some(outcome)
    }

    fn start_drag<T>(&mut self, tree: &NodeTree<P>, event: &PointerEvent<T>) {
        self.status = DragStatus::Dragging;
        self.drag_start_position = Some(event.position);
        self.drag_end_position = None;
        self.dragged = self
            .press
            .as_ref()
            .and_then(|press| press.node.as_ref())
            .and_then(|id| tree.key_of(id));
        tracing::debug!(serial = event.serial, dragged = ?self.dragged, "drag start");

        if let Some(node) = self.dragged.and_then(|key| tree.get(key)) {
            self.listeners.emit(&DragNotification {
                kind: DragEventType::DragStart,
                position: event.position,
                serial: event.serial,
                node: Some(node),
            });
        }
    }

    fn drag_over<H: DragHost>(
        &mut self,
        tree: &NodeTree<P>,
        host: &H,
        event: &PointerEvent<H::Target>,
    ) {
        self.position = event.position;
        let target = host
            .closest_node_id(&event.target)
            .and_then(|id| tree.get_node(&id));
        self.listeners.emit(&DragNotification {
            kind: DragEventType::Dragging,
            position: event.position,
            serial: event.serial,
            node: target,
        });
    }

    fn drop_on<H: DragHost>(
        &self,
        tree: &mut NodeTree<P>,
        host: &H,
        event: &PointerEvent<H::Target>,
        dragged: NodeKey,
        target: NodeKey,
    ) -> DropOutcome
    where
        P: Clone,
    {
        let (Some(target_node), Some(dragged_node)) = (tree.get(target), tree.get(dragged)) else {
            return DropOutcome::Nothing;
        };
        if target_node.droppable() {
            // Container drops leave the source in place, even within one tree.
            let inserted = tree.insert_node_in_container(target, dragged, false, DragType::Copy);
            return DropOutcome::IntoContainer {
                container: target,
                inserted,
            };
        }
        let drag_type = if target_node.root() == dragged_node.root()
            && dragged_node.drag_type() == DragType::Move
        {
            DragType::Move
        } else {
            DragType::Copy
        };
        let Some(bounds) = host.bounding_rect(&event.target) else {
            return DropOutcome::Nothing;
        };
        let placement = cursor_placement(event.position, bounds);
        let inserted = tree.insert_node(target, dragged, placement.insert_before, drag_type);
        DropOutcome::Sibling {
            target,
            inserted,
            insert_before: placement.insert_before,
            drag_type,
        }
    }
}
