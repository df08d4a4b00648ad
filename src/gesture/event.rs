use std::fmt;
use std::time::Instant;

use crate::hit_test::Point;
use crate::tree::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    Down,
    Move,
    Up,
}

/// A low-level pointer event as delivered by the host.
///
/// `serial` identifies the physical event; two events with the same serial
/// are the same event. `target` is whatever the host uses to find the node
/// under the pointer.
#[derive(Debug, Clone)]
pub struct PointerEvent<T> {
    pub kind: PointerKind,
    pub position: Point,
    pub timestamp: Instant,
    pub target: T,
    pub serial: u64,
}

impl<T> PointerEvent<T> {
    pub fn new(
        kind: PointerKind,
        position: Point,
        timestamp: Instant,
        target: T,
        serial: u64,
    ) -> Self {
        Self {
            kind,
            position,
            timestamp,
            target,
            serial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragEventType {
    DragStart,
    Dragging,
    DragEnd,
}

impl DragEventType {
    pub const fn as_str(self) -> &'static str {
        match self {
            DragEventType::DragStart => "dragstart",
            DragEventType::Dragging => "dragging",
            DragEventType::DragEnd => "dragend",
        }
    }
}

impl fmt::Display for DragEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What listeners receive for each drag lifecycle step.
#[derive(Debug)]
pub struct DragNotification<'a, P> {
    pub kind: DragEventType,
    /// Pointer position of the originating event.
    pub position: Point,
    /// Serial of the originating pointer event.
    pub serial: u64,
    /// Resolved node: the dragged node for `DragStart`, the node under the
    /// pointer otherwise. `None` when nothing could be resolved.
    pub node: Option<&'a Node<P>>,
}
