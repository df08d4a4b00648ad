//! Translate crossterm mouse events into gesture [`PointerEvent`]s.

use std::time::Instant;

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::gesture::{PointerEvent, PointerKind};
use crate::hit_test::Point;

/// Stamps each translated event with a fresh serial.
///
/// The pointer position is the cell's top-left corner, so with one-row nodes
/// the left half of a row reads as the top-left quadrant.
#[derive(Debug, Default)]
pub struct PointerTranslator {
    serial: u64,
}

impl PointerTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only the left button takes part in gestures; everything else is `None`.
    pub fn translate(&mut self, mouse: &MouseEvent, now: Instant) -> Option<PointerEvent<Point>> {
        let kind = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
            _ => return None,
        };
        self.serial += 1;
        let position = Point::new(f64::from(mouse.column), f64::from(mouse.row));
        Some(PointerEvent::new(kind, position, now, position, self.serial))
    }
}
