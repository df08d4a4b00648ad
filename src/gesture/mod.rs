//! Pointer-gesture state machine for drag-and-drop over a [`NodeTree`].
//!
//! [`NodeTree`]: crate::tree::NodeTree

pub mod controller;
pub mod event;
pub mod host;
pub mod listeners;

pub use controller::{DragStatus, DropOutcome, GestureConfig, GestureController};
pub use event::{DragEventType, DragNotification, PointerEvent, PointerKind};
pub use host::{BoundsHost, DragHost};
pub use listeners::{Listener, ListenerRegistry};
