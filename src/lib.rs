//! Drag-and-drop reordering of nested item trees.
//!
//! [`tree::NodeTree`] holds the nodes; [`gesture::GestureController`] turns
//! pointer down/move/up events into drag lifecycle notifications and performs
//! the drop, using [`hit_test`] to choose the insertion side. The terminal
//! front end lives in [`view`], [`drivers`] and [`event_loop`].

pub mod config;
pub mod constants;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod gesture;
pub mod layout;
pub mod theme;
pub mod tracing_sub;
pub mod tree;
pub mod view;
