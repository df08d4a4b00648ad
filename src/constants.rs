//! Shared crate-wide constants.

use std::time::Duration;

/// Pointer displacement (in host units) a press must exceed before a move is
/// treated as a drag rather than a click.
pub const DRAG_DISTANCE_THRESHOLD: f64 = 5.0;

/// Time that must elapse after a press before a move may start a drag.
///
/// Together with [`DRAG_DISTANCE_THRESHOLD`] this forms the drag-intent
/// threshold; both must be strictly exceeded.
pub const DRAG_DEBOUNCE: Duration = Duration::from_millis(10);

/// Length of generated node ids.
pub const NODE_ID_LEN: usize = 21;

/// Alphabet used for generated node ids (url-safe).
pub const NODE_ID_ALPHABET: &[u8; 64] =
    b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";
