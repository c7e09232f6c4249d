//! Hit testing for nested node trees.
//!
//! [`hit`] answers "which node is under the pointer"; [`handle`] answers
//! "is the pointer on a resize handle of this node, and which one".
//! Both work in root space: scaled, never panned.

pub mod handle;
pub mod hit;

pub use handle::{CursorIcon, HandleConfig, ResizeDirection, cursor_on_node_interior, resize_handle_at};
pub use hit::{cursor_on_node, cursor_on_node_with_edge, point_in_box, topmost_child_at};
