//! Drag / resize state machine.
//!
//! ```text
//!            drag_start (cursor on a handle of the selection)
//!   Idle ───────────────────────────────────────────────▶ Resizing(node, dir)
//!    │  drag_start (cursor over a node)                         │
//!    ├───────────────────────────────▶ Dragging(node)           │
//!    ◀───────────── drag_end ────────────────┴──────────────────┘
//! ```
//!
//! Only one target exists at a time, so "dragging" and "resizing" can
//! never both be set. The root is never a target.

use crate::state::EditorState;
use nest_core::{NodeId, snap_px};
use nest_hit::{ResizeDirection, resize_handle_at, topmost_child_at};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Interaction {
    #[default]
    Idle,
    Dragging {
        node: NodeId,
    },
    Resizing {
        node: NodeId,
        direction: ResizeDirection,
    },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// A drag or resize is in progress.
    pub fn is_active(&self) -> bool {
        !self.is_idle()
    }
}

/// Result of moving one edge of a 1-D span `origin .. origin + size`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    origin: f64,
    size: f64,
    /// The moved edge crossed the fixed one; the handle now sits on the
    /// opposite side.
    flipped: bool,
}

/// Move the start edge (left/top) by `delta`.
fn move_start_edge(origin: f64, size: f64, delta: f64) -> Span {
    let new_size = size - delta;
    if new_size >= 0.0 {
        Span {
            origin: origin + delta,
            size: new_size,
            flipped: false,
        }
    } else {
        // The old end edge becomes the start.
        Span {
            origin: origin + size,
            size: -new_size,
            flipped: true,
        }
    }
}

/// Move the end edge (right/bottom) by `delta`.
fn move_end_edge(origin: f64, size: f64, delta: f64) -> Span {
    let new_size = size + delta;
    if new_size >= 0.0 {
        Span {
            origin,
            size: new_size,
            flipped: false,
        }
    } else {
        // The old start edge becomes the end.
        Span {
            origin: origin + new_size,
            size: -new_size,
            flipped: true,
        }
    }
}

impl EditorState {
    /// Pointer went down. Starts a resize if the cursor is on a handle of
    /// the selection, otherwise picks the topmost node under the cursor and
    /// starts moving it. Pressing empty space clears the selection.
    pub fn drag_start(&mut self) -> bool {
        if self.interaction.is_active() {
            log::warn!("drag start ignored: already {:?}", self.interaction);
            return false;
        }
        let Some(root) = self.scene.root() else {
            return false;
        };
        let cursor = self.viewport.cursor();
        let scale = self.viewport.scale();

        if let Some(selected) = self.selection
            && let Some(direction) =
                resize_handle_at(&self.scene, cursor, scale, selected, &self.handles)
        {
            log::debug!("resize {selected} from {direction:?}");
            self.interaction = Interaction::Resizing {
                node: selected,
                direction,
            };
            return true;
        }

        match topmost_child_at(&self.scene, cursor, scale, root) {
            Some(hit) => {
                log::debug!("drag {hit}");
                self.selection = Some(hit);
                self.interaction = Interaction::Dragging { node: hit };
                true
            }
            None => self.selection.take().is_some(),
        }
    }

    /// Pointer moved by `(dx, dy)` screen pixels since the last call.
    pub fn drag(&mut self, dx: f64, dy: f64) -> bool {
        if dx == 0.0 && dy == 0.0 {
            return false;
        }
        match self.interaction {
            Interaction::Idle => false,
            Interaction::Dragging { node } => self.move_node(node, dx, dy),
            Interaction::Resizing { node, direction } => {
                self.resize_from_handle(node, direction, dx, dy)
            }
        }
    }

    /// Pointer released. Always returns to idle.
    pub fn drag_end(&mut self) -> bool {
        let was = std::mem::take(&mut self.interaction);
        if was.is_active() {
            log::debug!("drag end: {was:?}");
        }
        was.is_active()
    }

    fn move_node(&mut self, id: NodeId, dx: f64, dy: f64) -> bool {
        let scale = self.viewport.scale();
        let Some(node) = self.scene.get(id) else {
            log::warn!("drag target {id} vanished");
            self.interaction = Interaction::Idle;
            return false;
        };
        let origin = node.local_origin();
        let (width, height) = (node.width, node.height);
        let left = snap_px(origin.x + dx / scale);
        let top = snap_px(origin.y + dy / scale);
        log::trace!("move {id} to ({left}, {top})");
        self.scene
            .resize_node(id, left, top, width, height)
            .is_ok()
    }

    fn resize_from_handle(
        &mut self,
        id: NodeId,
        direction: ResizeDirection,
        dx: f64,
        dy: f64,
    ) -> bool {
        let scale = self.viewport.scale();
        let Some(node) = self.scene.get(id) else {
            log::warn!("resize target {id} vanished");
            self.interaction = Interaction::Idle;
            return false;
        };
        let origin = node.local_origin();
        let (dx, dy) = (dx / scale, dy / scale);

        let mut direction = direction;
        let horizontal = if direction.moves_left_edge() {
            move_start_edge(origin.x, node.width, dx)
        } else if direction.moves_right_edge() {
            move_end_edge(origin.x, node.width, dx)
        } else {
            Span {
                origin: origin.x,
                size: node.width,
                flipped: false,
            }
        };
        let vertical = if direction.moves_top_edge() {
            move_start_edge(origin.y, node.height, dy)
        } else if direction.moves_bottom_edge() {
            move_end_edge(origin.y, node.height, dy)
        } else {
            Span {
                origin: origin.y,
                size: node.height,
                flipped: false,
            }
        };

        if horizontal.flipped {
            direction = direction.flip_horizontal();
        }
        if vertical.flipped {
            direction = direction.flip_vertical();
        }
        self.interaction = Interaction::Resizing {
            node: id,
            direction,
        };

        let (left, top) = (snap_px(horizontal.origin), snap_px(vertical.origin));
        let (width, height) = (snap_px(horizontal.size), snap_px(vertical.size));
        log::trace!("resize {id} to ({left}, {top}) {width} x {height} via {direction:?}");
        self.scene
            .resize_node(id, left, top, width, height)
            .is_ok()
    }
}
