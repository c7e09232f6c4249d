//! Read-only queries the renderer polls every frame.
//!
//! Nothing here is cached: each query recomputes from the scene, the
//! viewport and the interaction mode, so it can never disagree with them.

use crate::interaction::Interaction;
use crate::state::EditorState;
use nest_core::{Frame, NodeId, canvas_space_frame};
use nest_hit::{CursorIcon, cursor_on_node_with_edge, resize_handle_at, topmost_child_at};
use serde::{Deserialize, Serialize};

/// The node under the cursor and where to draw its hover outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    pub id: NodeId,
    #[serde(flatten)]
    pub frame: Frame,
}

/// One node's placement on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeFrame {
    pub id: NodeId,
    #[serde(flatten)]
    pub frame: Frame,
    pub background: String,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub frames: Vec<NodeFrame>,
    pub highlight: Option<Highlight>,
    pub selected: Option<Highlight>,
    pub cursor: Option<CursorIcon>,
    pub loading: bool,
}

impl EditorState {
    fn canvas_frame(&self, id: NodeId) -> Option<Frame> {
        canvas_space_frame(
            &self.scene,
            id,
            self.viewport.scale(),
            self.viewport.offset(),
        )
    }

    /// The node to outline on hover.
    ///
    /// Suppressed while a drag or resize is active and while the cursor is
    /// on a handle of the selection. Inside the selection's grab area the
    /// search is limited to the selection's descendants.
    pub fn highlight(&self) -> Option<Highlight> {
        if self.interaction.is_active() {
            return None;
        }
        let root = self.scene.root()?;
        let cursor = self.viewport.cursor();
        let scale = self.viewport.scale();

        let container = match self.selection {
            Some(selected) => {
                if resize_handle_at(&self.scene, cursor, scale, selected, &self.handles).is_some()
                {
                    return None;
                }
                if cursor_on_node_with_edge(&self.scene, cursor, scale, selected, &self.handles) {
                    selected
                } else {
                    root
                }
            }
            None => root,
        };

        let id = topmost_child_at(&self.scene, cursor, scale, container)?;
        Some(Highlight {
            id,
            frame: self.canvas_frame(id)?,
        })
    }

    /// Where the selection outline goes.
    pub fn selected_frame(&self) -> Option<Highlight> {
        let id = self.selection?;
        Some(Highlight {
            id,
            frame: self.canvas_frame(id)?,
        })
    }

    /// Pointer shape: the active resize handle's, else the one under the
    /// cursor on the selection.
    pub fn cursor_icon(&self) -> Option<CursorIcon> {
        match self.interaction {
            Interaction::Resizing { direction, .. } => Some(direction.cursor_icon()),
            Interaction::Dragging { .. } => None,
            Interaction::Idle => {
                let selected = self.selection?;
                resize_handle_at(
                    &self.scene,
                    self.viewport.cursor(),
                    self.viewport.scale(),
                    selected,
                    &self.handles,
                )
                .map(|direction| direction.cursor_icon())
            }
        }
    }

    /// Every node's canvas frame, parents before children, siblings in
    /// stacking order.
    pub fn node_frames(&self) -> Vec<NodeFrame> {
        self.scene
            .paint_order()
            .into_iter()
            .filter_map(|id| {
                let node = self.scene.get(id)?;
                Some(NodeFrame {
                    id,
                    frame: self.canvas_frame(id)?,
                    background: node.background.clone(),
                })
            })
            .collect()
    }

    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            frames: self.node_frames(),
            highlight: self.highlight(),
            selected: self.selected_frame(),
            cursor: self.cursor_icon(),
            loading: self.loading,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::EditorConfig;
    use kurbo::Point;
    use nest_core::{Node, Scene};
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    /// root(375x812) > [a(200x200) > [c(50,50 100x100)], b(0,200 200x200)]
    fn editor() -> EditorState {
        let mut scene = Scene::new();
        scene
            .insert(Node::new(id("o_root"), None).sized(375.0, 812.0))
            .unwrap();
        scene
            .insert(
                Node::new(id("o_a"), Some(id("o_root")))
                    .sized(200.0, 200.0)
                    .with_background("#99EEFF"),
            )
            .unwrap();
        scene
            .insert(
                Node::new(id("o_c"), Some(id("o_a")))
                    .at(50.0, 50.0)
                    .sized(100.0, 100.0),
            )
            .unwrap();
        scene
            .insert(
                Node::new(id("o_b"), Some(id("o_root")))
                    .at(0.0, 200.0)
                    .sized(200.0, 200.0),
            )
            .unwrap();
        EditorState::new(scene, EditorConfig::default())
    }

    fn hover(state: &mut EditorState, x: f64, y: f64) -> Option<NodeId> {
        state.viewport.move_cursor(Point::new(x, y));
        state.highlight().map(|h| h.id)
    }

    #[test]
    fn highlight_without_selection_searches_from_root() {
        let mut state = editor();
        assert_eq!(hover(&mut state, 20.0, 20.0), Some(id("o_a")));
        assert_eq!(hover(&mut state, 100.0, 100.0), Some(id("o_c")));
        assert_eq!(hover(&mut state, 300.0, 100.0), None);
    }

    #[test]
    fn highlight_inside_selection_searches_its_children() {
        let mut state = editor();
        state.select_node(Some(id("o_a")));
        assert_eq!(hover(&mut state, 100.0, 100.0), Some(id("o_c")));
        // Inside the selection but over no child: nothing, not the selection.
        assert_eq!(hover(&mut state, 20.0, 20.0), None);
        // Outside the selection: back to the root search.
        assert_eq!(hover(&mut state, 100.0, 300.0), Some(id("o_b")));
    }

    #[test]
    fn highlight_suppressed_on_selection_handle() {
        let mut state = editor();
        state.select_node(Some(id("o_a")));
        assert_eq!(hover(&mut state, 100.0, 202.0), None);
        assert_eq!(state.cursor_icon(), Some(CursorIcon::NsResize));
    }

    #[test]
    fn highlight_suppressed_while_dragging() {
        let mut state = editor();
        assert_eq!(hover(&mut state, 20.0, 20.0), Some(id("o_a")));
        state.drag_start();
        assert_eq!(state.highlight(), None);
        assert_eq!(state.cursor_icon(), None);
        state.drag_end();
        assert_eq!(hover(&mut state, 100.0, 100.0), Some(id("o_c")));
    }

    #[test]
    fn cursor_icon_tracks_active_resize() {
        let mut state = editor();
        state.select_node(Some(id("o_b")));
        state.viewport.move_cursor(Point::new(200.0, 400.0));
        assert_eq!(state.cursor_icon(), Some(CursorIcon::NwseResize));
        state.drag_start();
        // Moving the pointer away keeps the icon of the grabbed handle.
        state.viewport.move_cursor(Point::new(300.0, 300.0));
        assert_eq!(state.cursor_icon(), Some(CursorIcon::NwseResize));
    }

    #[test]
    fn node_frames_in_paint_order() {
        let state = editor();
        let ids: Vec<_> = state.node_frames().into_iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![id("o_root"), id("o_a"), id("o_c"), id("o_b")]);
    }

    #[test]
    fn selected_frame_uses_canvas_space() {
        let mut state = editor();
        assert_eq!(state.selected_frame(), None);
        state.select_node(Some(id("o_c")));
        state.viewport.set_offset(kurbo::Vec2::new(10.0, 20.0));
        assert_eq!(
            state.selected_frame(),
            Some(Highlight {
                id: id("o_c"),
                frame: Frame::new(60, 70, 100, 100)
            })
        );
    }

    #[test]
    fn highlight_json_is_flat() {
        let h = Highlight {
            id: id("o_a"),
            frame: Frame::new(0, 0, 200, 200),
        };
        assert_eq!(
            serde_json::to_value(h).unwrap(),
            serde_json::json!({"id": "o_a", "left": 0, "top": 0, "width": 200, "height": 200})
        );
    }
}
