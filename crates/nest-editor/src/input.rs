//! Input primitives.
//!
//! The gesture layer (pointer capture, wheel, pinch recognition) lives
//! outside this crate. It reduces raw events to these primitives and feeds
//! them to [`crate::EditorState::apply`] in the order they happened.
//! `Drag` deltas are increments since the previous `Drag`, so dropping or
//! reordering events corrupts geometry.

use crate::viewport::ViewportFrame;
use nest_core::{NodeId, NodePatch};

/// Modifier key state at the time of the event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized editor input.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved, in screen pixels.
    PointerMove { x: f64, y: f64 },

    /// Pointer pressed and a drag gesture began.
    DragStart,

    /// Pointer moved during a drag, in screen pixels since the last `Drag`.
    Drag { dx: f64, dy: f64 },

    /// Drag gesture finished or was cancelled.
    DragEnd,

    /// Scroll wheel / two-finger scroll. Zooms with ⌘/Ctrl, pans without.
    Wheel {
        dx: f64,
        dy: f64,
        modifiers: Modifiers,
    },

    /// Pinch gesture step.
    Pinch { delta: f64 },

    /// Explicit selection change.
    Select { id: Option<NodeId> },

    CreateNode { parent: NodeId },

    AddChild { parent: NodeId, child: NodeId },

    ResizeNode {
        id: NodeId,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },

    UpdateNode { id: NodeId, patch: NodePatch },

    /// The editor's container changed size or moved on screen.
    ResizeViewport { frame: ViewportFrame },

    /// Place the container and center the root node in it.
    ScrollToCenter { frame: ViewportFrame },

    SetLoading(bool),

    /// Keyboard event (`KeyboardEvent.key` value).
    Key { key: String, modifiers: Modifiers },
}

impl InputEvent {
    /// Whether the event can change node geometry or the node tree.
    pub fn edits_scene(&self) -> bool {
        matches!(
            self,
            Self::Drag { .. }
                | Self::CreateNode { .. }
                | Self::AddChild { .. }
                | Self::ResizeNode { .. }
                | Self::UpdateNode { .. }
                | Self::Key { .. }
        )
    }
}
