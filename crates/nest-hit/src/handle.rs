//! Resize handles: eight tolerance zones around a node's border.
//!
//! Each zone is a band of `area = border / 2` pixels on both sides of an
//! edge or around a corner. Corners are tested before edges, so a cursor in
//! a corner square always resolves to the diagonal.
//!
//! ```text
//!   TL ──── Top ──── TR
//!   │                 │
//!  Left   interior  Right
//!   │                 │
//!   BL ─── Bottom ── BR
//! ```

use crate::hit::point_in_box;
use kurbo::{Point, Rect};
use nest_core::{NodeId, Scene, root_space_frame};
use serde::{Deserialize, Serialize};

/// Handle tolerance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandleConfig {
    /// Full width of the grab band in pixels. Not scaled with zoom.
    pub border: f64,
}

impl HandleConfig {
    /// Half the band: how far the zone reaches to each side of an edge.
    pub fn area(&self) -> f64 {
        self.border / 2.0
    }
}

impl Default for HandleConfig {
    fn default() -> Self {
        Self { border: 7.0 }
    }
}

/// Which handle is being grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResizeDirection {
    Top,
    Right,
    Bottom,
    Left,
    TopRight,
    BottomRight,
    BottomLeft,
    TopLeft,
}

impl ResizeDirection {
    /// West side: dragging moves the node's left edge.
    pub fn moves_left_edge(self) -> bool {
        matches!(self, Self::Left | Self::TopLeft | Self::BottomLeft)
    }

    /// North side: dragging moves the node's top edge.
    pub fn moves_top_edge(self) -> bool {
        matches!(self, Self::Top | Self::TopLeft | Self::TopRight)
    }

    pub fn moves_right_edge(self) -> bool {
        matches!(self, Self::Right | Self::TopRight | Self::BottomRight)
    }

    pub fn moves_bottom_edge(self) -> bool {
        matches!(self, Self::Bottom | Self::BottomLeft | Self::BottomRight)
    }

    /// Mirror east ↔ west. Vertical-only directions are unchanged.
    #[must_use]
    pub fn flip_horizontal(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::TopLeft => Self::TopRight,
            Self::TopRight => Self::TopLeft,
            Self::BottomLeft => Self::BottomRight,
            Self::BottomRight => Self::BottomLeft,
            other => other,
        }
    }

    /// Mirror north ↔ south. Horizontal-only directions are unchanged.
    #[must_use]
    pub fn flip_vertical(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::TopLeft => Self::BottomLeft,
            Self::BottomLeft => Self::TopLeft,
            Self::TopRight => Self::BottomRight,
            Self::BottomRight => Self::TopRight,
            other => other,
        }
    }

    pub fn cursor_icon(self) -> CursorIcon {
        match self {
            Self::TopLeft | Self::BottomRight => CursorIcon::NwseResize,
            Self::TopRight | Self::BottomLeft => CursorIcon::NeswResize,
            Self::Top | Self::Bottom => CursorIcon::NsResize,
            Self::Left | Self::Right => CursorIcon::EwResize,
        }
    }
}

/// Pointer shape shown over a handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CursorIcon {
    NwseResize,
    NeswResize,
    NsResize,
    EwResize,
}

impl CursorIcon {
    /// CSS `cursor` value.
    pub fn as_css(self) -> &'static str {
        match self {
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
        }
    }
}

/// The handle of `id` under `cursor`, if any.
pub fn resize_handle_at(
    scene: &Scene,
    cursor: Point,
    scale: f64,
    id: NodeId,
    config: &HandleConfig,
) -> Option<ResizeDirection> {
    let frame = root_space_frame(scene, id, scale)?;
    direction_in_rect(cursor, frame.to_rect(), config.area())
}

/// Whether `cursor` is on `id` but clear of every handle band.
pub fn cursor_on_node_interior(
    scene: &Scene,
    cursor: Point,
    scale: f64,
    id: NodeId,
    config: &HandleConfig,
) -> bool {
    let Some(frame) = root_space_frame(scene, id, scale) else {
        return false;
    };
    let r = frame.to_rect();
    let a = config.area();
    // Built by hand: a node thinner than the band yields an empty box.
    let interior = Rect {
        x0: r.x0 + a,
        y0: r.y0 + a,
        x1: r.x1 - a,
        y1: r.y1 - a,
    };
    point_in_box(cursor, interior)
}

fn direction_in_rect(cursor: Point, r: Rect, a: f64) -> Option<ResizeDirection> {
    let (left, top, right, bottom) = (r.x0, r.y0, r.x1, r.y1);
    let zone = |x0: f64, y0: f64, x1: f64, y1: f64| Rect { x0, y0, x1, y1 };

    let zones = [
        // Corners first.
        (
            zone(left - a, top - a, left + a, top + a),
            ResizeDirection::TopLeft,
        ),
        (
            zone(right - a, top - a, right + a, top + a),
            ResizeDirection::TopRight,
        ),
        (
            zone(left - a, bottom - a, left + a, bottom + a),
            ResizeDirection::BottomLeft,
        ),
        (
            zone(right - a, bottom - a, right + a, bottom + a),
            ResizeDirection::BottomRight,
        ),
        (
            zone(left + a, top - a, right - a, top + a),
            ResizeDirection::Top,
        ),
        (
            zone(left - a, top + a, left + a, bottom - a),
            ResizeDirection::Left,
        ),
        (
            zone(right - a, top + a, right + a, bottom - a),
            ResizeDirection::Right,
        ),
        (
            zone(left + a, bottom - a, right - a, bottom + a),
            ResizeDirection::Bottom,
        ),
    ];

    zones
        .into_iter()
        .find(|(rect, _)| point_in_box(cursor, *rect))
        .map(|(_, dir)| dir)
}
