//! Viewport controller: scale, pan offset and the cursor.
//!
//! A root-space point `p` is drawn at `(p + offset) * scale` relative to
//! the viewport frame's origin. The cursor is stored in root space (scaled,
//! not panned) so hit testing never has to know about the frame or the
//! offset.

use kurbo::{Point, Vec2};
use nest_core::Node;
use serde::{Deserialize, Serialize};

/// Zoom limits and wheel sensitivity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub min_scale: f64,
    pub max_scale: f64,
    /// Scale change per unit of wheel delta.
    pub zoom_step: f64,
}

impl ViewportConfig {
    /// Build a config, swapping the bounds if they are given backwards.
    pub fn new(min_scale: f64, max_scale: f64, zoom_step: f64) -> Self {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        Self {
            min_scale,
            max_scale,
            zoom_step,
        }
    }

    pub fn clamp(&self, scale: f64) -> f64 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_scale: 0.25,
            max_scale: 5.0,
            zoom_step: 0.001,
        }
    }
}

/// Where the editor sits on screen, in screen pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewportFrame {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ViewportFrame {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Centre in frame-local pixels.
    pub fn local_center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

#[derive(Debug, Clone)]
pub struct Viewport {
    scale: f64,
    offset: Vec2,
    /// Root-space cursor, derived from `pointer`.
    cursor: Point,
    /// Last pointer position in screen pixels.
    pointer: Point,
    frame: ViewportFrame,
    config: ViewportConfig,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(ViewportConfig::default())
    }
}

impl Viewport {
    pub fn new(config: ViewportConfig) -> Self {
        Self {
            scale: config.clamp(1.0),
            offset: Vec2::ZERO,
            cursor: Point::ZERO,
            pointer: Point::ZERO,
            frame: ViewportFrame::default(),
            config,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Cursor in root space.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn frame(&self) -> ViewportFrame {
        self.frame
    }

    pub fn config(&self) -> &ViewportConfig {
        &self.config
    }

    /// Replace the pan offset directly (restoring a saved view).
    pub fn set_offset(&mut self, offset: Vec2) {
        self.offset = offset;
        self.refresh_cursor();
    }

    /// Last pointer position relative to the frame's origin.
    pub fn local_pointer(&self) -> Point {
        self.pointer - self.frame.origin().to_vec2()
    }

    fn refresh_cursor(&mut self) {
        self.cursor = self.local_pointer() - self.offset * self.scale;
    }

    /// Record a pointer position in screen pixels and convert it to root
    /// space: `(screen - frame origin) - offset * scale`.
    pub fn move_cursor(&mut self, screen: Point) {
        self.pointer = screen;
        self.refresh_cursor();
    }

    /// Pan by a screen-space delta: `offset -= delta / scale`.
    pub fn pan(&mut self, delta: Vec2) -> bool {
        if delta == Vec2::ZERO {
            return false;
        }
        self.offset -= delta / self.scale;
        self.refresh_cursor();
        log::trace!("pan by {delta:?}, offset now {:?}", self.offset);
        true
    }

    /// Zoom by a wheel delta, keeping the frame-local point `anchor` fixed
    /// on screen.
    pub fn zoom(&mut self, delta_y: f64, anchor: Point) -> bool {
        if delta_y == 0.0 {
            return false;
        }
        let target = self.scale + delta_y * self.config.zoom_step;
        self.zoom_to(target, anchor)
    }

    /// Zoom anchored at the pointer.
    pub fn zoom_at_pointer(&mut self, delta_y: f64) -> bool {
        self.zoom(delta_y, self.local_pointer())
    }

    /// Pinch step, anchored at the centre of the frame.
    pub fn pinch(&mut self, delta: f64) -> bool {
        self.zoom(delta, self.frame.local_center())
    }

    /// Wheel: zoom with ⌘/Ctrl held, otherwise pan.
    pub fn wheel(&mut self, delta: Vec2, command: bool) -> bool {
        if command {
            self.zoom_at_pointer(delta.y)
        } else {
            self.pan(delta)
        }
    }

    /// Jump to a scale (clamped), keeping the frame centre fixed.
    pub fn set_scale(&mut self, scale: f64) -> bool {
        self.zoom_to(scale, self.frame.local_center())
    }

    pub fn reset_zoom(&mut self) -> bool {
        self.set_scale(1.0)
    }

    fn zoom_to(&mut self, target: f64, anchor: Point) -> bool {
        let new_scale = self.config.clamp(target);
        if (new_scale - self.scale).abs() < f64::EPSILON {
            return false;
        }
        // Same formula in screen pixels: o' = a - (a - o) * (s' / s)
        let screen_offset = self.offset * self.scale;
        let anchor = anchor.to_vec2();
        let new_screen_offset = anchor - (anchor - screen_offset) * (new_scale / self.scale);
        self.offset = new_screen_offset / new_scale;
        self.scale = new_scale;
        self.refresh_cursor();
        log::debug!("zoom to {new_scale:.3}, offset {:?}", self.offset);
        true
    }

    /// The container changed size: scale the offset by the size ratio so
    /// content does not jump. A zero-sized previous frame leaves the offset
    /// alone.
    pub fn resize_frame(&mut self, frame: ViewportFrame) -> bool {
        if frame == self.frame {
            return false;
        }
        let old = self.frame;
        let ratio_x = if old.width > 0.0 {
            frame.width / old.width
        } else {
            1.0
        };
        let ratio_y = if old.height > 0.0 {
            frame.height / old.height
        } else {
            1.0
        };
        self.offset = Vec2::new(self.offset.x * ratio_x, self.offset.y * ratio_y);
        self.frame = frame;
        self.refresh_cursor();
        true
    }

    /// Set the frame and pan so the centre of `root` sits at the frame's
    /// centre at the current scale.
    pub fn scroll_to_center(&mut self, frame: ViewportFrame, root: &Node) {
        self.frame = frame;
        let center = root.local_origin() + root.size().to_vec2() / 2.0;
        self.offset = frame.local_center().to_vec2() / self.scale - center;
        self.refresh_cursor();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_core::NodeId;
    use pretty_assertions::assert_eq;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn move_cursor_subtracts_frame_and_scaled_offset() {
        let mut vp = Viewport::default();
        vp.resize_frame(ViewportFrame::new(200.0, 0.0, 400.0, 0.0));
        vp.move_cursor(Point::new(0.0, 0.0));
        assert_eq!(vp.cursor(), Point::new(-200.0, 0.0));
        vp.move_cursor(Point::new(100.0, 100.0));
        assert_eq!(vp.cursor(), Point::new(-100.0, 100.0));

        vp.set_offset(Vec2::new(200.0, 200.0));
        vp.set_scale(0.5);
        vp.set_offset(Vec2::new(200.0, 200.0));
        vp.move_cursor(Point::ZERO);
        assert_eq!(vp.cursor(), Point::new(-300.0, -100.0));
    }

    #[test]
    fn pan_divides_by_scale() {
        let mut vp = Viewport::default();
        vp.set_scale(2.0);
        let before = vp.offset();
        assert!(vp.pan(Vec2::new(10.0, -20.0)));
        assert_eq!(vp.offset() - before, Vec2::new(-5.0, 10.0));
        assert!(!vp.pan(Vec2::ZERO));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut vp = Viewport::default();
        vp.resize_frame(ViewportFrame::new(0.0, 0.0, 800.0, 600.0));
        vp.set_offset(Vec2::new(30.0, -12.0));
        let anchor = Point::new(250.0, 140.0);

        // Root-space point under the anchor, before.
        let world = anchor.to_vec2() / vp.scale() - vp.offset();
        assert!(vp.zoom(400.0, anchor));
        assert!(close(vp.scale(), 1.4));
        let after = (world + vp.offset()) * vp.scale();
        assert!(close(after.x, anchor.x) && close(after.y, anchor.y));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut vp = Viewport::default();
        assert!(vp.zoom(100_000.0, Point::ZERO));
        assert_eq!(vp.scale(), 5.0);
        assert!(!vp.zoom(10.0, Point::ZERO));
        assert!(vp.zoom(-100_000.0, Point::ZERO));
        assert_eq!(vp.scale(), 0.25);
    }

    #[test]
    fn wheel_pans_without_command() {
        let mut vp = Viewport::default();
        assert!(vp.wheel(Vec2::new(4.0, 8.0), false));
        assert_eq!(vp.offset(), Vec2::new(-4.0, -8.0));
        assert_eq!(vp.scale(), 1.0);
        assert!(vp.wheel(Vec2::new(0.0, 100.0), true));
        assert!(close(vp.scale(), 1.1));
    }

    #[test]
    fn cursor_follows_zoom() {
        let mut vp = Viewport::default();
        vp.move_cursor(Point::new(100.0, 50.0));
        vp.zoom_at_pointer(1000.0);
        // Anchored at the pointer: the root-space cursor scales with zoom.
        assert!(close(vp.cursor().x, 200.0));
        assert!(close(vp.cursor().y, 100.0));
    }

    #[test]
    fn resize_frame_rescales_offset() {
        let mut vp = Viewport::default();
        // From a zero-sized frame the offset is kept.
        vp.set_offset(Vec2::new(10.0, 10.0));
        vp.resize_frame(ViewportFrame::new(0.0, 0.0, 400.0, 300.0));
        assert_eq!(vp.offset(), Vec2::new(10.0, 10.0));

        vp.resize_frame(ViewportFrame::new(0.0, 0.0, 800.0, 150.0));
        assert_eq!(vp.offset(), Vec2::new(20.0, 5.0));
    }

    #[test]
    fn scroll_to_center_centres_root() {
        let mut vp = Viewport::default();
        let root = Node::new(NodeId::intern("vp_root"), None).sized(375.0, 812.0);
        vp.scroll_to_center(ViewportFrame::new(0.0, 0.0, 1000.0, 1000.0), &root);
        // Root centre (187.5, 406) drawn at ((p + offset) * scale).
        let center = (Vec2::new(187.5, 406.0) + vp.offset()) * vp.scale();
        assert_eq!(center, Vec2::new(500.0, 500.0));
    }

    #[test]
    fn config_normalizes_bounds() {
        let config = ViewportConfig::new(10.0, 0.2, 0.01);
        assert_eq!(config.min_scale, 0.2);
        assert_eq!(config.max_scale, 10.0);
        assert_eq!(config.clamp(20.0), 10.0);
    }
}
