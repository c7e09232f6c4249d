//! Coordinate transforms between node-local geometry and pixels.
//!
//! Three spaces are involved:
//!
//! - **local**: a node's `left`/`top`, relative to its parent's origin.
//! - **root space**: the node's origin summed up the ancestor chain and
//!   multiplied by the scale. Hit testing works here; it ignores panning.
//! - **canvas space**: root space shifted by the pan offset before
//!   scaling. The renderer places nodes here.
//!
//! Everything public is rounded once, at the boundary. Intermediate sums
//! stay in `f64`, so a node always yields the same pixel box no matter how
//! deep it sits.

use crate::frame::Frame;
use crate::id::NodeId;
use crate::model::{Node, Scene};
use kurbo::{Point, Size, Vec2};

/// Round to the nearest whole unit, staying in `f64`; ties go toward +∞ on
/// both sides of zero. Used for stored geometry.
pub fn snap_px(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// [`snap_px`] narrowed to an `i32` pixel for a [`Frame`].
///
/// Saturates at `i32::MIN` / `i32::MAX` for coordinates beyond ±2³¹;
/// stored geometry is never narrowed, only what is handed to the renderer.
pub fn round_px(v: f64) -> i32 {
    snap_px(v) as i32
}

fn round_point(p: Point) -> Point {
    Point::new(f64::from(round_px(p.x)), f64::from(round_px(p.y)))
}

/// Sum of every ancestor's local origin, in unscaled root units.
///
/// # Panics
/// If a parent link points at a missing node or the chain loops.
pub fn ancestor_offset(scene: &Scene, node: &Node) -> Vec2 {
    let mut total = Vec2::ZERO;
    let mut next = node.parent;
    let mut steps = 0usize;
    while let Some(parent_id) = next {
        let parent = scene.node(parent_id);
        total += parent.local_origin();
        next = parent.parent;
        steps += 1;
        assert!(
            steps <= scene.len(),
            "scene invariant violated: cyclic parent chain above {}",
            node.id
        );
    }
    total
}

fn unrounded_root_origin(scene: &Scene, node: &Node, scale: f64) -> Point {
    ((ancestor_offset(scene, node) + node.local_origin()) * scale).to_point()
}

fn unrounded_canvas_origin(scene: &Scene, node: &Node, scale: f64, offset: Vec2) -> Point {
    ((ancestor_offset(scene, node) + node.local_origin() + offset) * scale).to_point()
}

/// `(ancestors + local) * scale`, rounded.
pub fn root_space_origin(scene: &Scene, node: &Node, scale: f64) -> Point {
    round_point(unrounded_root_origin(scene, node, scale))
}

/// `(ancestors + local + offset) * scale`, rounded.
pub fn canvas_space_origin(scene: &Scene, node: &Node, scale: f64, offset: Vec2) -> Point {
    round_point(unrounded_canvas_origin(scene, node, scale, offset))
}

/// `(width, height) * scale`, rounded.
pub fn size_at(node: &Node, scale: f64) -> Size {
    let s = node.size() * scale;
    Size::new(f64::from(round_px(s.width)), f64::from(round_px(s.height)))
}

fn frame_from(origin: Point, size: Size) -> Frame {
    Frame::new(
        round_px(origin.x),
        round_px(origin.y),
        round_px(size.width),
        round_px(size.height),
    )
}

/// The box hit testing uses for `id`. `None` if the node is unknown.
pub fn root_space_frame(scene: &Scene, id: NodeId, scale: f64) -> Option<Frame> {
    let node = scene.get(id)?;
    Some(frame_from(
        unrounded_root_origin(scene, node, scale),
        node.size() * scale,
    ))
}

/// The box the renderer draws for `id`. `None` if the node is unknown.
pub fn canvas_space_frame(scene: &Scene, id: NodeId, scale: f64, offset: Vec2) -> Option<Frame> {
    let node = scene.get(id)?;
    Some(frame_from(
        unrounded_canvas_origin(scene, node, scale, offset),
        node.size() * scale,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    /// root(375x812) > a(200x200) > b(75,100 50x200)
    fn nested() -> Scene {
        let mut scene = Scene::new();
        scene
            .insert(Node::new(id("t_root"), None).sized(375.0, 812.0))
            .unwrap();
        scene
            .insert(Node::new(id("t_a"), Some(id("t_root"))).sized(200.0, 200.0))
            .unwrap();
        scene
            .insert(
                Node::new(id("t_b"), Some(id("t_a")))
                    .at(75.0, 100.0)
                    .sized(50.0, 200.0),
            )
            .unwrap();
        scene
    }

    #[test]
    fn ancestor_offset_treats_unset_as_zero() {
        let mut scene = nested();
        scene
            .update_node(
                id("t_a"),
                crate::NodePatch {
                    left: Some(10.0),
                    top: Some(5.0),
                    ..Default::default()
                },
            )
            .unwrap();
        let mut b = scene.get(id("t_b")).unwrap().clone();
        b.left = None;
        assert_eq!(ancestor_offset(&scene, &b), Vec2::new(10.0, 5.0));
        assert_eq!(root_space_origin(&scene, &b, 1.0), Point::new(10.0, 105.0));
    }

    #[test]
    fn root_space_ignores_offset() {
        let scene = nested();
        let b = scene.get(id("t_b")).unwrap();
        assert_eq!(root_space_origin(&scene, b, 1.5), Point::new(113.0, 150.0));
        assert_eq!(
            root_space_frame(&scene, id("t_b"), 1.5),
            Some(Frame::new(113, 150, 75, 300))
        );
    }

    #[test]
    fn canvas_space_applies_offset_before_scale() {
        let scene = nested();
        let offset = Vec2::new(30.0, 30.0);
        assert_eq!(
            canvas_space_frame(&scene, id("t_b"), 1.5, offset),
            Some(Frame::new(158, 195, 75, 300))
        );
        assert_eq!(
            canvas_space_frame(&scene, id("t_a"), 1.0, Vec2::new(40.0, 40.0)),
            Some(Frame::new(40, 40, 200, 200))
        );
    }

    #[test]
    fn rounding_happens_once() {
        let mut scene = nested();
        // 0.3 + 0.3 at scale 1 would drift if each level were rounded.
        scene.resize_node(id("t_a"), 0.3, 0.3, 10.0, 10.0).unwrap();
        scene.resize_node(id("t_b"), 0.3, 0.3, 0.4, 0.4).unwrap();
        assert_eq!(
            root_space_frame(&scene, id("t_b"), 1.0),
            Some(Frame::new(1, 1, 0, 0))
        );
        assert_eq!(size_at(scene.get(id("t_b")).unwrap(), 2.0), Size::new(1.0, 1.0));
    }

    #[test]
    fn round_px_ties_go_up() {
        assert_eq!(round_px(157.5), 158);
        assert_eq!(round_px(-2.5), -2);
        assert_eq!(round_px(-2.6), -3);
    }

    #[test]
    fn huge_coordinates_saturate_only_in_frames() {
        assert_eq!(snap_px(5.0e9 + 0.4), 5.0e9);
        assert_eq!(round_px(5.0e9), i32::MAX);
        assert_eq!(round_px(-5.0e9), i32::MIN);
    }

    #[test]
    fn unknown_node_has_no_frame() {
        let scene = nested();
        assert_eq!(root_space_frame(&scene, id("t_missing"), 1.0), None);
    }
}
