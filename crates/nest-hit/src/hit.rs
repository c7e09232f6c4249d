//! Hit testing: point → node lookup.
//!
//! Reverse-walks the child lists (front-to-back) to find which node is at
//! a given root-space position. A node's children are tested before the
//! node itself, so a descendant always wins over its ancestor, and later
//! siblings win over earlier ones at every level. Children are not clipped
//! to their parent: a child sticking out of its parent is still hit.

use crate::handle::HandleConfig;
use kurbo::{Point, Rect};
use nest_core::{NodeId, Scene, root_space_frame};

/// Axis-aligned containment, inclusive on all four edges.
pub fn point_in_box(p: Point, rect: Rect) -> bool {
    rect.x0 <= p.x && p.x <= rect.x1 && rect.y0 <= p.y && p.y <= rect.y1
}

/// Find the deepest, topmost descendant of `container` under `cursor`.
///
/// `container` itself is never returned. Returns `None` if no descendant
/// box contains the cursor (or the container is unknown).
pub fn topmost_child_at(
    scene: &Scene,
    cursor: Point,
    scale: f64,
    container: NodeId,
) -> Option<NodeId> {
    let hit = hit_children(scene, container, cursor, scale);
    log::trace!("hit test at ({}, {}) under {container}: {hit:?}", cursor.x, cursor.y);
    hit
}

/// Post-order walk over `parent`'s subtree, topmost child first. Uses an
/// explicit stack so tree depth is not bounded by the call stack.
fn hit_children(scene: &Scene, parent: NodeId, cursor: Point, scale: f64) -> Option<NodeId> {
    // (node, children already pushed)
    let mut stack: Vec<(NodeId, bool)> = scene
        .children(parent)
        .iter()
        .map(|&child| (child, false))
        .collect();
    while let Some((id, expanded)) = stack.pop() {
        if expanded {
            if cursor_on_node(scene, cursor, scale, id) {
                return Some(id);
            }
            continue;
        }
        stack.push((id, true));
        // Last child ends up on top of the stack: checked first.
        stack.extend(scene.children(id).iter().map(|&child| (child, false)));
    }
    None
}

/// Whether `cursor` is inside `id`'s root-space box.
pub fn cursor_on_node(scene: &Scene, cursor: Point, scale: f64, id: NodeId) -> bool {
    root_space_frame(scene, id, scale).is_some_and(|f| point_in_box(cursor, f.to_rect()))
}

/// Whether `cursor` is inside `id`'s root-space box grown by the handle
/// tolerance on every side, i.e. on the node or on one of its handles.
pub fn cursor_on_node_with_edge(
    scene: &Scene,
    cursor: Point,
    scale: f64,
    id: NodeId,
    config: &HandleConfig,
) -> bool {
    root_space_frame(scene, id, scale)
        .is_some_and(|f| point_in_box(cursor, f.to_rect().inflate(config.area(), config.area())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nest_core::Node;

    fn id(s: &str) -> NodeId {
        NodeId::intern(s)
    }

    /// root(375x812) > [a(200x200) > [c(75,100 50x200)], b(0,200 200x200)]
    fn fixture() -> Scene {
        let mut scene = Scene::new();
        scene
            .insert(Node::new(id("h_root"), None).sized(375.0, 812.0))
            .unwrap();
        scene
            .insert(Node::new(id("h_a"), Some(id("h_root"))).sized(200.0, 200.0))
            .unwrap();
        scene
            .insert(
                Node::new(id("h_b"), Some(id("h_root")))
                    .at(0.0, 200.0)
                    .sized(200.0, 200.0),
            )
            .unwrap();
        scene
            .insert(
                Node::new(id("h_c"), Some(id("h_a")))
                    .at(75.0, 100.0)
                    .sized(50.0, 200.0),
            )
            .unwrap();
        scene
    }

    #[test]
    fn point_in_box_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(point_in_box(Point::new(0.0, 0.0), r));
        assert!(point_in_box(Point::new(10.0, 10.0), r));
        assert!(!point_in_box(Point::new(10.01, 5.0), r));
    }

    #[test]
    fn hits_simple_child() {
        let scene = fixture();
        assert_eq!(
            topmost_child_at(&scene, Point::new(20.0, 20.0), 1.0, id("h_root")),
            Some(id("h_a"))
        );
        assert_eq!(
            topmost_child_at(&scene, Point::new(300.0, 20.0), 1.0, id("h_root")),
            None
        );
    }

    #[test]
    fn later_sibling_wins_on_shared_edge() {
        let scene = fixture();
        // y = 200 is the bottom edge of a and the top edge of b.
        assert_eq!(
            topmost_child_at(&scene, Point::new(20.0, 200.0), 1.0, id("h_root")),
            Some(id("h_b"))
        );
    }

    #[test]
    fn descendant_wins_over_its_ancestor() {
        let scene = fixture();
        assert_eq!(
            topmost_child_at(&scene, Point::new(100.0, 150.0), 1.0, id("h_root")),
            Some(id("h_c"))
        );
    }

    #[test]
    fn later_sibling_occludes_earlier_subtree() {
        let scene = fixture();
        // c pokes out of a into b's area, but b is painted above all of a.
        assert_eq!(
            topmost_child_at(&scene, Point::new(100.0, 250.0), 1.0, id("h_root")),
            Some(id("h_b"))
        );
    }

    #[test]
    fn hit_respects_scale() {
        let scene = fixture();
        assert_eq!(
            topmost_child_at(&scene, Point::new(120.0, 200.0), 1.5, id("h_root")),
            Some(id("h_c"))
        );
        assert_eq!(
            topmost_child_at(&scene, Point::new(200.0, 200.0), 1.5, id("h_root")),
            Some(id("h_a"))
        );
    }

    #[test]
    fn container_is_never_returned() {
        let scene = fixture();
        assert_eq!(
            topmost_child_at(&scene, Point::new(20.0, 20.0), 1.0, id("h_b")),
            None
        );
        assert_eq!(
            topmost_child_at(&scene, Point::new(100.0, 150.0), 1.0, id("h_a")),
            Some(id("h_c"))
        );
    }

    #[test]
    fn edge_inflated_box() {
        let scene = fixture();
        let config = HandleConfig::default();
        let outside = Point::new(203.0, 100.0);
        assert!(!cursor_on_node(&scene, outside, 1.0, id("h_a")));
        assert!(cursor_on_node_with_edge(&scene, outside, 1.0, id("h_a"), &config));
        assert!(!cursor_on_node_with_edge(
            &scene,
            Point::new(204.0, 100.0),
            1.0,
            id("h_a"),
            &config
        ));
    }
}
