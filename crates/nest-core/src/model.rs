//! Scene data model: a tree of nested rectangular nodes.
//!
//! Nodes live in one id-indexed arena. A node stores its parent's id and an
//! ordered list of child ids; nothing holds a reference to another node, so
//! the tree can be walked both ways without shared ownership.
//!
//! Child order is paint order: later children draw above (and hit-test
//! before) earlier siblings. `left`/`top` are relative to the parent's
//! origin; `None` reads as `0`.

use crate::error::SceneError;
use crate::id::NodeId;
use kurbo::{Size, Vec2};
use petgraph::algo::is_cyclic_directed;
use petgraph::graph::{DiGraph, NodeIndex};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Nodes ───────────────────────────────────────────────────────────────

/// A single rectangle in the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,

    /// `None` only for the root.
    pub parent: Option<NodeId>,

    /// Offset from the parent's origin. `None` is treated as `0`.
    pub left: Option<f64>,
    pub top: Option<f64>,

    /// Always non-negative.
    pub width: f64,
    pub height: f64,

    /// CSS-style color string, passed through to the renderer untouched.
    pub background: String,

    /// Child ids in paint order (last = topmost).
    pub children: SmallVec<[NodeId; 4]>,
}

impl Node {
    /// A zero-sized node at its parent's origin.
    pub fn new(id: NodeId, parent: Option<NodeId>) -> Self {
        Self {
            id,
            parent,
            left: Some(0.0),
            top: Some(0.0),
            width: 0.0,
            height: 0.0,
            background: String::new(),
            children: SmallVec::new(),
        }
    }

    /// Builder: parent-relative position.
    #[must_use]
    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = Some(left);
        self.top = Some(top);
        self
    }

    /// Builder: size.
    #[must_use]
    pub fn sized(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder: background color.
    #[must_use]
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Parent-relative origin with unset coordinates read as `0`.
    pub fn local_origin(&self) -> Vec2 {
        Vec2::new(self.left.unwrap_or(0.0), self.top.unwrap_or(0.0))
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Partial update for [`Scene::update_node`]. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodePatch {
    pub left: Option<f64>,
    pub top: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub background: Option<String>,
}

// ─── Creation defaults ───────────────────────────────────────────────────

/// Geometry and colors given to nodes made by [`Scene::create_node`].
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDefaults {
    pub width: f64,
    pub height: f64,
    /// Backgrounds handed out round-robin.
    pub palette: Vec<String>,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            width: 200.0,
            height: 100.0,
            palette: ["#99EEFF", "#44CCFF", "#47E0FF", "#FFD166", "#EF476F", "#06D6A0"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

// ─── Scene ───────────────────────────────────────────────────────────────

/// The node arena.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: HashMap<NodeId, Node>,
    root: Option<NodeId>,
    defaults: NodeDefaults,
    /// Number of nodes made by `create_node`; drives the palette.
    created: usize,
}

impl Scene {
    /// An empty scene (no root yet).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty scene using custom creation defaults.
    #[must_use]
    pub fn with_defaults(defaults: NodeDefaults) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Look up a node that the tree structure says must exist.
    ///
    /// # Panics
    /// If `id` is not in the arena. Reaching this means a child list or a
    /// parent link points at nothing, which is a broken tree.
    pub fn node(&self, id: NodeId) -> &Node {
        match self.nodes.get(&id) {
            Some(node) => node,
            None => panic!("scene invariant violated: node {id} is referenced but missing"),
        }
    }

    /// Children of `id` in paint order. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(&id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(&id).and_then(|n| n.parent)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All node ids in paint order: pre-order from the root, children in
    /// list order. Empty when the scene has no root.
    pub fn paint_order(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let Some(root) = self.root else {
            return out;
        };
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            // Reverse so the first child is popped first.
            stack.extend(self.node(id).children.iter().rev().copied());
            assert!(
                out.len() <= self.nodes.len(),
                "scene invariant violated: cycle below {root}"
            );
        }
        out
    }

    // ─── Edits ───────────────────────────────────────────────────────────

    /// Insert a fully specified node.
    ///
    /// A node without a parent becomes the root. Otherwise it is appended
    /// to its parent's children, on top of existing siblings. The node's own
    /// `children` list is cleared; attach descendants by inserting them.
    pub fn insert(&mut self, mut node: Node) -> Result<NodeId, SceneError> {
        let id = node.id;
        if self.nodes.contains_key(&id) {
            return Err(SceneError::DuplicateId(id));
        }
        check_size(id, node.width, node.height)?;
        check_position(id, node.left, node.top)?;
        node.children.clear();

        match node.parent {
            None => {
                if let Some(root) = self.root {
                    return Err(SceneError::RootExists(root));
                }
                self.root = Some(id);
            }
            Some(parent) => match self.nodes.get_mut(&parent) {
                Some(p) => p.children.push(id),
                None => return Err(SceneError::UnknownParent(parent)),
            },
        }

        self.nodes.insert(id, node);
        Ok(id)
    }

    /// Create a node with a fresh id and default geometry as the topmost
    /// child of `parent`.
    pub fn create_node(&mut self, parent: NodeId) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(&parent) {
            return Err(SceneError::UnknownParent(parent));
        }
        let background = if self.defaults.palette.is_empty() {
            String::new()
        } else {
            self.defaults.palette[self.created % self.defaults.palette.len()].clone()
        };
        let node = Node::new(NodeId::fresh(), Some(parent))
            .sized(self.defaults.width, self.defaults.height)
            .with_background(background);
        let id = self.insert(node)?;
        self.created += 1;
        log::debug!("created node {id} under {parent}");
        Ok(id)
    }

    /// List `child` under `parent`.
    ///
    /// The child must already be in the arena with `parent` as its parent.
    /// Returns `Ok(false)` if it is already listed.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<bool, SceneError> {
        let actual = match self.nodes.get(&child) {
            Some(c) => c.parent,
            None => return Err(SceneError::UnknownNode(child)),
        };
        let Some(p) = self.nodes.get_mut(&parent) else {
            return Err(SceneError::UnknownParent(parent));
        };
        if actual != Some(parent) {
            return Err(SceneError::Reparent {
                child,
                requested: parent,
                actual,
            });
        }
        if p.children.contains(&child) {
            log::warn!("node {child} is already a child of {parent}");
            return Ok(false);
        }
        p.children.push(child);
        Ok(true)
    }

    /// Replace a node's position and size.
    pub fn resize_node(
        &mut self,
        id: NodeId,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> Result<(), SceneError> {
        check_size(id, width, height)?;
        check_position(id, Some(left), Some(top))?;
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::UnknownNode(id))?;
        node.left = Some(left);
        node.top = Some(top);
        node.width = width;
        node.height = height;
        Ok(())
    }

    /// Apply a partial update.
    pub fn update_node(&mut self, id: NodeId, patch: NodePatch) -> Result<(), SceneError> {
        let node = self
            .nodes
            .get_mut(&id)
            .ok_or(SceneError::UnknownNode(id))?;
        check_size(
            id,
            patch.width.unwrap_or(node.width),
            patch.height.unwrap_or(node.height),
        )?;
        check_position(id, patch.left, patch.top)?;
        if let Some(left) = patch.left {
            node.left = Some(left);
        }
        if let Some(top) = patch.top {
            node.top = Some(top);
        }
        if let Some(width) = patch.width {
            node.width = width;
        }
        if let Some(height) = patch.height {
            node.height = height;
        }
        if let Some(background) = patch.background {
            node.background = background;
        }
        Ok(())
    }

    // ─── Invariants ──────────────────────────────────────────────────────

    /// Check every structural invariant of the tree.
    ///
    /// - exactly one parentless node, and it is the recorded root
    /// - every listed child exists, points back at its parent, and is
    ///   listed once
    /// - every parent link is matched by a child-list entry
    /// - positions are finite, sizes finite and non-negative
    /// - parent → child edges form no cycle
    pub fn validate(&self) -> Result<(), SceneError> {
        if self.nodes.is_empty() {
            return match self.root {
                None => Ok(()),
                Some(root) => Err(invalid(format!("root {root} recorded for an empty scene"))),
            };
        }

        let roots: Vec<NodeId> = self
            .nodes
            .values()
            .filter(|n| n.parent.is_none())
            .map(|n| n.id)
            .collect();
        if roots.len() != 1 || self.root != Some(roots[0]) {
            return Err(invalid(format!(
                "expected exactly one root matching {:?}, found {roots:?}",
                self.root
            )));
        }

        let mut graph: DiGraph<NodeId, ()> = DiGraph::with_capacity(self.nodes.len(), 0);
        let index: HashMap<NodeId, NodeIndex> = self
            .nodes
            .keys()
            .map(|&id| (id, graph.add_node(id)))
            .collect();

        for node in self.nodes.values() {
            let position_finite = node.left.is_none_or(f64::is_finite)
                && node.top.is_none_or(f64::is_finite);
            if !(node.width >= 0.0 && node.height >= 0.0)
                || !node.width.is_finite()
                || !node.height.is_finite()
                || !position_finite
            {
                return Err(invalid(format!(
                    "node {} has geometry ({:?}, {:?}) {} x {}",
                    node.id, node.left, node.top, node.width, node.height
                )));
            }

            for (pos, &child) in node.children.iter().enumerate() {
                let Some(c) = self.nodes.get(&child) else {
                    return Err(invalid(format!("node {} lists missing child {child}", node.id)));
                };
                if c.parent != Some(node.id) {
                    return Err(invalid(format!(
                        "child {child} of {} points at parent {:?}",
                        node.id, c.parent
                    )));
                }
                if node.children[..pos].contains(&child) {
                    return Err(invalid(format!("node {} lists {child} twice", node.id)));
                }
                graph.add_edge(index[&node.id], index[&child], ());
            }

            if let Some(parent) = node.parent {
                let listed = self
                    .nodes
                    .get(&parent)
                    .is_some_and(|p| p.children.contains(&node.id));
                if !listed {
                    return Err(invalid(format!(
                        "node {} is not listed by its parent {parent}",
                        node.id
                    )));
                }
            }
        }

        if is_cyclic_directed(&graph) {
            return Err(invalid("parent chain contains a cycle".to_string()));
        }
        Ok(())
    }
}

fn check_finite(id: NodeId, field: &'static str, value: f64) -> Result<(), SceneError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SceneError::NonFinite { id, field, value })
    }
}

fn check_size(id: NodeId, width: f64, height: f64) -> Result<(), SceneError> {
    check_finite(id, "width", width)?;
    check_finite(id, "height", height)?;
    if width < 0.0 || height < 0.0 {
        return Err(SceneError::NegativeSize { id, width, height });
    }
    Ok(())
}

fn check_position(id: NodeId, left: Option<f64>, top: Option<f64>) -> Result<(), SceneError> {
    if let Some(left) = left {
        check_finite(id, "left", left)?;
    }
    if let Some(top) = top {
        check_finite(id, "top", top)?;
    }
    Ok(())
}

fn invalid(msg: String) -> SceneError {
    SceneError::InvalidTree(msg)
}
