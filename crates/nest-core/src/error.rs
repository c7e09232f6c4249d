//! Errors for scene edits.
//!
//! These cover requests that can be refused without touching the tree.
//! A tree that is already broken (a child id with no node behind it, a
//! cyclic parent chain) is not reported here: the walkers in this crate
//! panic on it, since the geometry they would produce is meaningless.

use crate::id::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    /// A node with this id is already in the scene.
    #[error("node {0} already exists")]
    DuplicateId(NodeId),

    #[error("unknown node {0}")]
    UnknownNode(NodeId),

    #[error("unknown parent node {0}")]
    UnknownParent(NodeId),

    /// A parentless node was inserted while a root already exists.
    #[error("scene already has a root ({0})")]
    RootExists(NodeId),

    /// Moving a node under a different parent is not supported.
    #[error("node {child} belongs to {actual:?}, cannot be listed under {requested}")]
    Reparent {
        child: NodeId,
        requested: NodeId,
        actual: Option<NodeId>,
    },

    #[error("node {id} cannot have a negative size ({width} x {height})")]
    NegativeSize { id: NodeId, width: f64, height: f64 },

    /// NaN or infinite position or size.
    #[error("node {id} cannot have {field} = {value}")]
    NonFinite {
        id: NodeId,
        field: &'static str,
        value: f64,
    },

    /// Reported by `Scene::validate` when a structural invariant is broken.
    #[error("invalid tree: {0}")]
    InvalidTree(String),
}
