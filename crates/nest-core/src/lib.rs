pub mod error;
pub mod frame;
pub mod id;
pub mod model;
pub mod transform;

pub use error::SceneError;
pub use frame::Frame;
pub use id::NodeId;
pub use model::*;
pub use transform::{
    ancestor_offset, canvas_space_frame, canvas_space_origin, root_space_frame, root_space_origin,
    round_px, size_at, snap_px,
};

// Re-export kurbo geometry so downstream crates agree on one version.
pub use kurbo::{Point, Rect, Size, Vec2};
