//! Interaction engine for the nested-box editor.
//!
//! [`EditorState`] owns the scene, the viewport and the interaction mode.
//! Input primitives go in through [`EditorState::apply`], one at a time and
//! in order; the renderer reads frames and overlays back out through the
//! queries in [`overlay`].

pub mod input;
pub mod interaction;
pub mod overlay;
pub mod shortcuts;
pub mod state;
pub mod viewport;

pub use input::{InputEvent, Modifiers};
pub use interaction::Interaction;
pub use overlay::{Highlight, NodeFrame, RenderSnapshot};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use state::{EditorConfig, EditorState};
pub use viewport::{Viewport, ViewportConfig, ViewportFrame};
