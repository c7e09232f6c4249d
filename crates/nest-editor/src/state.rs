//! Editor state and the event reducer.
//!
//! `EditorState` is the single owner of everything the engine mutates: the
//! scene, the viewport, the selection and the interaction mode. Each input
//! primitive is applied to completion by [`EditorState::apply`] before the
//! next one is looked at. Nothing here blocks or spawns; a host that
//! receives events on several threads must funnel them through one queue.

use crate::input::InputEvent;
use crate::interaction::Interaction;
use crate::shortcuts::{ShortcutAction, ShortcutMap};
use crate::viewport::{Viewport, ViewportConfig};
use kurbo::{Point, Vec2};
use nest_core::{NodeId, Scene, SceneError};
use nest_hit::HandleConfig;

/// Wheel-delta equivalent of one zoom shortcut press.
const ZOOM_KEY_DELTA: f64 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EditorConfig {
    pub viewport: ViewportConfig,
    pub handles: HandleConfig,
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub(crate) scene: Scene,
    pub(crate) viewport: Viewport,
    /// Never the root.
    pub(crate) selection: Option<NodeId>,
    pub(crate) interaction: Interaction,
    pub(crate) handles: HandleConfig,
    pub(crate) loading: bool,
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(Scene::new(), EditorConfig::default())
    }
}

impl EditorState {
    pub fn new(scene: Scene, config: EditorConfig) -> Self {
        Self {
            scene,
            viewport: Viewport::new(config.viewport),
            selection: None,
            interaction: Interaction::Idle,
            handles: config.handles,
            loading: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Direct viewport access for hosts that restore a saved view.
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn handles(&self) -> &HandleConfig {
        &self.handles
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Apply one input primitive. Returns `true` if anything visible
    /// changed (geometry, selection, viewport, overlays).
    pub fn apply(&mut self, event: &InputEvent) -> bool {
        let changed = match event {
            InputEvent::PointerMove { x, y } => {
                self.viewport.move_cursor(Point::new(*x, *y));
                true
            }
            InputEvent::DragStart => self.drag_start(),
            InputEvent::Drag { dx, dy } => self.drag(*dx, *dy),
            InputEvent::DragEnd => self.drag_end(),
            InputEvent::Wheel { dx, dy, modifiers } => self
                .viewport
                .wheel(Vec2::new(*dx, *dy), modifiers.command()),
            InputEvent::Pinch { delta } => self.viewport.pinch(*delta),
            InputEvent::Select { id } => self.select_node(*id),
            InputEvent::CreateNode { parent } => report(self.scene.create_node(*parent)).is_some(),
            InputEvent::AddChild { parent, child } => {
                report(self.scene.add_child(*parent, *child)).unwrap_or(false)
            }
            InputEvent::ResizeNode {
                id,
                left,
                top,
                width,
                height,
            } => report(self.scene.resize_node(*id, *left, *top, *width, *height)).is_some(),
            InputEvent::UpdateNode { id, patch } => {
                report(self.scene.update_node(*id, patch.clone())).is_some()
            }
            InputEvent::ResizeViewport { frame } => self.viewport.resize_frame(*frame),
            InputEvent::ScrollToCenter { frame } => {
                match self.scene.root().map(|root| self.scene.node(root)) {
                    Some(root) => self.viewport.scroll_to_center(*frame, root),
                    None => {
                        self.viewport.resize_frame(*frame);
                    }
                }
                true
            }
            InputEvent::SetLoading(loading) => {
                let changed = self.loading != *loading;
                self.loading = *loading;
                changed
            }
            InputEvent::Key { key, modifiers } => {
                match ShortcutMap::resolve(
                    key,
                    modifiers.ctrl,
                    modifiers.shift,
                    modifiers.alt,
                    modifiers.meta,
                ) {
                    Some(action) => self.apply_shortcut(action),
                    None => false,
                }
            }
        };

        if changed && event.edits_scene() {
            debug_assert!(
                self.scene.validate().is_ok(),
                "scene invariants broken after {event:?}: {:?}",
                self.scene.validate()
            );
        }
        changed
    }

    /// Apply a batch of primitives in order. Returns `true` if any of them
    /// changed visible state.
    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a InputEvent>) -> bool {
        events
            .into_iter()
            .fold(false, |changed, event| self.apply(event) || changed)
    }

    /// Create a node under `parent`, returning its id.
    pub fn create_node(&mut self, parent: NodeId) -> Result<NodeId, SceneError> {
        self.scene.create_node(parent)
    }

    /// Run a shortcut. Ignored while a drag or resize is in progress.
    pub fn apply_shortcut(&mut self, action: ShortcutAction) -> bool {
        if self.interaction.is_active() {
            log::warn!("ignoring {action:?} during {:?}", self.interaction);
            return false;
        }
        match action {
            ShortcutAction::Deselect => self.select_node(None),
            ShortcutAction::ZoomIn => self.viewport.pinch(ZOOM_KEY_DELTA),
            ShortcutAction::ZoomOut => self.viewport.pinch(-ZOOM_KEY_DELTA),
            ShortcutAction::ResetZoom => self.viewport.reset_zoom(),
            ShortcutAction::CenterRoot => match self.scene.root() {
                Some(root) => {
                    let frame = self.viewport.frame();
                    self.viewport.scroll_to_center(frame, self.scene.node(root));
                    true
                }
                None => false,
            },
            ShortcutAction::CreateChild => {
                let parent = self.selection.or(self.scene.root());
                match parent {
                    Some(parent) => report(self.scene.create_node(parent)).is_some(),
                    None => false,
                }
            }
        }
    }

    /// Explicit selection change. The root and unknown ids are refused, and
    /// nothing changes mid-drag.
    pub fn select_node(&mut self, id: Option<NodeId>) -> bool {
        if self.interaction.is_active() {
            log::warn!("ignoring selection change during {:?}", self.interaction);
            return false;
        }
        if let Some(id) = id
            && (!self.scene.contains(id) || self.scene.root() == Some(id))
        {
            log::warn!("ignoring selection of {id}: not a selectable node");
            return false;
        }
        if self.selection == id {
            return false;
        }
        log::debug!("selection {:?} -> {id:?}", self.selection);
        self.selection = id;
        true
    }
}

/// Log a refused scene edit and turn it into `None`.
fn report<T>(result: Result<T, SceneError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("scene edit refused: {err}");
            None
        }
    }
}
