use crate::action::{Action, FillMode};
use crate::pointer::PointerLook;
use glam::Vec2;
use litcube_camera::{Camera, CameraMovement};
use std::collections::{BTreeSet, HashSet};

/// Input state owned by the frame loop.
///
/// Tracks which movement actions are held, edge-triggers toggles, and gates
/// pointer look on cursor capture and pause.
#[derive(Debug, Clone)]
pub struct InputState {
    held: BTreeSet<CameraMovement>,
    boost: bool,
    /// Toggle actions currently held down; they fire again only after release.
    latched: HashSet<Action>,
    cursor_captured: bool,
    paused: bool,
    fill_mode: FillMode,
    quit_requested: bool,
    pointer: PointerLook,
}

impl Default for InputState {
    /// Starts with the cursor captured, like the desktop window on launch.
    fn default() -> Self {
        Self::new(true)
    }
}

impl InputState {
    pub fn new(cursor_captured: bool) -> Self {
        Self {
            held: BTreeSet::new(),
            boost: false,
            latched: HashSet::new(),
            cursor_captured,
            paused: false,
            fill_mode: FillMode::default(),
            quit_requested: false,
            pointer: PointerLook::new(),
        }
    }

    pub fn cursor_captured(&self) -> bool {
        self.cursor_captured
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn boosted(&self) -> bool {
        self.boost
    }

    pub fn fill_mode(&self) -> FillMode {
        self.fill_mode
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Pointer look is active only while captured and running.
    pub fn look_enabled(&self) -> bool {
        self.cursor_captured && !self.paused
    }

    /// Held movement directions in declaration order.
    pub fn held(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        self.held.iter().copied()
    }

    /// Handle a key press. Returns false when the press was swallowed (a
    /// toggle still held from a previous press).
    pub fn press(&mut self, action: Action) -> bool {
        if action.is_toggle() && !self.latched.insert(action) {
            return false;
        }

        match action {
            Action::Move(dir) => {
                self.held.insert(dir);
            }
            Action::Boost => self.boost = true,
            Action::ToggleCursor => {
                self.cursor_captured = !self.cursor_captured;
                if self.cursor_captured {
                    self.pointer.reset();
                }
                tracing::info!(captured = self.cursor_captured, "cursor capture toggled");
            }
            Action::TogglePause => {
                self.paused = !self.paused;
                if !self.paused {
                    self.pointer.reset();
                }
                tracing::info!(paused = self.paused, "pause toggled");
            }
            Action::Fill(mode) => {
                if self.fill_mode != mode {
                    tracing::debug!(?mode, "fill mode changed");
                }
                self.fill_mode = mode;
            }
            Action::Quit => self.quit_requested = true,
        }
        true
    }

    /// Handle a key release.
    pub fn release(&mut self, action: Action) {
        match action {
            Action::Move(dir) => {
                self.held.remove(&dir);
            }
            Action::Boost => self.boost = false,
            Action::ToggleCursor | Action::TogglePause => {
                self.latched.remove(&action);
            }
            Action::Fill(_) | Action::Quit => {}
        }
    }

    /// Drop every held key, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
        self.boost = false;
        self.latched.clear();
    }

    /// Feed an absolute pointer position. Returns the look offset to apply,
    /// or `None` while look control is disabled.
    pub fn pointer_moved(&mut self, x: f32, y: f32) -> Option<Vec2> {
        if !self.look_enabled() {
            return None;
        }
        if self.pointer.awaiting_first_sample() {
            tracing::trace!(x, y, "pointer reference taken");
        }
        Some(self.pointer.sample(x, y))
    }

    /// Feed a pointer position straight into the camera.
    pub fn apply_look(&mut self, camera: &mut Camera, x: f32, y: f32) {
        if let Some(offset) = self.pointer_moved(x, y) {
            camera.look(offset.x, offset.y);
        }
    }

    /// One movement call per held direction. Returns how many were applied.
    pub fn apply_movement(&self, camera: &mut Camera, delta_time: f32) -> usize {
        if self.paused {
            return 0;
        }
        for dir in &self.held {
            camera.process_movement(*dir, delta_time, self.boost);
        }
        self.held.len()
    }
}
