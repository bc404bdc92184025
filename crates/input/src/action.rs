use litcube_camera::CameraMovement;

/// Polygon rasterization mode requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

/// A high-level action the frame loop understands.
///
/// The window layer maps keys to actions; nothing below it sees key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move the camera while held.
    Move(CameraMovement),
    /// Multiply movement speed while held.
    Boost,
    /// Capture or release the pointer for mouse look.
    ToggleCursor,
    /// Freeze or resume the frame loop.
    TogglePause,
    /// Switch polygon fill mode.
    Fill(FillMode),
    /// Close the application.
    Quit,
}

impl Action {
    /// Toggles act once per press; held actions act every frame.
    pub fn is_toggle(self) -> bool {
        matches!(self, Action::ToggleCursor | Action::TogglePause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn toggles_are_classified() {
        assert!(Action::ToggleCursor.is_toggle());
        assert!(Action::TogglePause.is_toggle());
        assert!(!Action::Boost.is_toggle());
        assert!(!Action::Move(CameraMovement::Forward).is_toggle());
        assert!(!Action::Fill(FillMode::Wireframe).is_toggle());
    }

    #[test]
    fn actions_are_distinct_set_keys() {
        let actions: HashSet<Action> = [
            Action::Fill(FillMode::Solid),
            Action::Fill(FillMode::Wireframe),
            Action::Fill(FillMode::Solid),
            Action::TogglePause,
        ]
        .into_iter()
        .collect();
        assert_eq!(actions.len(), 3);
        assert!(actions.contains(&Action::Fill(FillMode::Wireframe)));
    }

    #[test]
    fn fill_mode_defaults_to_solid() {
        assert_eq!(FillMode::default(), FillMode::Solid);
    }
}
