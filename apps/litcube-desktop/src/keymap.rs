use litcube_camera::CameraMovement;
use litcube_input::{Action, FillMode};
use winit::keyboard::KeyCode;

/// Desktop key bindings.
pub fn action_for(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::KeyW => Action::Move(CameraMovement::Forward),
        KeyCode::KeyS => Action::Move(CameraMovement::Backward),
        KeyCode::KeyA => Action::Move(CameraMovement::Left),
        KeyCode::KeyD => Action::Move(CameraMovement::Right),
        KeyCode::Space => Action::Move(CameraMovement::Up),
        KeyCode::ControlLeft => Action::Move(CameraMovement::Down),
        KeyCode::ShiftLeft => Action::Boost,
        KeyCode::KeyF => Action::ToggleCursor,
        KeyCode::KeyP => Action::TogglePause,
        KeyCode::Digit1 => Action::Fill(FillMode::Solid),
        KeyCode::Digit2 => Action::Fill(FillMode::Wireframe),
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

pub const HELP: &str =
    "WASD: Move | Space/Ctrl: Up/Down | Shift: Boost | F: Cursor | P: Pause | 1/2: Fill | F1: HUD | Esc: Quit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_direction_is_bound() {
        let bound: Vec<CameraMovement> = [
            KeyCode::KeyW,
            KeyCode::KeyS,
            KeyCode::KeyA,
            KeyCode::KeyD,
            KeyCode::Space,
            KeyCode::ControlLeft,
        ]
        .into_iter()
        .filter_map(|k| match action_for(k) {
            Some(Action::Move(dir)) => Some(dir),
            _ => None,
        })
        .collect();
        assert_eq!(bound, CameraMovement::ALL.to_vec());
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(action_for(KeyCode::KeyQ), None);
        assert_eq!(action_for(KeyCode::F1), None);
    }
}
