use glam::Vec2;

/// Converts absolute pointer positions into look offsets.
///
/// Holds the "first move" state explicitly: until a reference position has
/// been seen, a sample only records the position and produces no rotation.
#[derive(Debug, Clone, Default)]
pub struct PointerLook {
    last: Option<Vec2>,
}

impl PointerLook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the reference position. The next sample yields a zero offset.
    pub fn reset(&mut self) {
        self.last = None;
    }

    /// True until the first sample after construction or [`PointerLook::reset`].
    pub fn awaiting_first_sample(&self) -> bool {
        self.last.is_none()
    }

    /// Record a pointer position and return `(dx, dy)` since the previous one.
    ///
    /// `dy` is inverted (screen Y grows downwards) so moving the pointer up
    /// yields a positive offset, i.e. looking up.
    pub fn sample(&mut self, x: f32, y: f32) -> Vec2 {
        let pos = Vec2::new(x, y);
        let offset = match self.last {
            Some(last) => Vec2::new(pos.x - last.x, last.y - pos.y),
            None => {
                tracing::debug!(x, y, "pointer reference reset");
                Vec2::ZERO
            }
        };
        self.last = Some(pos);
        offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_a_reference() {
        let mut look = PointerLook::new();
        assert!(look.awaiting_first_sample());
        assert_eq!(look.sample(400.0, 300.0), Vec2::ZERO);
        assert!(!look.awaiting_first_sample());
    }

    #[test]
    fn offsets_invert_vertical_axis() {
        let mut look = PointerLook::new();
        look.sample(400.0, 300.0);
        // right and up on screen
        assert_eq!(look.sample(410.0, 290.0), Vec2::new(10.0, 10.0));
        assert_eq!(look.sample(405.0, 295.0), Vec2::new(-5.0, -5.0));
    }

    #[test]
    fn reset_swallows_the_jump() {
        let mut look = PointerLook::new();
        look.sample(0.0, 0.0);
        look.reset();
        assert_eq!(look.sample(1500.0, -800.0), Vec2::ZERO);
        assert_eq!(look.sample(1501.0, -800.0), Vec2::new(1.0, 0.0));
    }
}
