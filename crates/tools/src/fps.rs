use std::time::{Duration, Instant};

/// Frames counted before the measurement window restarts.
const WINDOW_FRAMES: u32 = 100;

/// Windowed frames-per-second counter for the window title and HUD.
///
/// FPS is frames seen divided by time since the window opened. The window
/// restarts every [`WINDOW_FRAMES`] frames so the figure tracks recent load.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    last_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl FpsCounter {
    pub fn new(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            last_fps: 0.0,
        }
    }

    /// Record a presented frame at `now` and return the current estimate.
    pub fn frame(&mut self, now: Instant) -> f32 {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed > Duration::ZERO {
            self.last_fps = self.frames as f32 / elapsed.as_secs_f32();
        }
        if self.frames > WINDOW_FRAMES {
            tracing::trace!(fps = self.last_fps, "fps window restarted");
            self.frames = 0;
            self.window_start = now;
        }
        self.last_fps
    }

    /// Most recent estimate, 0 until a frame lands after the window opened.
    pub fn fps(&self) -> f32 {
        self.last_fps
    }

    /// Restart the window, e.g. after a pause.
    pub fn reset(&mut self, now: Instant) {
        *self = Self::new(now);
    }

    /// Window title with the rounded FPS appended.
    pub fn title(&self, base: &str) -> String {
        format!("{base} | FPS: {}", self.last_fps.round() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steady_sixty_hz() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);
        let frame = Duration::from_micros(16_667);
        let mut now = start;
        for _ in 0..30 {
            now += frame;
            fps.frame(now);
        }
        assert!((fps.fps() - 60.0).abs() < 0.5, "{}", fps.fps());
        assert_eq!(fps.title("litcube"), "litcube | FPS: 60");
    }

    #[test]
    fn window_restarts_after_limit() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);
        let mut now = start;
        for _ in 0..=WINDOW_FRAMES {
            now += Duration::from_millis(10);
            fps.frame(now);
        }
        // the slow frame only counts against the fresh window
        now += Duration::from_millis(500);
        let estimate = fps.frame(now);
        assert!((estimate - 2.0).abs() < 1e-3, "{estimate}");
    }

    #[test]
    fn zero_elapsed_keeps_previous_estimate() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);
        assert_eq!(fps.frame(start), 0.0);
    }

    #[test]
    fn reset_clears_estimate() {
        let start = Instant::now();
        let mut fps = FpsCounter::new(start);
        fps.frame(start + Duration::from_millis(20));
        assert!(fps.fps() > 0.0);
        fps.reset(start + Duration::from_secs(1));
        assert_eq!(fps.fps(), 0.0);
    }
}
