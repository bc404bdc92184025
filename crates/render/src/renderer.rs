use glam::{Mat4, Vec3};
use litcube_camera::Camera;
use litcube_common::ProjectionSettings;
use litcube_scene::Scene;
use std::fmt::Write as _;

/// Camera snapshot for one frame: everything a renderer needs for uniforms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderView {
    /// Camera position in world space.
    pub eye: Vec3,
    /// Unit view direction.
    pub front: Vec3,
    pub view: Mat4,
    pub projection: Mat4,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub aspect: f32,
}

impl RenderView {
    /// Capture the camera's current view and build a projection for `aspect`.
    pub fn from_camera(camera: &Camera, projection: &ProjectionSettings, aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            tracing::warn!(aspect, "degenerate aspect ratio, falling back to 1.0");
            1.0
        };
        Self {
            eye: camera.position,
            front: camera.front(),
            view: camera.view_matrix(),
            projection: camera.projection_matrix(aspect, projection.near, projection.far),
            fov_degrees: camera.zoom,
            aspect,
        }
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// The point one unit ahead of the eye.
    pub fn target(&self) -> Vec3 {
        self.eye + self.front
    }
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view, then produces output. It never
/// mutates either.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame of the scene from the given view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Text renderer for the CLI, logs, and tests.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== Scene (t={:.2}s) ===", scene.elapsed());
        let _ = writeln!(
            out,
            "Camera: eye=({:.2}, {:.2}, {:.2}) target=({:.2}, {:.2}, {:.2}) fov={:.0} aspect={:.2}",
            view.eye.x,
            view.eye.y,
            view.eye.z,
            view.target().x,
            view.target().y,
            view.target().z,
            view.fov_degrees,
            view.aspect
        );

        let vp = view.view_projection();
        for (name, model) in [("cube", scene.cube_model()), ("lamp", scene.lamp_model())] {
            let centre = model.transform_point3(Vec3::ZERO);
            let clip = vp * centre.extend(1.0);
            let visible = clip.w > 0.0
                && clip.x.abs() <= clip.w
                && clip.y.abs() <= clip.w
                && (0.0..=clip.w).contains(&clip.z);
            let _ = writeln!(
                out,
                "  [{name}] pos=({:.2}, {:.2}, {:.2}) visible={visible}",
                centre.x, centre.y, centre.z
            );
        }
        let _ = writeln!(out, "  cube yaw={:.1}deg", scene.cube_yaw_degrees());

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start_view() -> RenderView {
        let camera = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        RenderView::from_camera(&camera, &ProjectionSettings::default(), 16.0 / 9.0)
    }

    #[test]
    fn view_matches_camera() {
        let camera = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        let view = RenderView::from_camera(&camera, &ProjectionSettings::default(), 2.0);
        assert_eq!(view.view, camera.view_matrix());
        assert_eq!(view.eye, camera.position);
        assert_eq!(view.fov_degrees, 70.0);
        assert!((view.target() - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
    }

    #[test]
    fn degenerate_aspect_falls_back() {
        let camera = Camera::default();
        let view = RenderView::from_camera(&camera, &ProjectionSettings::default(), 0.0);
        assert_eq!(view.aspect, 1.0);
        assert!(view.projection.is_finite());
    }

    #[test]
    fn debug_renderer_reports_visibility() {
        let scene = Scene::new();
        let output = DebugTextRenderer::new().render(&scene, &start_view());
        assert!(output.contains("eye=(0.00, 0.00, 3.00)"));
        assert!(output.contains("[cube] pos=(0.00, 0.00, 0.00) visible=true"));
        assert!(output.contains("[lamp]"));
    }

    #[test]
    fn cube_behind_camera_is_not_visible() {
        let mut camera = Camera::at(Vec3::new(0.0, 0.0, 3.0));
        camera.look(3600.0, 0.0);
        let view = RenderView::from_camera(&camera, &ProjectionSettings::default(), 1.0);
        let output = DebugTextRenderer::new().render(&Scene::new(), &view);
        assert!(output.contains("[cube] pos=(0.00, 0.00, 0.00) visible=false"));
    }
}
