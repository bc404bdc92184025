mod keymap;

use anyhow::Result;
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use litcube_camera::Camera;
use litcube_common::Config;
use litcube_input::{Action, FillMode, InputState};
use litcube_render::RenderView;
use litcube_render_wgpu::{GpuContext, WgpuRenderer};
use litcube_scene::Scene;
use litcube_tools::{CameraInspector, FpsCounter};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{DeviceEvent, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{CursorGrabMode, Window, WindowId};

/// Longest frame step fed to the camera and scene.
const MAX_FRAME_DT: f32 = 0.1;
/// Event-loop wake interval while paused.
const PAUSED_POLL: Duration = Duration::from_millis(50);

#[derive(Parser)]
#[command(name = "litcube-desktop", about = "Lit cube demo with a free-fly camera")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the window width
    #[arg(long)]
    width: Option<u32>,

    /// Override the window height
    #[arg(long)]
    height: Option<u32>,
}

/// Frame-loop state: everything except the GPU.
struct AppState {
    config: Config,
    camera: Camera,
    scene: Scene,
    input: InputState,
    fps: FpsCounter,
    last_frame: Instant,
    /// Virtual pointer position accumulated from raw mouse motion.
    pointer: Vec2,
    show_hud: bool,
    title: String,
}

impl AppState {
    fn new(config: Config) -> Self {
        let camera = Camera::from_settings(&config.camera);
        let title = config.window.title.clone();
        Self {
            config,
            camera,
            scene: Scene::new(),
            input: InputState::default(),
            fps: FpsCounter::default(),
            last_frame: Instant::now(),
            pointer: Vec2::ZERO,
            show_hud: true,
            title,
        }
    }

    /// Advance one frame. Does nothing while paused.
    fn update(&mut self, dt: f32) {
        if self.input.paused() {
            return;
        }
        let _span = tracing::trace_span!("update", dt).entered();
        self.input.apply_movement(&mut self.camera, dt);
        self.scene.step(dt);
    }

    /// Returns the action the key mapped to, if it took effect.
    fn handle_key(&mut self, key: KeyCode, pressed: bool) -> Option<Action> {
        if key == KeyCode::F1 && pressed {
            self.show_hud = !self.show_hud;
            return None;
        }

        let action = keymap::action_for(key)?;
        if !pressed {
            self.input.release(action);
            return None;
        }
        let was_paused = self.input.paused();
        if !self.input.press(action) {
            return None;
        }
        if was_paused && !self.input.paused() {
            self.fps.reset(Instant::now());
        }
        Some(action)
    }

    fn handle_mouse_motion(&mut self, dx: f64, dy: f64) {
        self.pointer += Vec2::new(dx as f32, dy as f32);
        let Vec2 { x, y } = self.pointer;
        self.input.apply_look(&mut self.camera, x, y);
    }

    fn draw_hud(&mut self, ctx: &EguiContext) {
        if !self.show_hud {
            return;
        }
        let summary = CameraInspector::summary(&self.camera);

        egui::Window::new("litcube")
            .anchor(egui::Align2::LEFT_TOP, [8.0, 8.0])
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.0}", self.fps.fps()));
                ui.label(summary.to_string());
                ui.label(format!(
                    "Front: ({:.2}, {:.2}, {:.2})",
                    summary.front.x, summary.front.y, summary.front.z
                ));
                ui.separator();
                ui.label(format!(
                    "Paused: {}  Cursor captured: {}  Fill: {:?}",
                    self.input.paused(),
                    self.input.cursor_captured(),
                    self.input.fill_mode()
                ));
                if self.input.boosted() {
                    ui.label("Boost");
                }
                ui.separator();
                ui.small(keymap::HELP);
            });
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
}

impl GpuApp {
    fn new(config: Config) -> Self {
        Self {
            state: AppState::new(config),
            window: None,
            gpu: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let settings = &self.state.config.window;
        let attrs = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let gpu = GpuContext::new(
            window.clone(),
            size.width,
            size.height,
            settings.vsync,
            settings.msaa_samples,
        )?;
        let renderer = WgpuRenderer::new(
            &gpu.device,
            gpu.format(),
            gpu.config.width,
            gpu.config.height,
            gpu.wireframe_supported,
            gpu.sample_count,
        );

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&gpu.device, gpu.format(), None, 1, false);

        apply_cursor_mode(&window, self.state.input.cursor_captured());

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.state.last_frame).as_secs_f32().min(MAX_FRAME_DT);
        self.state.last_frame = now;
        self.state.update(dt);

        let (Some(window), Some(gpu), Some(renderer), Some(egui_winit), Some(egui_renderer)) = (
            &self.window,
            &self.gpu,
            &self.renderer,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        ) else {
            return;
        };

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.reconfigure();
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let render_view = RenderView::from_camera(
            &self.state.camera,
            &self.state.config.projection,
            gpu.aspect(),
        );
        let wireframe = self.state.input.fill_mode() == FillMode::Wireframe;
        renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.scene,
            &render_view,
            wireframe,
        );

        let raw_input = egui_winit.take_egui_input(window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_hud(ctx);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();

        if !self.state.input.paused() {
            self.state.fps.frame(Instant::now());
            let title = self.state.fps.title(&self.state.config.window.title);
            if title != self.state.title {
                window.set_title(&title);
                self.state.title = title;
            }
        }
    }
}

/// Lock and hide the cursor for mouse look, or release it.
fn apply_cursor_mode(window: &Window, captured: bool) {
    if captured {
        let grabbed = window
            .set_cursor_grab(CursorGrabMode::Locked)
            .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
        if let Err(e) = grabbed {
            tracing::warn!("cursor grab unavailable: {e}");
        }
    } else if let Err(e) = window.set_cursor_grab(CursorGrabMode::None) {
        tracing::warn!("cursor release failed: {e}");
    }
    window.set_cursor_visible(!captured);
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to initialize window: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(new_size.width, new_size.height);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(&gpu.device, gpu.config.width, gpu.config.height);
                    }
                }
            }
            WindowEvent::Focused(false) => {
                self.state.input.release_all();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                let pressed = key_state == ElementState::Pressed;
                match self.state.handle_key(key, pressed) {
                    Some(Action::Quit) => event_loop.exit(),
                    Some(Action::ToggleCursor) => {
                        if let Some(window) = &self.window {
                            apply_cursor_mode(window, self.state.input.cursor_captured());
                        }
                    }
                    Some(Action::Fill(FillMode::Wireframe)) => {
                        if !self.renderer.as_ref().is_some_and(|r| r.wireframe_available()) {
                            tracing::warn!("wireframe requested but not supported by this adapter");
                        }
                    }
                    _ => {}
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.state.handle_mouse_motion(delta.0, delta.1);
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.state.input.paused() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + PAUSED_POLL));
        } else {
            event_loop.set_control_flow(ControlFlow::Poll);
        }
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut config = Config::load_or_default(cli.config.as_deref())?;
    if let Some(width) = cli.width {
        config.window.width = width;
    }
    if let Some(height) = cli.height {
        config.window.height = height;
    }
    config.validate()?;

    tracing::info!("litcube-desktop starting");

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(config);
    event_loop.run_app(&mut app)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn held_key_moves_camera_on_update() {
        let mut state = AppState::new(Config::default());
        state.handle_key(KeyCode::KeyW, true);
        state.update(0.1);
        assert!((state.camera.position - Vec3::new(0.0, 0.0, 2.75)).length() < 1e-5);
        state.handle_key(KeyCode::KeyW, false);
        state.update(0.1);
        assert!((state.camera.position - Vec3::new(0.0, 0.0, 2.75)).length() < 1e-5);
    }

    #[test]
    fn first_mouse_motion_is_swallowed() {
        let mut state = AppState::new(Config::default());
        state.handle_mouse_motion(250.0, 0.0);
        assert_eq!(state.camera.yaw(), -90.0);
        state.handle_mouse_motion(100.0, 0.0);
        assert!((state.camera.yaw() + 85.0).abs() < 1e-5);
    }

    #[test]
    fn mouse_down_looks_down() {
        let mut state = AppState::new(Config::default());
        state.handle_mouse_motion(0.0, 0.0);
        state.handle_mouse_motion(0.0, 100.0);
        assert!((state.camera.pitch() + 5.0).abs() < 1e-5);
    }

    #[test]
    fn pause_freezes_scene_and_camera() {
        let mut state = AppState::new(Config::default());
        state.handle_key(KeyCode::KeyD, true);
        assert_eq!(state.handle_key(KeyCode::KeyP, true), Some(Action::TogglePause));
        state.update(0.5);
        assert_eq!(state.scene.elapsed(), 0.0);
        assert_eq!(state.camera.position, Vec3::new(0.0, 0.0, 3.0));

        // key repeat does not unpause
        assert_eq!(state.handle_key(KeyCode::KeyP, true), None);
        state.handle_key(KeyCode::KeyP, false);
        state.handle_key(KeyCode::KeyP, true);
        state.update(0.5);
        assert!(state.scene.elapsed() > 0.0);
        assert!(state.camera.position.x > 0.0);
    }

    #[test]
    fn f1_toggles_hud_without_an_action() {
        let mut state = AppState::new(Config::default());
        assert!(state.show_hud);
        assert_eq!(state.handle_key(KeyCode::F1, true), None);
        assert!(!state.show_hud);
    }
}
