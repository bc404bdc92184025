use clap::{Parser, Subcommand, ValueEnum};
use litcube_camera::{Camera, CameraMovement};
use litcube_common::{Config, ConfigFormat};
use litcube_input::{Action, InputState};
use litcube_render::{DebugTextRenderer, RenderView, Renderer};
use litcube_scene::Scene;
use litcube_tools::CameraInspector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "litcube-cli", about = "Headless tools for the litcube demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML or JSON config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

impl From<Format> for ConfigFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Yaml => ConfigFormat::Yaml,
            Format::Json => ConfigFormat::Json,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl From<Direction> for CameraMovement {
    fn from(d: Direction) -> Self {
        match d {
            Direction::Forward => CameraMovement::Forward,
            Direction::Backward => CameraMovement::Backward,
            Direction::Left => CameraMovement::Left,
            Direction::Right => CameraMovement::Right,
            Direction::Up => CameraMovement::Up,
            Direction::Down => CameraMovement::Down,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and the effective camera
    Info,
    /// Print the effective configuration, or write it to a file
    Config {
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: Format,
        /// Write to this file instead of stdout; its extension picks the format
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Fly the camera for a number of frames and print the final view
    Fly {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Seconds per frame
        #[arg(long, default_value = "0.016")]
        dt: f32,
        /// Directions held for the whole flight (repeatable)
        #[arg(short, long = "move", value_enum)]
        moves: Vec<Direction>,
        /// Hold boost
        #[arg(short, long)]
        boost: bool,
        /// Horizontal pointer travel per frame
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_x: f32,
        /// Vertical pointer travel per frame, screen-down positive
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        look_y: f32,
        /// Print the view every N frames (0 = only at the end)
        #[arg(long, default_value = "0")]
        every: u32,
    },
}

/// Parameters of a scripted flight.
struct Flight {
    frames: u32,
    dt: f32,
    moves: Vec<CameraMovement>,
    boost: bool,
    look: (f32, f32),
}

/// Drive camera, input state and scene exactly as the desktop frame loop does.
fn fly(
    config: &Config,
    flight: &Flight,
    mut on_frame: impl FnMut(u32, &Camera, &Scene),
) -> (Camera, Scene) {
    let _span = tracing::info_span!("fly", frames = flight.frames).entered();
    let mut camera = Camera::from_settings(&config.camera);
    let mut scene = Scene::new();
    let mut input = InputState::default();

    for dir in &flight.moves {
        input.press(Action::Move(*dir));
    }
    if flight.boost {
        input.press(Action::Boost);
    }

    let mut pointer = (0.0_f32, 0.0_f32);
    input.apply_look(&mut camera, pointer.0, pointer.1);

    for frame in 1..=flight.frames {
        input.apply_movement(&mut camera, flight.dt);
        pointer.0 += flight.look.0;
        pointer.1 += flight.look.1;
        input.apply_look(&mut camera, pointer.0, pointer.1);
        scene.step(flight.dt);
        on_frame(frame, &camera, &scene);
    }
    tracing::debug!("flight finished at {}", CameraInspector::summary(&camera));
    (camera, scene)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = Config::load_or_default(cli.config.as_deref())?;
    let aspect = config.window.width as f32 / config.window.height as f32;
    let renderer = DebugTextRenderer::new();

    match cli.command {
        Commands::Info => {
            let camera = Camera::from_settings(&config.camera);
            println!("litcube-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("{}", CameraInspector::summary(&camera));
            println!(
                "projection: near={} far={} aspect={aspect:.3}",
                config.projection.near, config.projection.far
            );
        }
        Commands::Config {
            output: Some(path),
            ..
        } => {
            config.save(&path)?;
            tracing::info!("wrote config to {}", path.display());
        }
        Commands::Config {
            format,
            output: None,
        } => {
            print!("{}", config.to_string_as(format.into())?);
        }
        Commands::Fly {
            frames,
            dt,
            moves,
            boost,
            look_x,
            look_y,
            every,
        } => {
            let flight = Flight {
                frames,
                dt,
                moves: moves.into_iter().map(CameraMovement::from).collect(),
                boost,
                look: (look_x, look_y),
            };
            let (camera, scene) = fly(&config, &flight, |frame, camera, scene| {
                if every > 0 && frame % every == 0 {
                    let view = RenderView::from_camera(camera, &config.projection, aspect);
                    println!("-- frame {frame}");
                    print!("{}", renderer.render(scene, &view));
                }
            });
            let view = RenderView::from_camera(&camera, &config.projection, aspect);
            println!("-- final ({frames} frames)");
            print!("{}", renderer.render(&scene, &view));
            println!("{}", CameraInspector::summary(&camera));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn flight(moves: Vec<CameraMovement>) -> Flight {
        Flight {
            frames: 10,
            dt: 0.1,
            moves,
            boost: false,
            look: (0.0, 0.0),
        }
    }

    #[test]
    fn forward_flight_approaches_cube() {
        let (camera, scene) = fly(
            &Config::default(),
            &flight(vec![CameraMovement::Forward]),
            |_, _, _| {},
        );
        assert!((camera.position - Vec3::new(0.0, 0.0, 0.5)).length() < 1e-4);
        assert!((scene.elapsed() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn pointer_travel_turns_camera() {
        let mut f = flight(vec![]);
        f.look = (20.0, 0.0);
        let (camera, _) = fly(&Config::default(), &f, |_, _, _| {});
        // 10 frames x 20 units x 0.05 deg/unit
        assert!((camera.yaw() - (-80.0)).abs() < 1e-3);
    }

    #[test]
    fn screen_down_travel_is_clamped() {
        let mut f = flight(vec![]);
        f.look = (0.0, 1000.0);
        let (camera, _) = fly(&Config::default(), &f, |_, _, _| {});
        assert_eq!(camera.pitch(), -89.0);
    }

    #[test]
    fn callback_sees_every_frame() {
        let mut seen = Vec::new();
        fly(&Config::default(), &flight(vec![]), |frame, _, _| seen.push(frame));
        assert_eq!(seen, (1..=10).collect::<Vec<_>>());
    }
}
