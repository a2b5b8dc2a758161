use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use cubegrid_kernel::{Engine, EngineConfig, UniformMode};
use cubegrid_math::Matrix4;
use cubegrid_render::{DebugTextRenderer, Renderer};
use cubegrid_scene::{Chunk, GridDims};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubegrid-cli", about = "Headless tools for the cube grid engine")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML engine configuration; defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate versions and the effective configuration summary
    Info,
    /// Print the effective configuration as YAML
    Config,
    /// Run the engine headless for a number of frames
    Frame {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "60")]
        frames: u32,
        /// Frame duration in milliseconds
        #[arg(long, default_value = "16")]
        dt_ms: u64,
        /// Physical key codes held for the whole run (e.g. KeyW)
        #[arg(long = "hold")]
        held: Vec<String>,
        /// Mouse delta applied before the first frame, as DX,DY
        #[arg(long, value_parser = parse_pair, allow_hyphen_values = true)]
        look: Option<(f64, f64)>,
        /// Uniform matrix composition
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
        /// Emit the last frame as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Invert a row-major 4x4 matrix given as 16 numbers
    Inverse {
        #[arg(required = true, allow_hyphen_values = true)]
        values: Vec<f64>,
        /// Use Gauss-Jordan elimination instead of the adjugate
        #[arg(long)]
        gauss: bool,
    },
    /// Build a chunk and report its geometry
    Chunk {
        /// Grid dimensions as XxYxZ
        #[arg(long, value_parser = parse_dims, default_value = "16x1x16")]
        dims: GridDims,
        /// Cell to leave empty, as X,Y,Z (repeatable)
        #[arg(long = "hole", value_parser = parse_cell)]
        holes: Vec<(usize, usize, usize)>,
        /// Centre the grid on the origin
        #[arg(long)]
        centered: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Camera,
    Object,
}

impl From<ModeArg> for UniformMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Camera => UniformMode::Camera,
            ModeArg::Object => UniformMode::Object,
        }
    }
}

#[derive(Serialize)]
struct FrameReport {
    frame: u64,
    fps: u32,
    vertex_count: u32,
    geometry_revision: u64,
    camera_position: [f64; 3],
    camera_rotation: [f64; 3],
    uniform: [f64; 16],
}

fn parse_pair(s: &str) -> Result<(f64, f64), String> {
    let (a, b) = s.split_once(',').ok_or("expected DX,DY")?;
    let a = a.trim().parse().map_err(|e| format!("{a}: {e}"))?;
    let b = b.trim().parse().map_err(|e| format!("{b}: {e}"))?;
    Ok((a, b))
}

fn parse_triple(s: &str, sep: char) -> Result<[usize; 3], String> {
    let parts: Vec<&str> = s.split(sep).collect();
    if parts.len() != 3 {
        return Err(format!("expected three values separated by '{sep}'"));
    }
    let mut out = [0; 3];
    for (slot, part) in out.iter_mut().zip(&parts) {
        *slot = part.trim().parse().map_err(|e| format!("{part}: {e}"))?;
    }
    Ok(out)
}

fn parse_dims(s: &str) -> Result<GridDims, String> {
    let [x, y, z] = parse_triple(s, 'x')?;
    Ok(GridDims::new(x, y, z))
}

fn parse_cell(s: &str) -> Result<(usize, usize, usize), String> {
    let [x, y, z] = parse_triple(s, ',')?;
    Ok((x, y, z))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn print_matrix(m: &Matrix4) {
    for row in m.rows() {
        println!(
            "  [{:>12.6} {:>12.6} {:>12.6} {:>12.6}]",
            row[0], row[1], row[2], row[3]
        );
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            let config = load_config(cli.config.as_ref())?;
            println!("cubegrid-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("math: {}", cubegrid_math::crate_info());
            println!("scene: {}", cubegrid_scene::crate_info());
            println!("input: {}", cubegrid_input::crate_info());
            println!("camera: {}", cubegrid_camera::crate_info());
            println!("kernel: {}", cubegrid_kernel::crate_info());
            println!("render: {}", cubegrid_render::crate_info());
            println!(
                "chunk: {} cells, spacing {}, {} key bindings",
                config.chunk.dims, config.chunk.spacing, config.keys.len()
            );
        }
        Commands::Config => {
            let config = load_config(cli.config.as_ref())?;
            print!("{}", config.to_yaml()?);
        }
        Commands::Frame {
            frames,
            dt_ms,
            held,
            look,
            mode,
            json,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            if let Some(mode) = mode {
                config.scene.mode = mode.into();
            }
            let mut engine = Engine::new(config)?;

            let controls = engine.controls_mut();
            controls.set_engaged(true);
            for code in &held {
                if controls.key_down(code).is_none() {
                    tracing::warn!(code = %code, "key is not bound to a control");
                }
            }
            if let Some((dx, dy)) = look {
                controls.mouse_motion(dx, dy);
            }

            let dt = Duration::from_millis(dt_ms);
            for _ in 1..frames {
                engine.tick(dt);
            }
            let frame = engine.tick(dt);

            if json {
                let report = FrameReport {
                    frame: frame.frame_index,
                    fps: frame.fps,
                    vertex_count: frame.vertex_count,
                    geometry_revision: frame.geometry_revision,
                    camera_position: frame.camera_position.to_array(),
                    camera_rotation: frame.camera_rotation.to_array(),
                    uniform: frame.uniform.to_array(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", DebugTextRenderer::with_matrix().render(&frame));
            }
        }
        Commands::Inverse { values, gauss } => {
            let m = Matrix4::try_from_slice(&values)?;
            let inv = if gauss {
                m.inverse_gauss_jordan()
            } else {
                m.inverse()
            };
            println!("determinant: {}", m.determinant());
            println!("inverse:");
            print_matrix(&inv);
            if !inv.is_finite() {
                tracing::warn!("matrix is singular; inverse contains non-finite values");
            } else if !m.multiply(&inv).approx_eq(&Matrix4::IDENTITY, 1e-9) {
                tracing::warn!("M * M^-1 deviates from identity");
            }
        }
        Commands::Chunk {
            dims,
            holes,
            centered,
        } => {
            let mut config = load_config(cli.config.as_ref())?;
            config.chunk.dims = dims;
            config.chunk.centered = centered;
            let mut chunk = Chunk::from_settings(config.chunk)?;
            for (x, y, z) in holes {
                chunk.clear(x, y, z)?;
            }
            let buffer = chunk.vertex_buffer();
            println!("dims: {}", chunk.dims());
            println!("cubes: {}", chunk.cube_count());
            println!("vertices: {}", chunk.vertex_count());
            println!("floats: {}", buffer.len());
            if let Some(first) = chunk.visible_cubes().next() {
                let c = first.coordinates();
                println!("first cube: ({}, {}, {})", c.x, c.y, c.z);
            }
        }
    }

    Ok(())
}
