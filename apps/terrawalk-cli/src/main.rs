use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use terrawalk_common::WalkConfig;
use terrawalk_input::{Action, KeyState};
use terrawalk_kernel::FrameLoop;
use terrawalk_render::{DebugTextRenderer, RenderView, Renderer};
use terrawalk_terrain::{ElevationField, FieldStats, build_surface, load_path, sample_height};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "terrawalk-cli", about = "CLI tool for terrawalk heightmaps")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML config file; built-in defaults are used when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Heightmap raster, overrides `terrain.heightmap`
    #[arg(long, global = true)]
    heightmap: Option<PathBuf>,

    /// Grid resolution, overrides `terrain.grid_size`
    #[arg(long, global = true)]
    grid_size: Option<u32>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version, crate info and the effective config
    Info,
    /// Load the heightmap and print field and surface statistics
    Inspect {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the ground height at a world position
    Sample {
        #[arg(allow_hyphen_values = true)]
        x: f32,
        #[arg(allow_hyphen_values = true)]
        z: f32,
    },
    /// Simulate a walk at a fixed frame rate without a window
    Walk {
        /// Number of frames to simulate
        #[arg(short, long, default_value = "300")]
        frames: u64,
        /// Frame step in seconds
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Heading in degrees, 0 looks down -Z and 90 looks down +X
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        heading: f32,
        /// Hold W
        #[arg(long)]
        forward: bool,
        /// Hold S
        #[arg(long)]
        back: bool,
        /// Hold A
        #[arg(long)]
        left: bool,
        /// Hold D
        #[arg(long)]
        right: bool,
        /// Hold Shift
        #[arg(long)]
        run: bool,
        /// Press Space on this frame
        #[arg(long)]
        jump_at: Option<u64>,
        /// Print a line every N frames (0 prints only the end state)
        #[arg(long, default_value = "60")]
        every: u64,
    },
}

#[derive(Serialize)]
struct InspectReport {
    heightmap: PathBuf,
    field: FieldStats,
    vertices: usize,
    triangles: usize,
    elevation_min: f32,
    elevation_max: f32,
}

fn load_config(cli: &Cli) -> anyhow::Result<WalkConfig> {
    let mut config = match &cli.config {
        Some(path) => WalkConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => WalkConfig::default(),
    };
    if let Some(heightmap) = &cli.heightmap {
        config.terrain.heightmap = heightmap.clone();
    }
    if let Some(grid_size) = cli.grid_size {
        config.terrain.grid_size = grid_size;
    }
    config.validate()?;
    Ok(config)
}

fn load_field(config: &WalkConfig) -> anyhow::Result<ElevationField> {
    let path = &config.terrain.heightmap;
    load_path(path, config.terrain.grid_size as usize)
        .with_context(|| format!("loading heightmap {}", path.display()))
}

/// Unit look direction for a compass heading.
fn heading_direction(degrees: f32) -> Vec3 {
    let h = degrees.to_radians();
    Vec3::new(h.sin(), 0.0, -h.cos())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Info => {
            println!("terrawalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("terrain: {}", terrawalk_terrain::crate_info());
            println!("render: {}", terrawalk_render::crate_info());
            println!("--- effective config ---");
            print!("{}", config.to_yaml_string()?);
        }
        Commands::Inspect { json } => {
            let field = load_field(&config)?;
            let surface = build_surface(&field, &config.terrain.scale());
            let (elevation_min, elevation_max) = surface.elevation_range();
            let report = InspectReport {
                heightmap: config.terrain.heightmap.clone(),
                field: field.stats(),
                vertices: surface.vertex_count(),
                triangles: surface.triangle_count(),
                elevation_min,
                elevation_max,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("Heightmap: {}", report.heightmap.display());
                println!("{}", report.field);
                println!(
                    "Surface: {} vertices, {} triangles",
                    report.vertices, report.triangles
                );
                println!("Elevation: {elevation_min:.3} .. {elevation_max:.3}");
            }
        }
        Commands::Sample { x, z } => {
            let field = load_field(&config)?;
            let scale = config.terrain.scale();
            let ground = sample_height(&field, x, z, &scale);
            println!(
                "ground({x}, {z}) = {ground:.4}  eye = {:.4}",
                ground + config.player.player_height
            );
        }
        Commands::Walk {
            frames,
            dt,
            heading,
            forward,
            back,
            left,
            right,
            run,
            jump_at,
            every,
        } => {
            let field = load_field(&config)?;
            let surface = build_surface(&field, &config.terrain.scale());
            let mut frame_loop = FrameLoop::from_config(field, &config);
            let look = heading_direction(heading);
            tracing::debug!(frames, dt, heading, "starting headless walk");

            let mut keys = KeyState::new();
            keys.set(Action::Forward, forward);
            keys.set(Action::Back, back);
            keys.set(Action::StrafeLeft, left);
            keys.set(Action::StrafeRight, right);
            keys.set(Action::Run, run);

            for i in 1..=frames {
                keys.set(Action::Jump, jump_at == Some(i));
                let report = frame_loop.step(dt, &keys.intent(look), true);
                if every > 0 && i % every == 0 {
                    let p = report.position;
                    println!(
                        "frame {:>5}: pos=({:.2}, {:.2}, {:.2}) {}",
                        report.frame, p.x, p.y, p.z, report.contact
                    );
                }
            }

            let player = frame_loop.player();
            println!(
                "Final: pos={} contact={} ground={:.3}",
                player.position,
                player.contact,
                frame_loop.ground_height(player.position.x, player.position.z)
            );
            let view = RenderView::first_person(player.position, look);
            print!("{}", DebugTextRenderer::new().render(&surface, &view));
        }
    }

    Ok(())
}
