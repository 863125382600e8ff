use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for terrawalk")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all checks: fmt, clippy, tests
    Check,
    /// Run all tests
    Test,
    /// Write a procedural grayscale heightmap for local runs
    Heightmap {
        /// Output PNG path
        #[arg(short, long, default_value = "heightmap.png")]
        out: PathBuf,
        /// Raster edge length in pixels
        #[arg(short, long, default_value = "512")]
        size: u32,
        /// Phase offset; different seeds give different hills
        #[arg(long, default_value = "7")]
        seed: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check => {
            cargo("fmt --check", &["fmt", "--all", "--", "--check"])?;
            cargo(
                "clippy",
                &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
            )?;
            cargo("test", &["test", "--workspace"])?;
        }
        Commands::Test => cargo("test", &["test", "--workspace"])?,
        Commands::Heightmap { out, size, seed } => {
            write_heightmap(&out, size, seed)?;
            println!("wrote {0}x{0} heightmap to {1}", size, out.display());
        }
    }

    Ok(())
}

fn cargo(step: &str, args: &[&str]) -> Result<()> {
    println!("==> Running cargo {step}");
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {step} failed");
    }
    Ok(())
}

/// Rolling hills that flatten towards the border, in `[0, 1]`.
fn hill_height(u: f32, v: f32, seed: u32) -> f32 {
    let phase = seed as f32 * 0.618;
    let mut h = 0.0;
    let mut amplitude = 0.5;
    let mut frequency = 2.0;
    for _ in 0..4 {
        let x = u * frequency * std::f32::consts::TAU + phase;
        let y = v * frequency * std::f32::consts::TAU - phase * 1.3;
        h += amplitude * (x.sin() * y.cos() * 0.5 + 0.5);
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    let du = u - 0.5;
    let dv = v - 0.5;
    let falloff = (1.0 - (du * du + dv * dv).sqrt() * 1.5).clamp(0.0, 1.0);
    (h / 0.9375 * falloff).clamp(0.0, 1.0)
}

fn write_heightmap(out: &Path, size: u32, seed: u32) -> Result<()> {
    anyhow::ensure!(size >= 2, "heightmap size must be at least 2, got {size}");
    let last = (size - 1) as f32;
    let image = GrayImage::from_fn(size, size, |x, y| {
        let h = hill_height(x as f32 / last, y as f32 / last, seed);
        Luma([(h * 255.0).round() as u8])
    });
    image
        .save(out)
        .with_context(|| format!("writing {}", out.display()))
}
