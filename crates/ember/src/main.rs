use anyhow::{Context, Result};
use clap::Parser;
use ember_renderer::{render, save_ppm, Camera, CameraConfig, RenderConfig};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Write;
use std::path::Path;

mod cli;
mod scene;

use cli::Args;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();
    info!("ember {}", env!("CARGO_PKG_VERSION"));

    // One seed drives both scene generation and sampling
    let seed = args.seed.unwrap_or_else(rand::random);

    let base = CameraConfig::default()
        .with_resolution(args.width, args.aspect)
        .with_quality(args.spp, args.max_depth);

    let (world, camera_config) = match &args.scene {
        Some(path) => scene::load_scene(path, scene::cover_camera(base))
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            let mut rng = StdRng::seed_from_u64(seed);
            (scene::random_scene(&mut rng), scene::cover_camera(base))
        }
    };
    info!("Scene has {} objects", world.len());

    let camera = Camera::new(camera_config).context("Invalid camera configuration")?;

    let mut config = RenderConfig::default().with_seed(seed);
    config.threads = args.worker_threads();

    let image = render(&camera, &world, &config).context("Render failed")?;

    save_ppm(&image, &args.out)
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    report_written(&mut std::io::stderr(), &args.out)?;

    Ok(())
}

/// Completion line, printed whatever the log level.
fn report_written(out: &mut dyn Write, path: &Path) -> std::io::Result<()> {
    writeln!(out, "Wrote {}", path.display())
}
