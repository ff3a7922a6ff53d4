//! Row-parallel render scheduling.
//!
//! A fixed pool of workers pulls scanline indices from a shared atomic
//! counter. Each claimed row is rendered in full by one worker and stored in
//! that row's own slot, so pixels need no locking. Rows come back in image
//! order whatever order they finished in.

use crate::buffer::PixelBuffer;
use crate::error::{RenderError, RenderResult};
use crate::integrator::{trace, Background};
use crate::random::row_rng;
use crate::{Camera, Color, Hittable};
use rand::RngCore;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::OnceLock;
use std::time::Instant;

/// Render configuration that is not part of the camera.
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Worker count; `None` or 0 uses the available hardware parallelism
    pub threads: Option<usize>,
    /// Base seed for the per-row generators; `None` picks one at random
    pub seed: Option<u64>,
    /// Color of rays that escape the scene
    pub background: Background,
}

impl RenderConfig {
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }
}

/// Number of workers to start for a requested count.
pub fn resolve_thread_count(requested: Option<usize>) -> usize {
    match requested {
        Some(n) if n > 0 => n,
        _ => std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1),
    }
}

/// Sum of `samples_per_pixel` path samples through pixel (x, y).
pub fn sample_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        // get_ray jitters inside the pixel for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += trace(&ray, world, camera.max_depth(), background, rng);
    }

    pixel_color
}

/// Render one full scanline of accumulated sums.
pub fn render_row(
    camera: &Camera,
    world: &dyn Hittable,
    y: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Vec<Color> {
    (0..camera.image_width())
        .map(|x| sample_pixel(camera, world, x, y, background, rng))
        .collect()
}

/// Render the entire scene, blocking until every row is done.
pub fn render(camera: &Camera, world: &dyn Hittable, config: &RenderConfig) -> RenderResult<PixelBuffer> {
    let width = camera.image_width();
    let height = camera.image_height() as usize;
    let threads = resolve_thread_count(config.threads);
    let seed = config.seed.unwrap_or_else(rand::random);

    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}, {} threads, seed {}",
        width,
        height,
        camera.samples_per_pixel(),
        camera.max_depth(),
        threads,
        seed
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("ember-worker-{}", i))
        .build()?;

    let rows: Vec<OnceLock<Vec<Color>>> = (0..height).map(|_| OnceLock::new()).collect();
    let next_row = AtomicUsize::new(0);
    let start = Instant::now();

    // One worker loop per pool thread; returns after every worker exits.
    let rows_per_worker = pool.broadcast(|ctx| {
        let mut claimed = 0usize;
        loop {
            let j = next_row.fetch_add(1, Ordering::Relaxed);
            if j >= height {
                break;
            }

            let mut rng = row_rng(seed, j);
            let scanline = render_row(camera, world, j as u32, &config.background, &mut rng);
            let first_write = rows[j].set(scanline).is_ok();
            debug_assert!(first_write, "row {} claimed twice", j);
            claimed += 1;
        }
        log::debug!("Worker {} rendered {} rows", ctx.index(), claimed);
        claimed
    });

    log::info!(
        "Rendered {} rows in {:?} ({:?} rows per worker)",
        rows_per_worker.iter().sum::<usize>(),
        start.elapsed(),
        rows_per_worker
    );

    let rows = rows
        .into_iter()
        .enumerate()
        .map(|(j, row)| row.into_inner().ok_or(RenderError::MissingRow(j)))
        .collect::<RenderResult<Vec<_>>>()?;

    Ok(PixelBuffer::from_rows(width, rows, camera.samples_per_pixel()))
}
