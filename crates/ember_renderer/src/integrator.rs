//! Monte Carlo path integrator.
//!
//! Walks a ray through the scene until it escapes, is absorbed, or runs out
//! of bounces, carrying the product of attenuations along the way.

use crate::{Color, Hittable};
use ember_math::{Interval, Ray};
use rand::RngCore;

/// Lower bound on accepted hit distances; keeps rays from re-hitting the
/// surface they just left.
pub const SHADOW_ACNE_EPSILON: f32 = 0.001;

/// What a ray sees when it leaves the scene.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Background {
    /// Vertical gradient from white (looking down) to sky blue (looking up).
    #[default]
    Sky,
    /// A constant color in every direction.
    Solid(Color),
}

impl Background {
    /// Radiance arriving along `ray` from the environment.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Compute the color seen by a ray.
///
/// Equivalent to the recursive estimator
/// `emitted + attenuation * trace(scattered, depth - 1)`, unrolled into a
/// loop so `depth` does not translate into stack depth.
pub fn trace(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    background: &Background,
    rng: &mut dyn RngCore,
) -> Color {
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut ray = *ray;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f32::INFINITY)) else {
            return radiance + throughput * background.color(&ray);
        };

        radiance += throughput * rec.material.emitted();

        match rec.material.scatter(&ray, &rec, rng) {
            Some(result) => {
                throughput *= result.attenuation;
                ray = result.scattered;
            }
            None => return radiance,
        }
    }

    // Out of bounces: no more light is gathered
    radiance
}
