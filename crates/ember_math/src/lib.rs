//! Ember math - vectors, rays and intervals shared by the renderer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{near_zero, reflect, refract, NEAR_ZERO_EPSILON};
