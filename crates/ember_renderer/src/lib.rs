//! Ember renderer - CPU path tracing
//!
//! A Monte Carlo path tracer over a linear list of spheres, rendered by a
//! pool of workers that each claim whole scanlines.

mod buffer;
mod camera;
mod encode;
mod error;
mod hittable;
mod integrator;
mod material;
mod ppm;
pub mod random;
mod scheduler;
mod sphere;

pub use buffer::PixelBuffer;
pub use camera::{Camera, CameraConfig, MAX_PIXELS};
pub use encode::{encode_pixel, linear_to_gamma, quantize};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::{trace, Background, SHADOW_ACNE_EPSILON};
pub use material::{Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterResult};
pub use ppm::{save_ppm, write_ppm};
pub use scheduler::{render, render_row, resolve_thread_count, sample_pixel, RenderConfig};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from ember_math
pub use ember_math::{Interval, Ray, Vec3};
