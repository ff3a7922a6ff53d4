//! Camera for ray generation.
//!
//! [`CameraConfig`] holds the user-facing options; [`Camera::new`] validates
//! them and derives the viewport once, before any rays are generated.

use crate::error::{RenderError, RenderResult};
use crate::random::{gen_f32, random_in_unit_disk};
use ember_math::{Ray, Vec3};
use rand::RngCore;

/// Largest image, in pixels, a render will allocate.
pub const MAX_PIXELS: u64 = u32::MAX as u64;

/// Camera options. Immutable for the duration of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    // Image settings
    pub aspect_ratio: f64,
    pub image_width: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,

    // Camera positioning
    pub lookfrom: Vec3,
    pub lookat: Vec3,
    pub vup: Vec3,

    // Lens settings
    pub vfov: f32,          // Vertical field of view in degrees
    pub defocus_angle: f32, // Variation angle of rays through each pixel, 0 disables
    pub focus_dist: f32,    // Distance from camera to plane of perfect focus
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            aspect_ratio: 16.0 / 9.0,
            image_width: 800,
            samples_per_pixel: 100,
            max_depth: 50,
            lookfrom: Vec3::new(13.0, 2.0, 3.0),
            lookat: Vec3::ZERO,
            vup: Vec3::Y,
            vfov: 40.0,
            defocus_angle: 0.0,
            focus_dist: 10.0,
        }
    }
}

impl CameraConfig {
    /// Set image width and aspect ratio (height is derived).
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Vec3, lookat: Vec3, vup: Vec3) -> Self {
        self.lookfrom = lookfrom;
        self.lookat = lookat;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f32, defocus_angle: f32, focus_dist: f32) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Image height for the configured width and aspect ratio, at least 1.
    pub fn image_height(&self) -> u32 {
        ((self.image_width as f64 / self.aspect_ratio) as u32).max(1)
    }

    fn validate(&self) -> RenderResult<()> {
        if self.image_width == 0 {
            return Err(RenderError::InvalidConfig("image_width must be at least 1".into()));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::InvalidConfig(
                "samples_per_pixel must be at least 1".into(),
            ));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::DegenerateCamera("aspect ratio must be positive and finite"));
        }
        let height = (self.image_width as f64 / self.aspect_ratio).max(1.0);
        if !height.is_finite() || height * self.image_width as f64 > MAX_PIXELS as f64 {
            return Err(RenderError::InvalidConfig(format!(
                "{} px wide at aspect ratio {} exceeds {} pixels",
                self.image_width, self.aspect_ratio, MAX_PIXELS
            )));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(RenderError::DegenerateCamera(
                "vertical field of view must be between 0 and 180 degrees",
            ));
        }
        if !(self.focus_dist.is_finite() && self.focus_dist > 0.0) {
            return Err(RenderError::DegenerateCamera("focus distance must be positive and finite"));
        }
        if !self.defocus_angle.is_finite() {
            return Err(RenderError::DegenerateCamera("defocus angle must be finite"));
        }
        if !(self.lookfrom.is_finite() && self.lookat.is_finite() && self.vup.is_finite()) {
            return Err(RenderError::DegenerateCamera("camera vectors must be finite"));
        }
        Ok(())
    }
}

/// A validated camera with its derived viewport.
#[derive(Debug, Clone)]
pub struct Camera {
    config: CameraConfig,
    image_height: u32,

    center: Vec3,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    u: Vec3,
    v: Vec3,
    w: Vec3,
    defocus_disk_u: Vec3,
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Validate `config` and compute the viewport geometry.
    ///
    /// Fails on configurations whose basis would be undefined, such as
    /// `lookfrom == lookat` or `vup` parallel to the view direction.
    pub fn new(config: CameraConfig) -> RenderResult<Self> {
        config.validate()?;

        let image_width = config.image_width;
        let image_height = config.image_height();
        let center = config.lookfrom;

        // Calculate camera basis vectors
        let view = config.lookfrom - config.lookat;
        if view.length_squared() < 1e-12 {
            return Err(RenderError::DegenerateCamera("lookfrom and lookat coincide"));
        }
        let w = view.normalize();
        let side = config.vup.cross(w);
        if side.length_squared() < 1e-12 {
            return Err(RenderError::DegenerateCamera("vup is parallel to the view direction"));
        }
        let u = side.normalize();
        let v = w.cross(u);

        // Calculate viewport dimensions
        let theta = config.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * config.focus_dist;
        let viewport_width = viewport_height * (image_width as f32 / image_height as f32);

        // Calculate viewport vectors
        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        // Calculate pixel delta vectors
        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        // Calculate upper left pixel location
        let viewport_upper_left = center - config.focus_dist * w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = config.focus_dist * (config.defocus_angle / 2.0).to_radians().tan();
        let defocus_disk_u = u * defocus_radius;
        let defocus_disk_v = v * defocus_radius;

        log::debug!(
            "Camera {}x{}: vfov={} focus_dist={} defocus_radius={}",
            image_width,
            image_height,
            config.vfov,
            config.focus_dist,
            defocus_radius
        );

        Ok(Self {
            config,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            u,
            v,
            w,
            defocus_disk_u,
            defocus_disk_v,
        })
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn image_width(&self) -> u32 {
        self.config.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.config.samples_per_pixel
    }

    pub fn max_depth(&self) -> u32 {
        self.config.max_depth
    }

    /// Camera position in world space (same as lookfrom).
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Orthonormal camera frame (right, up, backward).
    pub fn basis(&self) -> (Vec3, Vec3, Vec3) {
        (self.u, self.v, self.w)
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f32) + offset.x) * self.pixel_delta_u
            + ((j as f32) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.config.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f32(rng) - 0.5, gen_f32(rng) - 0.5, 0.0)
}
