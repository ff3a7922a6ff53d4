//! Scene construction: the random sphere field and JSON scene files.

use ember_renderer::random::gen_f32;
use ember_renderer::{
    CameraConfig, Color, Dielectric, DiffuseLight, HittableList, Lambertian, Material, Metal,
    Sphere, Vec3,
};
use rand::RngCore;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while loading a scene file.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Sphere {sphere} references material {material}, but only {count} are defined")]
    UnknownMaterial {
        sphere: usize,
        material: usize,
        count: usize,
    },

    #[error("Sphere {sphere} has radius {radius}; radius must be positive")]
    InvalidRadius { sphere: usize, radius: f32 },
}

/// Camera for the random sphere field.
pub fn cover_camera(base: CameraConfig) -> CameraConfig {
    base.with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.05, 10.0)
}

/// Ground plane, a 22x22 grid of small random spheres and three large ones.
pub fn random_scene(rng: &mut dyn RngCore) -> HittableList {
    let mut world = HittableList::new();

    let ground = Arc::new(Material::from(Lambertian::new(Color::new(0.5, 0.5, 0.5))));
    world.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    // Every glass ball shares one material
    let glass = Arc::new(Material::from(Dielectric::new(1.5)));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = gen_f32(rng);
            let center = Vec3::new(
                a as f32 + 0.9 * gen_f32(rng),
                0.2,
                b as f32 + 0.9 * gen_f32(rng),
            );

            // Keep clear of the metal feature sphere
            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material = if choose_mat < 0.65 {
                let albedo = random_color(rng) * random_color(rng);
                Arc::new(Lambertian::new(albedo).into())
            } else if choose_mat < 0.85 {
                let albedo = 0.5 * (Color::ONE + random_color(rng));
                let fuzz = 0.5 * gen_f32(rng);
                Arc::new(Metal::new(albedo, fuzz).into())
            } else {
                Arc::clone(&glass)
            };

            world.add(Sphere::new(center, 0.2, material));
        }
    }

    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, glass));
    world.add(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1)).into()),
    ));
    world.add(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0).into()),
    ));

    world
}

fn random_color(rng: &mut dyn RngCore) -> Color {
    Color::new(gen_f32(rng), gen_f32(rng), gen_f32(rng))
}

/// On-disk scene description.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneFile {
    #[serde(default)]
    pub camera: CameraOverrides,
    pub materials: Vec<MaterialDesc>,
    pub spheres: Vec<SphereDesc>,
}

/// Camera placement and lens settings a scene file may override.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraOverrides {
    pub lookfrom: Option<[f32; 3]>,
    pub lookat: Option<[f32; 3]>,
    pub vup: Option<[f32; 3]>,
    pub vfov: Option<f32>,
    pub defocus_angle: Option<f32>,
    pub focus_dist: Option<f32>,
}

impl CameraOverrides {
    fn apply(&self, mut config: CameraConfig) -> CameraConfig {
        if let Some(p) = self.lookfrom {
            config.lookfrom = Vec3::from(p);
        }
        if let Some(p) = self.lookat {
            config.lookat = Vec3::from(p);
        }
        if let Some(v) = self.vup {
            config.vup = Vec3::from(v);
        }
        if let Some(vfov) = self.vfov {
            config.vfov = vfov;
        }
        if let Some(angle) = self.defocus_angle {
            config.defocus_angle = angle;
        }
        if let Some(dist) = self.focus_dist {
            config.focus_dist = dist;
        }
        config
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    Lambertian { albedo: [f32; 3] },
    Metal { albedo: [f32; 3], fuzz: f32 },
    Dielectric { ior: f32 },
    DiffuseLight { emit: [f32; 3] },
}

impl From<MaterialDesc> for Material {
    fn from(desc: MaterialDesc) -> Self {
        match desc {
            MaterialDesc::Lambertian { albedo } => Lambertian::new(albedo.into()).into(),
            MaterialDesc::Metal { albedo, fuzz } => Metal::new(albedo.into(), fuzz).into(),
            MaterialDesc::Dielectric { ior } => Dielectric::new(ior).into(),
            MaterialDesc::DiffuseLight { emit } => DiffuseLight::new(emit.into()).into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDesc {
    pub center: [f32; 3],
    pub radius: f32,
    /// Index into the scene's material table
    pub material: usize,
}

impl SceneFile {
    /// Build the world and apply camera overrides on top of `base`.
    pub fn build(&self, base: CameraConfig) -> Result<(HittableList, CameraConfig), SceneError> {
        let materials: Vec<Arc<Material>> = self
            .materials
            .iter()
            .map(|&desc| Arc::new(Material::from(desc)))
            .collect();

        let mut world = HittableList::new();
        for (i, sphere) in self.spheres.iter().enumerate() {
            let material = materials
                .get(sphere.material)
                .ok_or(SceneError::UnknownMaterial {
                    sphere: i,
                    material: sphere.material,
                    count: materials.len(),
                })?;
            if !(sphere.radius.is_finite() && sphere.radius > 0.0) {
                return Err(SceneError::InvalidRadius {
                    sphere: i,
                    radius: sphere.radius,
                });
            }
            world.add(Sphere::new(sphere.center.into(), sphere.radius, Arc::clone(material)));
        }

        Ok((world, self.camera.apply(base)))
    }
}

/// Parse a JSON scene description.
pub fn parse_scene(json: &str, base: CameraConfig) -> Result<(HittableList, CameraConfig), SceneError> {
    let file: SceneFile = serde_json::from_str(json)?;
    log::debug!(
        "Scene file: {} materials, {} spheres",
        file.materials.len(),
        file.spheres.len()
    );
    file.build(base)
}

/// Load a JSON scene description from disk.
pub fn load_scene(path: &Path, base: CameraConfig) -> Result<(HittableList, CameraConfig), SceneError> {
    let json = std::fs::read_to_string(path)?;
    parse_scene(&json, base)
}
