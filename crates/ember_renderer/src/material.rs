//! Surface scattering model.
//!
//! The set of materials is closed: [`Material`] is an enum over the four
//! kinds below, and geometry shares them through `Arc<Material>`.

use crate::hittable::HitRecord;
use crate::random::{gen_f32, random_in_unit_sphere, random_unit_vector};
use ember_math::{near_zero, reflect, refract, Ray, Vec3};
use rand::RngCore;

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// Outcome of a scattering event.
#[derive(Debug, Clone, Copy)]
pub struct ScatterResult {
    /// Per-channel fraction of the incoming light that survives the bounce
    pub attenuation: Color,
    /// Continuation ray leaving the hit point
    pub scattered: Ray,
}

/// Lambertian (diffuse) material.
#[derive(Debug, Clone, Copy)]
pub struct Lambertian {
    albedo: Color,
}

impl Lambertian {
    /// Create a new Lambertian material with the given albedo color.
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    fn scatter(&self, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let mut scatter_direction = rec.normal + random_unit_vector(rng);

        // Catch degenerate scatter direction
        if near_zero(scatter_direction) {
            scatter_direction = rec.normal;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scatter_direction),
        })
    }
}

/// Metal (specular) material.
#[derive(Debug, Clone, Copy)]
pub struct Metal {
    albedo: Color,
    fuzz: f32,
}

impl Metal {
    /// Create a new Metal material.
    ///
    /// - `albedo`: The color of the metal
    /// - `fuzz`: Roughness, 0.0 = perfect mirror, 1.0 = very rough
    pub fn new(albedo: Color, fuzz: f32) -> Self {
        if !(0.0..=1.0).contains(&fuzz) {
            log::warn!("Metal fuzz {} outside [0, 1], clamping", fuzz);
        }
        Self {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    pub fn albedo(&self) -> Color {
        self.albedo
    }

    pub fn fuzz(&self) -> f32 {
        self.fuzz
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let reflected = reflect(ray_in.direction().normalize(), rec.normal);
        let scattered_dir = reflected + self.fuzz * random_in_unit_sphere(rng);

        // Fuzz pushed the ray below the surface: absorbed
        if scattered_dir.dot(rec.normal) <= 0.0 {
            return None;
        }

        Some(ScatterResult {
            attenuation: self.albedo,
            scattered: Ray::new(rec.p, scattered_dir),
        })
    }
}

/// Dielectric (glass) material.
#[derive(Debug, Clone, Copy)]
pub struct Dielectric {
    /// Index of refraction
    ior: f32,
}

impl Dielectric {
    /// Create a new Dielectric material.
    ///
    /// - `ior`: Index of refraction (1.0 = air, 1.5 = glass, 2.4 = diamond)
    pub fn new(ior: f32) -> Self {
        Self { ior }
    }

    pub fn ior(&self) -> f32 {
        self.ior
    }

    /// Schlick's approximation for reflectance
    pub fn reflectance(cosine: f32, ior: f32) -> f32 {
        let r0 = ((1.0 - ior) / (1.0 + ior)).powi(2);
        r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
    }

    fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        let refraction_ratio = if rec.front_face { 1.0 / self.ior } else { self.ior };

        let unit_direction = ray_in.direction().normalize();
        let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
        let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

        // Total internal reflection
        let cannot_refract = refraction_ratio * sin_theta > 1.0;

        let direction = if cannot_refract
            || Self::reflectance(cos_theta, refraction_ratio) > gen_f32(rng)
        {
            reflect(unit_direction, rec.normal)
        } else {
            refract(unit_direction, rec.normal, refraction_ratio)
        };

        Some(ScatterResult {
            attenuation: Color::ONE,
            scattered: Ray::new(rec.p, direction),
        })
    }
}

/// Diffuse light emitter.
#[derive(Debug, Clone, Copy)]
pub struct DiffuseLight {
    emit: Color,
}

impl DiffuseLight {
    /// Create a new diffuse light with the given emission color.
    pub fn new(emit: Color) -> Self {
        Self { emit }
    }
}

/// A surface material.
#[derive(Debug, Clone, Copy)]
pub enum Material {
    Lambertian(Lambertian),
    Metal(Metal),
    Dielectric(Dielectric),
    DiffuseLight(DiffuseLight),
}

impl Material {
    /// Scatter an incoming ray.
    ///
    /// Returns the attenuation and continuation ray, or `None` if the path
    /// ends at this surface (absorbed, or a light).
    pub fn scatter(&self, ray_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<ScatterResult> {
        match self {
            Material::Lambertian(m) => m.scatter(rec, rng),
            Material::Metal(m) => m.scatter(ray_in, rec, rng),
            Material::Dielectric(m) => m.scatter(ray_in, rec, rng),
            Material::DiffuseLight(_) => None,
        }
    }

    /// Light emitted by the surface. Black for everything but lights.
    pub fn emitted(&self) -> Color {
        match self {
            Material::DiffuseLight(light) => light.emit,
            _ => Color::ZERO,
        }
    }
}

impl From<Lambertian> for Material {
    fn from(m: Lambertian) -> Self {
        Material::Lambertian(m)
    }
}

impl From<Metal> for Material {
    fn from(m: Metal) -> Self {
        Material::Metal(m)
    }
}

impl From<Dielectric> for Material {
    fn from(m: Dielectric) -> Self {
        Material::Dielectric(m)
    }
}

impl From<DiffuseLight> for Material {
    fn from(m: DiffuseLight) -> Self {
        Material::DiffuseLight(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Replays a fixed list of `next_u32` values, cycling.
    struct Sequence {
        values: Vec<u32>,
        next: usize,
    }

    impl Sequence {
        fn new(values: &[u32]) -> Self {
            Self {
                values: values.to_vec(),
                next: 0,
            }
        }
    }

    impl RngCore for Sequence {
        fn next_u32(&mut self) -> u32 {
            let value = self.values[self.next % self.values.len()];
            self.next += 1;
            value
        }

        fn next_u64(&mut self) -> u64 {
            let lo = self.next_u32() as u64;
            (self.next_u32() as u64) << 32 | lo
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(4) {
                let bytes = self.next_u32().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    fn record(material: &Material, normal: Vec3, front_face: bool) -> HitRecord<'_> {
        HitRecord {
            p: Vec3::ZERO,
            normal,
            t: 1.0,
            front_face,
            material,
        }
    }

    #[test]
    fn test_lambertian_always_scatters_above_surface() {
        let mat = Material::from(Lambertian::new(Color::new(0.8, 0.3, 0.1)));
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..500 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("lambertian scatters");
            assert_eq!(result.attenuation, Color::new(0.8, 0.3, 0.1));
            assert_eq!(result.scattered.origin(), rec.p);
            assert!(result.scattered.direction().dot(Vec3::Y) >= 0.0);
            assert!(!near_zero(result.scattered.direction()));
        }
    }

    #[test]
    fn test_lambertian_falls_back_to_normal() {
        // f32 draws of 0.5, 0.25, 0.5 give the unit-sphere sample (0, -0.5, 0),
        // so the random unit vector is exactly -normal.
        let mut rng = Sequence::new(&[0x8000_0000, 0x4000_0000, 0x8000_0000]);
        assert_eq!(random_unit_vector(&mut rng), Vec3::NEG_Y);

        let mat = Material::from(Lambertian::new(Color::splat(0.5)));
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = Sequence::new(&[0x8000_0000, 0x4000_0000, 0x8000_0000]);

        let result = mat.scatter(&ray, &rec, &mut rng).expect("lambertian scatters");
        assert_eq!(result.scattered.direction(), rec.normal);
        assert_eq!(result.attenuation, Color::splat(0.5));
    }

    #[test]
    fn test_mirror_metal_reflects_exactly() {
        let mat = Material::from(Metal::new(Color::ONE, 0.0));
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(2);

        let result = mat.scatter(&ray, &rec, &mut rng).expect("mirror reflects");
        let expected = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((result.scattered.direction() - expected).length() < 1e-6);
    }

    #[test]
    fn test_metal_absorbs_rays_pushed_into_surface() {
        // Fuzz 1.0 at grazing incidence sends a good share of rays below the surface.
        let mat = Material::from(Metal::new(Color::ONE, 1.0));
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, -0.01, 0.0));
        let mut rng = StdRng::seed_from_u64(3);

        let mut absorbed = 0;
        for _ in 0..1000 {
            match mat.scatter(&ray, &rec, &mut rng) {
                Some(result) => assert!(result.scattered.direction().dot(rec.normal) > 0.0),
                None => absorbed += 1,
            }
        }
        assert!(absorbed > 0);
    }

    #[test]
    fn test_metal_fuzz_is_clamped() {
        assert_eq!(Metal::new(Color::ONE, 3.0).fuzz(), 1.0);
        assert_eq!(Metal::new(Color::ONE, -1.0).fuzz(), 0.0);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        // Leaving glass at 60 degrees: 1.5 * sin(60) > 1, must reflect.
        let mat = Material::from(Dielectric::new(1.5));
        let rec = record(&mat, Vec3::NEG_Y, false);
        let theta = 60f32.to_radians();
        let dir = Vec3::new(theta.sin(), theta.cos(), 0.0);
        let ray = Ray::new(Vec3::ZERO, dir);
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..100 {
            let result = mat.scatter(&ray, &rec, &mut rng).expect("dielectric scatters");
            assert_eq!(result.attenuation, Color::ONE);
            assert!(result.scattered.direction().y < 0.0);
        }
    }

    #[test]
    fn test_dielectric_head_on_mostly_refracts() {
        let mat = Material::from(Dielectric::new(1.5));
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(5);

        let refracted = (0..1000)
            .filter_map(|_| mat.scatter(&ray, &rec, &mut rng))
            .filter(|r| r.scattered.direction().y < 0.0)
            .count();
        // Schlick gives ~4% reflectance at normal incidence.
        assert!(refracted > 900);
    }

    #[test]
    fn test_schlick_reflectance() {
        assert!((Dielectric::reflectance(1.0, 1.5) - 0.04).abs() < 1e-6);
        assert!((Dielectric::reflectance(0.0, 1.5) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_diffuse_light_emits_and_never_scatters() {
        let mat = Material::from(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));
        let rec = record(&mat, Vec3::Y, true);
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y);
        let mut rng = StdRng::seed_from_u64(6);

        assert!(mat.scatter(&ray, &rec, &mut rng).is_none());
        assert_eq!(mat.emitted(), Color::new(4.0, 4.0, 4.0));
        assert_eq!(Material::from(Lambertian::new(Color::ONE)).emitted(), Color::ZERO);
    }
}
