//! Simple path tracer example.
//!
//! Renders a small scene with spheres and saves to PPM format.

use ember_renderer::{
    render, save_ppm, Camera, CameraConfig, Color, Dielectric, DiffuseLight, HittableList,
    Lambertian, Material, Metal, RenderConfig, Sphere, Vec3,
};
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let world = build_scene();

    let camera = Camera::new(
        CameraConfig::default()
            .with_resolution(400, 16.0 / 9.0)
            .with_quality(32, 10)
            .with_position(
                Vec3::new(13.0, 2.0, 3.0), // lookfrom
                Vec3::new(0.0, 0.0, 0.0),  // lookat
                Vec3::new(0.0, 1.0, 0.0),  // vup
            )
            .with_lens(20.0, 0.6, 10.0),
    )?;

    let image = render(&camera, &world, &RenderConfig::default().with_seed(7))?;
    save_ppm(&image, "output.ppm")?;
    Ok(())
}

fn build_scene() -> HittableList {
    let ground: Arc<Material> = Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5)).into());
    let glass: Arc<Material> = Arc::new(Dielectric::new(1.5).into());
    let lamp: Arc<Material> = Arc::new(DiffuseLight::new(Color::new(4.0, 3.5, 3.0)).into());

    let mut world = HittableList::new();
    world.add(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground));

    // Three main spheres
    world.add(Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0, Arc::clone(&glass)));
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

    // A second glass ball sharing the material, and a lamp overhead
    world.add(Sphere::new(Vec3::new(2.0, 0.4, 2.0), 0.4, glass));
    world.add(Sphere::new(Vec3::new(0.0, 4.0, 0.0), 0.5, lamp));

    world
}
