//! Simple ray tracer example.
//!
//! Renders a field of random spheres and saves it in PPM format.

use glint_renderer::{
    Color, Dielectric, HittableList, Lambertian, Material, Metal, PpmSink, RenderMode,
    RenderSettings, Session, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Glint Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    // Pulled back and raised, looking slightly down at the field
    let settings = RenderSettings {
        image_width: 800,
        samples_per_pixel: 50,
        max_depth: 10,
        vfov: 40.0,
        camera_position: [0.0, 1.5, 6.0],
        camera_rotation: [0.0, -0.15],
        seed: Some(42),
        ..Default::default()
    };

    println!(
        "Rendering {}x{} @ {} spp...",
        settings.image_width,
        settings.image_height(),
        settings.samples_per_pixel
    );

    let mut session = Session::new(&settings, world, RenderMode::Static)?;
    let filename = "output.ppm";
    let mut sink = PpmSink::new(BufWriter::new(File::create(filename)?));
    let stats = session.run(&mut sink)?;

    println!("Rendered in {:?}", stats.elapsed);
    println!("Saved to {}", filename);
    Ok(())
}

fn build_scene() -> HittableList {
    let mut world = HittableList::new();
    let mut rng = StdRng::seed_from_u64(42);

    // Ground
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));

    // Three main spheres
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-2.2, 1.0, -0.5),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(2.2, 1.0, -0.5),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    // Small random spheres share one glass instance
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    for a in -5..5 {
        for b in -5..5 {
            let center = Vec3::new(
                a as f64 + 0.9 * rng.gen::<f64>(),
                0.2,
                b as f64 + 0.9 * rng.gen::<f64>(),
            );

            if (center - Vec3::new(0.0, 0.2, 0.0)).length() <= 1.2 {
                continue;
            }

            let choose_mat: f64 = rng.gen();
            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = Color::new(
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                    rng.gen::<f64>() * rng.gen::<f64>(),
                );
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = Color::new(
                    0.5 + 0.5 * rng.gen::<f64>(),
                    0.5 + 0.5 * rng.gen::<f64>(),
                    0.5 + 0.5 * rng.gen::<f64>(),
                );
                Arc::new(Metal::new(albedo, 0.5 * rng.gen::<f64>()))
            } else {
                glass.clone()
            };
            world.add(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    println!("Created {} objects", world.len());
    world
}
