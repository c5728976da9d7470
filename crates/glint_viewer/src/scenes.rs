//! Built-in demo scenes.

use std::sync::Arc;

use clap::ValueEnum;
use glint_renderer::{Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, Sphere};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// One diffuse sphere resting on a huge ground sphere
    Basic,
    /// Diffuse, glass and fuzzed metal spheres on a shared ground
    Materials,
}

pub fn build(kind: SceneKind) -> HittableList {
    match kind {
        SceneKind::Basic => basic(),
        SceneKind::Materials => materials(),
    }
}

fn basic() -> HittableList {
    let grey: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, grey.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, grey)));
    world
}

fn materials() -> HittableList {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let diffuse: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let gold: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, ground)));
    world.add(Arc::new(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, diffuse.clone())));
    world.add(Arc::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, glass)));
    // Air bubble inside the glass ball makes it a hollow shell
    world.add(Arc::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.4, bubble)));
    world.add(Arc::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, gold.clone())));

    // Small spheres behind reuse the same material instances
    world.add(Arc::new(Sphere::new(Point3::new(-0.5, -0.35, -2.2), 0.15, gold)));
    world.add(Arc::new(Sphere::new(Point3::new(0.5, -0.35, -2.2), 0.15, diffuse)));
    world
}
