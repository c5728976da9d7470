//! Core recursive ray tracer.
//!
//! Implements:
//! - Recursive material scattering with a bounce budget
//! - Sky gradient background
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and 8-bit quantization

use crate::{Camera, Color, Hittable};
use glint_math::{Interval, Ray};
use rand::RngCore;

/// Lower `t` bound for secondary hits, avoiding shadow acne.
pub const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Channel range kept after gamma correction so `256 * v` stays below 256.
const INTENSITY: Interval = Interval::new(0.0, 0.999);

/// Compute the color seen by a ray.
///
/// Follows the path bounce by bounce, carrying the product of attenuations,
/// so the stack stays flat whatever `depth` is. Returns black once `depth`
/// bounces are used up or when a material absorbs the ray.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    let mut ray = *ray;
    let mut throughput = Color::ONE;

    for _ in 0..depth {
        let Some(rec) = world.hit(&ray, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) else {
            return throughput * sky_gradient(&ray);
        };

        let Some(result) = rec.material.scatter(&ray, &rec, rng) else {
            return Color::ZERO;
        };
        throughput *= result.attenuation;
        ray = result.scattered;
    }

    Color::ZERO
}

/// Vertical white-to-blue gradient for rays that escape the scene.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one linear channel to a byte.
#[inline]
fn channel_to_byte(linear: f64) -> u8 {
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    [
        channel_to_byte(color.x),
        channel_to_byte(color.y),
        channel_to_byte(color.z),
    ]
}

/// Render a single pixel.
///
/// With anti-aliasing on, averages `samples_per_pixel` jittered samples;
/// otherwise shades the single ray through the pixel center.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    if !camera.antialiasing {
        let ray = camera.pixel_center_ray(x, y);
        return ray_color(&ray, world, camera.max_depth, rng);
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth, rng);
    }

    camera.samples_scale() * pixel_color
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HittableList, Lambertian, Material, Metal, Sphere};
    use glint_math::Vec3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    fn single_sphere_world(material: Arc<dyn Material>) -> HittableList {
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material)));
        world
    }

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    #[test]
    fn test_sky_gradient() {
        let up_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        let down_color = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0)));
        let level = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::X));

        assert!((up_color - Color::new(0.5, 0.7, 1.0)).length() < 1e-12);
        assert!((down_color - Color::ONE).length() < 1e-12);
        assert!((level - Color::new(0.75, 0.85, 1.0)).length() < 1e-12);
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = single_sphere_world(grey());
        let mut rng = StdRng::seed_from_u64(42);

        let rays = [
            Ray::new(Vec3::ZERO, Vec3::NEG_Z),
            Ray::new(Vec3::ZERO, Vec3::Y),
            Ray::new(Vec3::new(5.0, 5.0, 5.0), Vec3::new(-1.0, 0.2, 0.0)),
        ];
        for ray in rays {
            assert_eq!(ray_color(&ray, &world, 0, &mut rng), Color::ZERO);
            assert_eq!(ray_color(&ray, &HittableList::new(), 0, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_miss_returns_sky() {
        let world = single_sphere_world(grey());
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 1.0));

        assert_eq!(ray_color(&ray, &world, 10, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_single_bounce_diffuse_is_black() {
        // One bounce of budget: the scattered ray hits the depth limit
        let world = single_sphere_world(grey());
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        assert_eq!(ray_color(&ray, &world, 1, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_mirror_tints_reflected_sky() {
        let tint = Color::new(0.8, 0.6, 0.2);
        let world = single_sphere_world(Arc::new(Metal::new(tint, 0.0)));
        let mut rng = StdRng::seed_from_u64(42);

        // Head-on mirror reflection sends the ray straight back to +z
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let reflected_sky = sky_gradient(&Ray::new(Vec3::ZERO, Vec3::Z));
        let color = ray_color(&ray, &world, 5, &mut rng);
        assert!((color - tint * reflected_sky).length() < 1e-12);
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        struct Absorber;
        impl Material for Absorber {
            fn scatter(
                &self,
                _ray_in: &Ray,
                _rec: &crate::HitRecord,
                _rng: &mut dyn RngCore,
            ) -> Option<crate::ScatterResult> {
                None
            }
        }

        let world = single_sphere_world(Arc::new(Absorber));
        let mut rng = StdRng::seed_from_u64(42);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert_eq!(ray_color(&ray, &world, 50, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_deep_paths_inside_closed_sphere_are_black() {
        // No ray can escape, so every path spends its whole budget
        let mut world = HittableList::new();
        world.add(Arc::new(Sphere::new(Vec3::ZERO, 5.0, grey())));
        let mut rng = StdRng::seed_from_u64(42);

        for depth in [20_000, 200_000] {
            let ray = Ray::new(Vec3::ZERO, Vec3::new(0.3, -0.2, -1.0));
            assert_eq!(ray_color(&ray, &world, depth, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-0.5), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 1e-12);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_tone_map_boundaries() {
        assert_eq!(color_to_rgb(Color::ONE), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::ZERO), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::splat(4.0)), [255, 255, 255]);
        assert_eq!(color_to_rgb(Color::splat(-1.0)), [0, 0, 0]);
        assert_eq!(color_to_rgb(Color::new(0.25, 0.0, 1.0)), [128, 0, 255]);
    }

    #[test]
    fn test_antialiasing_converges_to_center_sky() {
        // Empty scene: every sample is sky
        let world = HittableList::new();
        let mut camera = Camera::new()
            .with_resolution(16, 9)
            .with_quality(2000, 10)
            .with_lens(30.0, 1.0);
        camera.update_viewport();
        let mut rng = StdRng::seed_from_u64(42);

        let expected = ray_color(&camera.pixel_center_ray(4, 2), &world, 10, &mut rng);
        let averaged = render_pixel(&camera, &world, 4, 2, &mut rng);
        assert!((averaged - expected).length() < 1e-3, "{averaged:?} vs {expected:?}");
    }

    #[test]
    fn test_without_antialiasing_uses_center_ray() {
        let world = HittableList::new();
        let mut camera = Camera::new()
            .with_resolution(8, 8)
            .with_antialiasing(false);
        camera.update_viewport();
        let mut rng = StdRng::seed_from_u64(42);

        let color = render_pixel(&camera, &world, 1, 6, &mut rng);
        assert_eq!(color, sky_gradient(&camera.pixel_center_ray(1, 6)));
    }

    #[test]
    fn test_single_sphere_scenario() {
        let world = single_sphere_world(grey());
        let mut camera = Camera::new()
            .with_resolution(101, 101)
            .with_quality(1, 5)
            .with_antialiasing(false)
            .with_lens(90.0, 1.0);
        camera.update_viewport();

        let range = Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY);
        let center = camera.pixel_center_ray(50, 50);
        assert!(world.hit(&center, range).is_some());

        // The corner is about 54 degrees off axis; the sphere subtends 30
        let corner = camera.pixel_center_ray(0, 0);
        assert!(world.hit(&corner, range).is_none());
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            render_pixel(&camera, &world, 0, 0, &mut rng),
            sky_gradient(&corner)
        );
    }
}
