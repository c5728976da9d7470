//! Glint Renderer - multithreaded CPU ray tracing
//!
//! A recursive Monte Carlo ray tracer for scenes of spheres with diffuse,
//! metallic and glass materials. Frames are split into row bands and
//! rendered on a persistent worker pool, either once to a PPM image or
//! continuously into a buffer for a live display.

mod camera;
mod error;
mod frame;
mod hittable;
mod input;
mod material;
mod output;
mod renderer;
mod session;
mod settings;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, RenderResult};
pub use frame::{partition_bands, render_band, Band, FrameBuffer, FrameRenderer, CHANNELS};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use input::{FrameInput, MovementKeys};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use output::{write_ppm, PpmSink};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render_pixel, sky_gradient, SHADOW_ACNE_EPSILON,
};
pub use session::{DisplayDriver, RenderMode, Session, SessionStats};
pub use settings::RenderSettings;
pub use sphere::Sphere;

/// Re-export common math types from glint_math
pub use glint_math::{Color, Interval, Point3, Ray, Vec3};
