//! Camera for ray generation.
//!
//! The camera is a fly-through camera: a position plus horizontal (yaw) and
//! vertical (pitch) rotation angles. Its viewport is derived from those on
//! every [`Camera::update_viewport`] call, which must happen after input is
//! applied and before the first ray of a frame is generated.

use std::f64::consts::FRAC_PI_2;

use glint_math::{gen_f64, Point3, Ray, Vec3};
use rand::RngCore;

use crate::{FrameInput, RenderSettings};

/// Pitch stays this far away from straight up or down so the basis never
/// degenerates.
const PITCH_LIMIT: f64 = FRAC_PI_2 - 1e-3;

/// Camera for generating rays into the scene.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    pub image_width: u32,
    pub image_height: u32,
    pub samples_per_pixel: u32,
    pub max_depth: u32,
    pub antialiasing: bool,

    // Pose
    pub position: Point3,
    yaw: f64,
    pitch: f64,

    // Lens settings
    vfov: f64,         // Vertical field of view in degrees
    focal_length: f64, // Distance from the camera to the viewport plane

    // Controls
    pub look_enabled: bool,
    sensitivity: f64,
    move_speed: f64,

    // Cached computed values (set by update_viewport())
    direction: Vec3,
    right: Vec3,
    up: Vec3,
    viewport_width: f64,
    viewport_height: f64,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    samples_scale: f64,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        let mut camera = Self {
            image_width: 400,
            image_height: 225,
            samples_per_pixel: 100,
            max_depth: 50,
            antialiasing: true,
            position: Point3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            vfov: 45.0,
            focal_length: 1.0,
            look_enabled: false,
            sensitivity: 1.0,
            move_speed: 3.0,
            direction: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
            viewport_width: 0.0,
            viewport_height: 0.0,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            samples_scale: 0.01,
        };
        camera.update_viewport();
        camera
    }

    /// Build a camera from render settings, with its viewport computed.
    pub fn from_settings(settings: &RenderSettings) -> Self {
        let [x, y, z] = settings.camera_position;
        let [yaw, pitch] = settings.camera_rotation;
        let mut camera = Self::new()
            .with_resolution(settings.image_width, settings.image_height())
            .with_quality(settings.samples_per_pixel, settings.max_depth)
            .with_antialiasing(settings.antialiasing)
            .with_position(Point3::new(x, y, z))
            .with_rotation(yaw, pitch)
            .with_lens(settings.vfov, settings.focal_length)
            .with_controls(settings.sensitivity, settings.move_speed);
        camera.look_enabled = settings.look_enabled;
        camera.update_viewport();
        camera
    }

    /// Set image resolution.
    pub fn with_resolution(mut self, width: u32, height: u32) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    pub fn with_antialiasing(mut self, enabled: bool) -> Self {
        self.antialiasing = enabled;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, position: Point3) -> Self {
        self.position = position;
        self
    }

    /// Set horizontal and vertical rotation in radians.
    pub fn with_rotation(mut self, yaw: f64, pitch: f64) -> Self {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, focal_length: f64) -> Self {
        self.vfov = vfov;
        self.focal_length = focal_length;
        self
    }

    /// Set look sensitivity and movement speed.
    pub fn with_controls(mut self, sensitivity: f64, move_speed: f64) -> Self {
        self.sensitivity = sensitivity;
        self.move_speed = move_speed;
        self
    }

    /// Recompute the basis and pixel grid from the current pose.
    pub fn update_viewport(&mut self) {
        self.samples_scale = 1.0 / f64::from(self.samples_per_pixel.max(1));

        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.direction = -Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch).normalize();

        // Gram-Schmidt against world up
        self.right = self.direction.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.direction);

        let h = (self.vfov.to_radians() / 2.0).tan();
        self.viewport_height = 2.0 * h * self.focal_length;
        self.viewport_width =
            self.viewport_height * (f64::from(self.image_width) / f64::from(self.image_height));

        let viewport_u = self.viewport_width * self.right;
        let viewport_v = -self.viewport_height * self.up;

        self.pixel_delta_u = viewport_u / f64::from(self.image_width);
        self.pixel_delta_v = viewport_v / f64::from(self.image_height);

        let viewport_upper_left =
            self.position + self.focal_length * self.direction - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Apply one frame of movement and look input.
    ///
    /// Returns true when the pose changed. The viewport is not recomputed;
    /// call [`Camera::update_viewport`] before rendering.
    pub fn apply_input(&mut self, input: &FrameInput) -> bool {
        if input.toggle_look {
            self.look_enabled = !self.look_enabled;
            log::debug!("Camera look {}", if self.look_enabled { "enabled" } else { "disabled" });
        }

        let step = self.move_speed * input.delta_time;
        let translation =
            (input.forward * self.direction + input.right * self.right + input.up * Vec3::Y) * step;
        self.position += translation;
        let mut changed = translation != Vec3::ZERO;

        if self.look_enabled {
            let turn = self.sensitivity * input.delta_time;
            let yaw = self.yaw - input.look_horizontal * turn;
            let pitch = (self.pitch + input.look_vertical * turn).clamp(-PITCH_LIMIT, PITCH_LIMIT);
            changed |= yaw != self.yaw || pitch != self.pitch;
            self.yaw = yaw;
            self.pitch = pitch;
        }

        changed
    }

    /// Ray through the exact center of pixel (i, j).
    pub fn pixel_center_ray(&self, i: u32, j: u32) -> Ray {
        self.ray_through(f64::from(i), f64::from(j))
    }

    /// Ray through a uniformly jittered point of pixel (i, j).
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let (du, dv) = sample_square(rng);
        self.ray_through(f64::from(i) + du, f64::from(j) + dv)
    }

    fn ray_through(&self, u: f64, v: f64) -> Ray {
        let pixel_sample = self.pixel00_loc + u * self.pixel_delta_u + v * self.pixel_delta_v;
        Ray::new(self.position, pixel_sample - self.position)
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }

    /// Unit look direction.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Viewport `(width, height)` in world units.
    pub fn viewport_size(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn pixel00_loc(&self) -> Point3 {
        self.pixel00_loc
    }

    pub fn pixel_deltas(&self) -> (Vec3, Vec3) {
        (self.pixel_delta_u, self.pixel_delta_v)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Random offset in the square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> (f64, f64) {
    (gen_f64(rng) - 0.5, gen_f64(rng) - 0.5)
}
