//! Render sessions: one camera, one scene, one frame renderer.
//!
//! A session runs in one of two modes. [`RenderMode::Static`] renders a
//! single frame with progress logging and hands it to the driver once.
//! [`RenderMode::Live`] keeps rendering into the same buffer, presenting
//! each frame and applying the driver's input before the next one, until
//! the driver asks to stop.

use std::time::{Duration, Instant};

use crate::error::RenderResult;
use crate::{Camera, FrameBuffer, FrameInput, FrameRenderer, HittableList, RenderSettings};

/// How a session produces frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Render one image and stop.
    #[default]
    Static,
    /// Render continuously, applying input between frames.
    Live,
}

/// Something that shows finished frames and supplies camera input.
///
/// Windowing and key polling live behind this trait, outside the renderer.
pub trait DisplayDriver {
    /// Present a finished frame.
    ///
    /// `frame_time` is how long the frame took to render. Returns the input
    /// to apply before the next frame, or `None` to end the session.
    fn present(&mut self, frame: &FrameBuffer, frame_time: Duration)
        -> RenderResult<Option<FrameInput>>;
}

/// Summary of a finished session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub frames: u64,
    pub elapsed: Duration,
}

impl SessionStats {
    /// Average frames per second over the whole session.
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.frames as f64 / secs
        } else {
            0.0
        }
    }
}

pub struct Session {
    mode: RenderMode,
    camera: Camera,
    world: HittableList,
    renderer: FrameRenderer,
    frame: FrameBuffer,
}

impl Session {
    /// Build a session from validated settings and a scene.
    pub fn new(settings: &RenderSettings, world: HittableList, mode: RenderMode) -> RenderResult<Self> {
        settings.validate()?;

        let seed = settings.seed.unwrap_or_else(rand::random);
        let camera = Camera::from_settings(settings);
        let renderer = FrameRenderer::new(settings.worker_count(), seed)?
            .with_progress(mode == RenderMode::Static);
        let frame = FrameBuffer::new(camera.image_width, camera.image_height);

        log::info!(
            "{:?} session: {}x{}, {} spp, depth {}, {} objects, {} workers, seed {}",
            mode,
            camera.image_width,
            camera.image_height,
            camera.samples_per_pixel,
            camera.max_depth,
            world.len(),
            renderer.workers(),
            seed
        );

        Ok(Self {
            mode,
            camera,
            world,
            renderer,
            frame,
        })
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// The most recently rendered frame.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Render a single frame with the current camera.
    pub fn render_once(&mut self) -> RenderResult<&FrameBuffer> {
        self.camera.update_viewport();
        self.renderer
            .render_frame(&self.camera, &self.world, &mut self.frame)?;
        Ok(&self.frame)
    }

    /// Drive the session until it finishes.
    ///
    /// Static sessions present exactly one frame. Live sessions loop until
    /// the driver returns `None`.
    pub fn run(&mut self, driver: &mut dyn DisplayDriver) -> RenderResult<SessionStats> {
        let session_start = Instant::now();
        let mut frames = 0u64;

        loop {
            let frame_start = Instant::now();
            self.render_once()?;
            let frame_time = frame_start.elapsed();
            frames += 1;

            let input = driver.present(&self.frame, frame_time)?;

            if self.mode == RenderMode::Static {
                break;
            }

            let fps = 1.0 / frame_time.as_secs_f64().max(f64::EPSILON);
            log::debug!("Frame {} took {:.2?} ({:.1} fps)", frames, frame_time, fps);

            let Some(input) = input else {
                break;
            };
            if self.camera.apply_input(&input) {
                log::trace!(
                    "Camera at {:?}, yaw {:.3}, pitch {:.3}",
                    self.camera.position,
                    self.camera.yaw(),
                    self.camera.pitch()
                );
            }
        }

        let stats = SessionStats {
            frames,
            elapsed: session_start.elapsed(),
        };
        if self.mode == RenderMode::Live {
            log::info!(
                "Live session ended after {} frames ({:.1} fps average)",
                stats.frames,
                stats.fps()
            );
        }
        Ok(stats)
    }
}
