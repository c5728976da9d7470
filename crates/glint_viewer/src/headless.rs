//! Display driver for live mode without a window.
//!
//! Replays an orbit around a point in front of the starting camera: every
//! frame turns the camera and strafes sideways so the pivot stays in view.
//! The last frame can be written out as a PPM image.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Duration;

use glint_renderer::{
    write_ppm, DisplayDriver, FrameBuffer, FrameInput, RenderResult, RenderSettings,
};

/// Simulated time between frames, in seconds.
pub const FRAME_STEP: f64 = 1.0 / 30.0;

pub struct HeadlessDriver {
    frames: u64,
    presented: u64,
    needs_look_toggle: bool,
    strafe: f64,
    render_time: Duration,
    output: Option<PathBuf>,
}

impl HeadlessDriver {
    /// Orbit a pivot `radius` units ahead of the camera for `frames` frames.
    pub fn orbit(frames: u64, radius: f64, settings: &RenderSettings) -> Self {
        // Turning by w rad/s swings the pivot sideways at radius * w; strafing
        // against it at the same speed keeps the pivot centered.
        let strafe = if settings.move_speed > 0.0 {
            -radius * settings.sensitivity / settings.move_speed
        } else {
            0.0
        };

        Self {
            frames,
            presented: 0,
            needs_look_toggle: !settings.look_enabled,
            strafe,
            render_time: Duration::ZERO,
            output: None,
        }
    }

    /// Write the last presented frame to `path`.
    pub fn with_output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    pub fn presented(&self) -> u64 {
        self.presented
    }

    fn next_input(&mut self) -> FrameInput {
        let mut input = FrameInput {
            right: self.strafe,
            look_horizontal: 1.0,
            ..FrameInput::idle(FRAME_STEP)
        };
        if self.needs_look_toggle {
            input = input.with_toggle_look();
            self.needs_look_toggle = false;
        }
        input
    }

    fn save(&self, frame: &FrameBuffer) -> RenderResult<()> {
        if let Some(path) = &self.output {
            let mut out = BufWriter::new(File::create(path)?);
            write_ppm(&mut out, frame)?;
            log::info!("Wrote last frame to {}", path.display());
        }
        Ok(())
    }
}

impl DisplayDriver for HeadlessDriver {
    fn present(
        &mut self,
        frame: &FrameBuffer,
        frame_time: Duration,
    ) -> RenderResult<Option<FrameInput>> {
        self.presented += 1;
        self.render_time += frame_time;

        if self.presented % 10 == 0 {
            let fps = self.presented as f64 / self.render_time.as_secs_f64().max(f64::EPSILON);
            log::info!("{} frames presented ({:.1} fps)", self.presented, fps);
        }

        if self.presented >= self.frames {
            self.save(frame)?;
            return Ok(None);
        }
        Ok(Some(self.next_input()))
    }
}
