//! Band-parallel frame rendering.
//!
//! The image is split into contiguous row bands, one per worker. Each worker
//! gets an exclusive slice of the frame buffer, so no two workers ever write
//! the same byte, and the call returns only after every band is finished.

use std::ops::Range;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use crate::error::{RenderError, RenderResult};
use crate::renderer::{color_to_rgb, render_pixel};
use crate::{Camera, Hittable};

/// Bytes per pixel in a [`FrameBuffer`].
pub const CHANNELS: usize = 3;

/// Row-major RGB8 pixel buffer shared by all workers of a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Create a frame buffer with every byte set to `value`.
    pub fn filled(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            pixels: vec![value; width as usize * height as usize * CHANNELS],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw `width * height * 3` bytes, ready for presentation.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> [u8; 3] {
        let offset = self.offset(x, y);
        [
            self.pixels[offset],
            self.pixels[offset + 1],
            self.pixels[offset + 2],
        ]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        let offset = self.offset(x, y);
        self.pixels[offset..offset + CHANNELS].copy_from_slice(&rgb);
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 3]> + '_ {
        self.pixels
            .chunks_exact(CHANNELS)
            .map(|px| [px[0], px[1], px[2]])
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }
}

/// A contiguous range of rows rendered by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// Index of the band, top to bottom
    pub index: usize,
    /// First row (inclusive)
    pub start_row: u32,
    /// Last row (exclusive)
    pub end_row: u32,
}

impl Band {
    pub fn rows(&self) -> u32 {
        self.end_row - self.start_row
    }

    pub fn is_empty(&self) -> bool {
        self.start_row == self.end_row
    }

    /// Byte range of this band within a frame of the given width.
    pub fn byte_range(&self, width: u32) -> Range<usize> {
        let row_bytes = width as usize * CHANNELS;
        self.start_row as usize * row_bytes..self.end_row as usize * row_bytes
    }
}

/// Split `height` rows into `count` contiguous bands.
///
/// Every band gets `height / count` rows and the last band also takes the
/// remainder, so leading bands may be empty when `height < count`.
pub fn partition_bands(height: u32, count: usize) -> Vec<Band> {
    let count = count.max(1);
    let rows_per_band = height / count as u32;

    (0..count)
        .map(|index| {
            let start_row = index as u32 * rows_per_band;
            let end_row = if index == count - 1 {
                height
            } else {
                start_row + rows_per_band
            };
            Band {
                index,
                start_row,
                end_row,
            }
        })
        .collect()
}

/// Render every pixel of `band` into `pixels`, the band's slice of the frame.
///
/// With `report_progress` set, the share of finished rows is logged at debug
/// roughly every tenth of the band.
pub fn render_band(
    band: &Band,
    pixels: &mut [u8],
    camera: &Camera,
    world: &dyn Hittable,
    rng: &mut StdRng,
    report_progress: bool,
) {
    let width = camera.image_width;
    debug_assert_eq!(pixels.len(), band.byte_range(width).len());

    let rows = band.rows();
    for (done, (row, row_pixels)) in (band.start_row..band.end_row)
        .zip(pixels.chunks_exact_mut(width as usize * CHANNELS))
        .enumerate()
    {
        for (x, px) in (0..width).zip(row_pixels.chunks_exact_mut(CHANNELS)) {
            let color = render_pixel(camera, world, x, row, rng);
            px.copy_from_slice(&color_to_rgb(color));
        }

        let done = done as u32 + 1;
        if report_progress && is_progress_row(done, rows) {
            log::debug!(
                "Band {}: {:.1}% of rows complete",
                band.index,
                100.0 * f64::from(done) / f64::from(rows)
            );
        }
    }
}

/// True when `done` of `rows` finished rows is worth a progress line.
fn is_progress_row(done: u32, rows: u32) -> bool {
    let step = (rows / 10).max(1);
    done == rows || done % step == 0
}

/// Renders frames on a persistent pool of worker threads.
pub struct FrameRenderer {
    pool: rayon::ThreadPool,
    workers: usize,
    seed: u64,
    frame_index: u64,
    report_progress: bool,
}

impl FrameRenderer {
    /// Create a renderer with `workers` threads and a base seed.
    pub fn new(workers: usize, seed: u64) -> RenderResult<Self> {
        if workers == 0 {
            return Err(RenderError::InvalidSettings(
                "worker count must be at least 1".into(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("glint-worker-{i}"))
            .build()?;

        log::debug!("Frame renderer started with {} workers", workers);

        Ok(Self {
            pool,
            workers,
            seed,
            frame_index: 0,
            report_progress: false,
        })
    }

    /// Log each finished band at info level (static renders).
    pub fn with_progress(mut self, report: bool) -> Self {
        self.report_progress = report;
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of frames rendered so far.
    pub fn frames_rendered(&self) -> u64 {
        self.frame_index
    }

    /// Render one frame into `frame`, blocking until all bands are done.
    ///
    /// The camera's viewport must already be up to date and its resolution
    /// must match the frame buffer.
    pub fn render_frame(
        &mut self,
        camera: &Camera,
        world: &dyn Hittable,
        frame: &mut FrameBuffer,
    ) -> RenderResult<()> {
        let expected = camera.image_width as usize * camera.image_height as usize * CHANNELS;
        if frame.width() != camera.image_width || frame.height() != camera.image_height {
            return Err(RenderError::BufferSize {
                expected,
                actual: frame.as_bytes().len(),
            });
        }

        let start = Instant::now();
        let width = frame.width();
        let height = frame.height();
        let bands = partition_bands(height, self.workers);

        // Hand each band its own disjoint slice of the buffer
        let mut jobs = Vec::with_capacity(bands.len());
        let mut rest = frame.as_bytes_mut();
        for band in bands {
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(band.byte_range(width).len());
            jobs.push((band, head));
            rest = tail;
        }
        debug_assert!(rest.is_empty());

        let frame_seed = mix_seed(self.seed, self.frame_index);
        let report_progress = self.report_progress;

        self.pool.install(|| {
            jobs.into_par_iter().for_each(|(band, pixels)| {
                let mut rng = StdRng::seed_from_u64(mix_seed(frame_seed, band.index as u64 + 1));
                render_band(&band, pixels, camera, world, &mut rng, report_progress);

                if report_progress {
                    log::info!(
                        "Band {} done: rows {}..{} ({:.1}% to {:.1}% of image)",
                        band.index,
                        band.start_row,
                        band.end_row,
                        100.0 * f64::from(band.start_row) / f64::from(height),
                        100.0 * f64::from(band.end_row) / f64::from(height),
                    );
                } else {
                    log::trace!("Band {} done", band.index);
                }
            });
        });

        self.frame_index += 1;
        log::debug!(
            "Frame {} ({}x{}) rendered in {:.2?}",
            self.frame_index,
            width,
            height,
            start.elapsed()
        );

        Ok(())
    }
}

/// Derive a well-spread seed from a base seed and a stream number.
fn mix_seed(seed: u64, stream: u64) -> u64 {
    seed ^ stream.wrapping_mul(0x9E37_79B9_7F4A_7C15).rotate_left(31)
}
