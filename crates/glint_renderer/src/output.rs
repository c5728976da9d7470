//! Plain-text PPM output for static renders.

use std::io::Write;
use std::time::Duration;

use crate::error::RenderResult;
use crate::session::DisplayDriver;
use crate::{FrameBuffer, FrameInput};

/// Write `frame` as an ASCII PPM (P3) image.
pub fn write_ppm<W: Write>(out: &mut W, frame: &FrameBuffer) -> std::io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", frame.width(), frame.height())?;
    writeln!(out, "255")?;
    for [r, g, b] in frame.pixels() {
        writeln!(out, "{r} {g} {b}")?;
    }
    out.flush()
}

/// Display driver that writes the first presented frame as PPM and stops.
pub struct PpmSink<W: Write> {
    out: W,
    written: bool,
}

impl<W: Write> PpmSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> DisplayDriver for PpmSink<W> {
    fn present(
        &mut self,
        frame: &FrameBuffer,
        frame_time: Duration,
    ) -> RenderResult<Option<FrameInput>> {
        if !self.written {
            write_ppm(&mut self.out, frame)?;
            self.written = true;
            log::info!(
                "Wrote {}x{} image, rendered in {:.2?}",
                frame.width(),
                frame.height(),
                frame_time
            );
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_ppm() {
        let mut frame = FrameBuffer::new(2, 2);
        frame.set(0, 0, [255, 0, 0]);
        frame.set(1, 0, [0, 255, 0]);
        frame.set(0, 1, [0, 0, 255]);
        frame.set(1, 1, [12, 34, 56]);

        let mut out = Vec::new();
        write_ppm(&mut out, &frame).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n12 34 56\n"
        );
    }

    #[test]
    fn test_ppm_sink_writes_once() {
        let frame = FrameBuffer::filled(1, 1, 7);
        let mut sink = PpmSink::new(Vec::new());

        assert!(sink.present(&frame, Duration::ZERO).unwrap().is_none());
        assert!(sink.present(&frame, Duration::ZERO).unwrap().is_none());
        assert_eq!(sink.into_inner(), b"P3\n1 1\n255\n7 7 7\n".to_vec());
    }
}
