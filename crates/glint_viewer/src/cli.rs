use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use glint_renderer::{RenderMode, RenderSettings};
use log::LevelFilter;

use crate::scenes::SceneKind;

/// Log levels selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Render one image
    Static,
    /// Render continuously with scripted camera input
    Live,
}

impl From<Mode> for RenderMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Static => RenderMode::Static,
            Mode::Live => RenderMode::Live,
        }
    }
}

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "glint")]
#[command(about = "A multithreaded CPU ray tracer")]
pub struct Args {
    /// JSON render settings; missing keys use defaults
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "static")]
    pub mode: Mode,

    #[arg(long, value_enum, default_value = "basic")]
    pub scene: SceneKind,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Samples per pixel
    #[arg(long, short = 's')]
    pub samples: Option<u32>,

    /// Maximum bounces per path
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Shade one ray through each pixel center
    #[arg(long)]
    pub no_antialiasing: bool,

    /// Worker threads (defaults to the available parallelism)
    #[arg(long, short = 't')]
    pub threads: Option<usize>,

    /// Base seed for reproducible renders
    #[arg(long)]
    pub seed: Option<u64>,

    /// Frames to render in live mode
    #[arg(long, default_value_t = 60, value_parser = clap::value_parser!(u64).range(1..))]
    pub frames: u64,

    /// PPM output path; static renders go to stdout without it
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,
}

impl Args {
    /// Apply command line overrides on top of loaded settings.
    pub fn apply_overrides(&self, settings: &mut RenderSettings) {
        if let Some(width) = self.width {
            settings.image_width = width;
        }
        if let Some(samples) = self.samples {
            settings.samples_per_pixel = samples;
        }
        if let Some(max_depth) = self.max_depth {
            settings.max_depth = max_depth;
        }
        if self.no_antialiasing {
            settings.antialiasing = false;
        }
        if self.threads.is_some() {
            settings.threads = self.threads;
        }
        if self.seed.is_some() {
            settings.seed = self.seed;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["glint"]).unwrap();
        assert_eq!(args.mode, Mode::Static);
        assert_eq!(args.scene, SceneKind::Basic);
        assert_eq!(args.frames, 60);
        assert_eq!(args.log_level, LogLevel::Info);
        assert!(args.output.is_none());

        let mut settings = RenderSettings::default();
        args.apply_overrides(&mut settings);
        assert_eq!(settings, RenderSettings::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "glint",
            "--mode",
            "live",
            "--scene",
            "materials",
            "--width",
            "320",
            "-s",
            "8",
            "--max-depth",
            "12",
            "--no-antialiasing",
            "--threads",
            "4",
            "--seed",
            "99",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(RenderMode::from(args.mode), RenderMode::Live);
        assert_eq!(args.scene, SceneKind::Materials);
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);

        let mut settings = RenderSettings::default();
        args.apply_overrides(&mut settings);
        assert_eq!(settings.image_width, 320);
        assert_eq!(settings.samples_per_pixel, 8);
        assert_eq!(settings.max_depth, 12);
        assert!(!settings.antialiasing);
        assert_eq!(settings.threads, Some(4));
        assert_eq!(settings.seed, Some(99));
    }

    #[test]
    fn test_frames_must_be_positive() {
        assert!(Args::try_parse_from(["glint", "--frames", "0"]).is_err());
        let args = Args::try_parse_from(["glint", "--frames", "1"]).unwrap();
        assert_eq!(args.frames, 1);
    }

    #[test]
    fn test_rejects_unknown_mode() {
        assert!(Args::try_parse_from(["glint", "--mode", "window"]).is_err());
    }
}
