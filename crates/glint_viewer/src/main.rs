use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use glint_renderer::{PpmSink, RenderMode, RenderSettings, Session};

mod cli;
mod headless;
mod scenes;

use cli::Args;
use headless::HeadlessDriver;

/// Distance from the camera to the point the live orbit circles.
const ORBIT_RADIUS: f64 = 1.0;

fn load_settings(path: Option<&Path>) -> Result<RenderSettings> {
    let Some(path) = path else {
        return Ok(RenderSettings::default());
    };

    let file = File::open(path)
        .with_context(|| format!("Failed to open config {}", path.display()))?;
    let settings = serde_json::from_reader(io::BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    log::info!("Loaded settings from {}", path.display());
    Ok(settings)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(args.log_level.into())
        .init();

    log::info!("Starting Glint");

    let mut settings = load_settings(args.config.as_deref())?;
    args.apply_overrides(&mut settings);

    let world = scenes::build(args.scene);
    let mode = RenderMode::from(args.mode);
    let mut session =
        Session::new(&settings, world, mode).context("Failed to set up render session")?;

    let stats = match mode {
        RenderMode::Static => match &args.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                session.run(&mut PpmSink::new(BufWriter::new(file)))?
            }
            None => session.run(&mut PpmSink::new(BufWriter::new(io::stdout().lock())))?,
        },
        RenderMode::Live => {
            let mut driver = HeadlessDriver::orbit(args.frames, ORBIT_RADIUS, &settings)
                .with_output(args.output.clone());
            session.run(&mut driver)?
        }
    };

    log::info!(
        "Done: {} frame(s) in {:.2?}",
        stats.frames,
        stats.elapsed
    );
    Ok(())
}
