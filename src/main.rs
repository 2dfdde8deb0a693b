//! Headless plexus renderer.
//!
//! Runs the field for a number of frames on a software canvas and writes the
//! last frame as a PNG.
//!
//! Usage: `plexus [config.json|-] [frames] [output.png]`
//!
//! With no config (or `-`) the defaults are used. Frames are paced at the
//! config's `target_fps`. Set `RUST_LOG=debug` to see frame rate reports.

use plexus::prelude::*;
use std::env;
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

const DEFAULT_FRAMES: u64 = 300;
const DEFAULT_OUTPUT: &str = "plexus.png";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut args = env::args().skip(1);

    let config = match args.next().as_deref() {
        None | Some("-") => FieldConfig::default(),
        Some(path) => {
            log::info!("Loading config from {}", path);
            FieldConfig::load(path)?
        }
    };
    let frames: u64 = match args.next() {
        Some(s) => s.parse().map_err(|e| format!("invalid frame count '{}': {}", s, e))?,
        None => DEFAULT_FRAMES,
    };
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let (width, height) = (config.width, config.height);
    log::info!(
        "Rendering {} particles at {}x{} for {} frames at {} fps",
        config.particle_count,
        width,
        height,
        frames,
        config.target_fps
    );

    let field = ParticleField::with_config(width as f32, height as f32, &config);
    let canvas = Canvas::new(width, height, config.palette.background);
    let scheduler = FrameLimit::new(config.frame_rate(), frames);
    let mut render_loop = RenderLoop::new(field, canvas, scheduler);

    // Park the pointer in the middle so the attraction shows up in the output.
    render_loop
        .field_handle()
        .pointer_moved(width as f32 / 2.0, height as f32 / 2.0)?;

    let rendered = render_loop.run()?;
    render_loop.surface().save_png(&output)?;
    log::info!("Wrote frame {} to {}", rendered, output.display());

    Ok(())
}
