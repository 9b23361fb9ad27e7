#![forbid(unsafe_code)]

mod app;
mod config;
mod walker;

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;

use crate::app::App;
use crate::walker::Route;

/// Headless walkaround over procedural terrain with recycled grass.
#[derive(Parser, Debug)]
#[command(name = "verdant", version, about)]
struct Args {
    /// TOML config; defaults are used when the file does not exist.
    #[arg(long, default_value = "verdant.toml")]
    config: PathBuf,

    /// Frames to simulate; 0 runs until interrupted.
    #[arg(long, default_value_t = 600)]
    frames: u64,

    /// Seconds per frame.
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    #[arg(long, value_enum, default_value_t = Route::Line)]
    route: Route,

    /// Overrides `[viewer] speed`.
    #[arg(long)]
    speed: Option<f32>,

    /// Reload elevation and tile color when the config file changes.
    /// Frames are paced to wall clock while watching.
    #[arg(long)]
    watch: bool,

    #[arg(long, short)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if !(args.dt.is_finite() && args.dt > 0.0) {
        return Err(format!("--dt must be positive (got {})", args.dt).into());
    }

    let mut cfg = config::load_or_default(&args.config)?;
    if let Some(speed) = args.speed {
        cfg.viewer.speed = speed;
    }

    let mut app = App::new(cfg, args.config.clone(), args.route, args.watch)?;
    app.run(args.frames, args.dt, args.watch);
    Ok(())
}
