use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::File;
use std::io::BufWriter;

mod cli;
mod scene;
mod settings;

use cli::Args;
use settings::Settings;

fn init_logger(level: LevelFilter) {
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logger(args.log_level.into());

    let settings = Settings::resolve(&args)?;
    let world = args.scene.build();
    info!("Scene {:?} with {} objects", args.scene, world.len());

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;
    settings
        .camera
        .render_ppm(&world, &settings.render, &mut rng, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    info!("Saved to {}", args.output.display());
    Ok(())
}
