//! Command line arguments for the `lumen` binary.

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

use crate::scene::SceneKind;

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, ValueEnum)]
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

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "lumen")]
#[command(about = "Render a demo scene to a plain-text PPM image")]
pub struct Args {
    /// Output image path
    #[arg(short, long, default_value = "image.ppm")]
    pub output: PathBuf,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Materials)]
    pub scene: SceneKind,

    /// JSON settings file with `camera` and `render` sections
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Image width in pixels
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Aspect ratio as `16:9`, `16/9` or a decimal
    #[arg(short, long, value_parser = parse_aspect_ratio)]
    pub aspect_ratio: Option<f64>,

    /// Number of samples per pixel (1 disables anti-aliasing)
    #[arg(short, long)]
    pub samples: Option<u32>,

    /// Maximum number of bounces per ray
    #[arg(short = 'd', long)]
    pub max_depth: Option<u32>,

    /// Seed for a reproducible image
    #[arg(long)]
    pub seed: Option<u64>,

    /// Logging level (RUST_LOG still wins when set)
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

/// Parse `16:9`, `16/9` or `1.7778` into a positive ratio.
pub fn parse_aspect_ratio(value: &str) -> Result<f64, String> {
    let ratio = match value.split_once([':', '/']) {
        Some((width, height)) => {
            let width: f64 = width.trim().parse().map_err(|_| format!("bad width in {value:?}"))?;
            let height: f64 = height
                .trim()
                .parse()
                .map_err(|_| format!("bad height in {value:?}"))?;
            width / height
        }
        None => value.trim().parse().map_err(|_| format!("not a ratio: {value:?}"))?,
    };

    if ratio.is_finite() && ratio > 0.0 {
        Ok(ratio)
    } else {
        Err(format!("aspect ratio must be positive, got {value:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_aspect_ratio() {
        assert_eq!(parse_aspect_ratio("16:9"), Ok(16.0 / 9.0));
        assert_eq!(parse_aspect_ratio("16/9"), Ok(16.0 / 9.0));
        assert_eq!(parse_aspect_ratio("2"), Ok(2.0));
        assert_eq!(parse_aspect_ratio(" 1.5 "), Ok(1.5));
        assert!(parse_aspect_ratio("16:0").is_err());
        assert!(parse_aspect_ratio("-1").is_err());
        assert!(parse_aspect_ratio("wide").is_err());
    }

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["lumen"]).expect("no arguments needed");
        assert_eq!(args.output, PathBuf::from("image.ppm"));
        assert_eq!(args.scene, SceneKind::Materials);
        assert!(args.width.is_none());
        assert!(args.seed.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "lumen", "-o", "out.ppm", "--scene", "normals", "-w", "320", "-a", "4:3", "-s", "1",
            "-d", "0", "--seed", "7", "--log-level", "debug",
        ])
        .expect("valid flags");

        assert_eq!(args.output, PathBuf::from("out.ppm"));
        assert_eq!(args.scene, SceneKind::Normals);
        assert_eq!(args.width, Some(320));
        assert_eq!(args.aspect_ratio, Some(4.0 / 3.0));
        assert_eq!(args.samples, Some(1));
        assert_eq!(args.max_depth, Some(0));
        assert_eq!(args.seed, Some(7));
        assert_eq!(LevelFilter::from(args.log_level), LevelFilter::Debug);
    }
}
