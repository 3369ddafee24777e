//! Render settings: built-in defaults, then a JSON file, then command line flags.

use anyhow::{Context, Result};
use lumen_renderer::{Camera, RenderConfig};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::cli::Args;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub camera: Camera,
    pub render: RenderConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            camera: Camera::new()
                .with_aspect_ratio(16.0 / 9.0)
                .with_image_width(400),
            render: RenderConfig::default().with_quality(100, 50),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file; any field it leaves out keeps the
    /// value from [`Settings::default`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        Self::from_json(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    /// Layer a (possibly partial) JSON document over the built-in defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        let file: Value = serde_json::from_str(text)?;
        let mut merged = serde_json::to_value(Self::default())?;
        overlay(&mut merged, file);
        Ok(serde_json::from_value(merged)?)
    }

    /// Resolve the final settings for a command line invocation.
    pub fn resolve(args: &Args) -> Result<Self> {
        let mut settings = match &args.settings {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply_args(args);
        Ok(settings)
    }

    /// Let explicit flags override whatever was loaded.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(unlit) = args.scene.unlit_shading() {
            self.render.unlit = unlit;
        }
        if let Some(width) = args.width {
            self.camera.image_width = width;
        }
        if let Some(aspect_ratio) = args.aspect_ratio {
            self.camera.aspect_ratio = aspect_ratio;
        }
        if let Some(samples) = args.samples {
            self.render.samples_per_pixel = samples;
        }
        if let Some(max_depth) = args.max_depth {
            self.render.max_depth = max_depth;
        }
    }
}

/// Merge `file` into `base` section by section. Within a section each field
/// the file names replaces the default wholesale, so enum values such as
/// `background` never mix variants.
fn overlay(base: &mut Value, file: Value) {
    match (base, file) {
        (Value::Object(sections), Value::Object(file_sections)) => {
            for (name, section) in file_sections {
                match (sections.get_mut(&name), section) {
                    (Some(Value::Object(fields)), Value::Object(file_fields)) => {
                        fields.extend(file_fields);
                    }
                    (Some(slot), section) => *slot = section,
                    (None, section) => {
                        sections.insert(name, section);
                    }
                }
            }
        }
        (base, file) => *base = file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use lumen_renderer::{Background, Color, UnlitShading};

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("lumen-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("temp dir is writable");
        path
    }

    #[test]
    fn test_defaults_without_file() {
        let args = Args::try_parse_from(["lumen"]).expect("args");
        let settings = Settings::resolve(&args).expect("defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.camera.image_height(), 225);
    }

    #[test]
    fn test_file_then_flags() {
        let path = write_temp(
            "layered.json",
            r#"{ "camera": { "image_width": 64, "aspect_ratio": 2.0 },
                 "render": {
                     "samples_per_pixel": 8,
                     "background": { "solid": [1.0, 0.0, 0.0] } } }"#,
        );
        let path_arg = path.to_string_lossy().into_owned();
        let args = Args::try_parse_from([
            "lumen",
            "--settings",
            &path_arg,
            "-s",
            "2",
            "--scene",
            "diffuse",
        ])
        .expect("args");

        let settings = Settings::resolve(&args).expect("settings");
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.camera.image_width, 64);
        assert_eq!(settings.camera.aspect_ratio, 2.0);
        assert_eq!(settings.render.samples_per_pixel, 2);
        assert_eq!(settings.render.background, Background::Solid(Color::new(1.0, 0.0, 0.0)));
        assert_eq!(settings.render.unlit, UnlitShading::Diffuse { reflectance: 0.5 });
        // Not in the file, so the binary's default applies
        assert_eq!(settings.render.max_depth, 50);
    }

    #[test]
    fn test_partial_sections_keep_builtin_defaults() {
        let settings = Settings::from_json(
            r#"{ "camera": { "image_width": 64 }, "render": { "samples_per_pixel": 8 } }"#,
        )
        .expect("partial settings");
        let defaults = Settings::default();

        assert_eq!(settings.camera.image_width, 64);
        assert_eq!(settings.camera.aspect_ratio, 16.0 / 9.0);
        assert_eq!(settings.camera.center, defaults.camera.center);
        assert_eq!(settings.render.samples_per_pixel, 8);
        assert_eq!(settings.render.max_depth, 50);
        assert_eq!(settings.render.background, defaults.render.background);
        assert_eq!(settings.render.min_hit_distance, defaults.render.min_hit_distance);
    }

    #[test]
    fn test_empty_file_is_the_builtin_defaults() {
        assert_eq!(Settings::from_json("{}").expect("empty object"), Settings::default());
    }

    #[test]
    fn test_file_replaces_enum_fields_wholesale() {
        let settings = Settings::from_json(
            r#"{ "render": { "unlit": { "diffuse": { "reflectance": 0.25 } } } }"#,
        )
        .expect("unlit override");
        assert_eq!(settings.render.unlit, UnlitShading::Diffuse { reflectance: 0.25 });
        assert_eq!(settings.render.samples_per_pixel, 100);

        let back_to_sky = Settings::from_json(r#"{ "render": { "background": "sky" } }"#)
            .expect("sky background");
        assert_eq!(back_to_sky.render.background, Background::Sky);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("lumen-definitely-missing.json");
        let err = Settings::load(&missing).expect_err("file does not exist");
        assert!(err.to_string().contains("Failed to read settings file"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let path = write_temp("broken.json", "{ camera: ");
        let err = Settings::load(&path).expect_err("not JSON");
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("Failed to parse settings file"));
    }
}
