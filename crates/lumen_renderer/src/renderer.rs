//! Core ray tracing shader.
//!
//! Implements recursive light transport with:
//! - Configurable bounce depth
//! - Pluggable miss color (sky gradient or solid background)
//! - Unlit shading for surfaces that carry no material
//! - Anti-aliasing via multi-sampling
//! - Gamma correction on output

use crate::{
    camera::Viewport,
    sampling::random_unit_vector,
    HitRecord, Hittable, Ray, ScatterResult,
};
use lumen_math::{Color, Interval};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Lower bound on hit distance that keeps bounced rays off their own surface.
pub const DEFAULT_MIN_HIT_DISTANCE: f32 = 0.001;

/// Color returned for rays that escape the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    /// White at the horizon blending to sky blue at the zenith
    Sky,
    /// A constant color in every direction
    Solid(Color),
}

impl Background {
    /// Evaluate the background for an escaping ray.
    pub fn color(&self, ray: &Ray) -> Color {
        match self {
            Background::Sky => sky_gradient(ray),
            Background::Solid(color) => *color,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Sky
    }
}

/// How to shade a surface that has no material attached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlitShading {
    /// Map the unit normal to a color, `0.5 * (n + 1)`. Never bounces.
    Normals,
    /// Gray diffuse bounce that keeps `reflectance` of the incoming light
    Diffuse { reflectance: f32 },
}

impl Default for UnlitShading {
    fn default() -> Self {
        UnlitShading::Normals
    }
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Samples per pixel for anti-aliasing (1 = a single ray through the pixel center)
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Color of rays that hit nothing
    pub background: Background,
    /// Shading for surfaces without a material
    pub unlit: UnlitShading,
    /// Hits closer than this are ignored (shadow acne guard)
    pub min_hit_distance: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 10,
            max_depth: 10,
            background: Background::Sky,
            unlit: UnlitShading::Normals,
            min_hit_distance: DEFAULT_MIN_HIT_DISTANCE,
        }
    }
}

impl RenderConfig {
    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set the miss color.
    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    /// Set the shading used for surfaces without a material.
    pub fn with_unlit(mut self, unlit: UnlitShading) -> Self {
        self.unlit = unlit;
        self
    }
}

/// Compute the color seen by a ray.
///
/// This is the core light transport function. It traces the ray through
/// the scene, bouncing off surfaces and accumulating attenuation. Once
/// `depth` reaches zero any surface hit contributes black, while rays that
/// escape still see the background.
pub fn ray_color(
    ray: &Ray,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let Some(rec) = world.hit(ray, Interval::from_min(config.min_hit_distance)) else {
        return config.background.color(ray);
    };

    // Out of bounces: no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    match rec.material {
        Some(material) => match material.scatter(ray, &rec, rng) {
            Some(ScatterResult {
                attenuation,
                scattered,
            }) => attenuation * ray_color(&scattered, world, depth - 1, config, rng),
            None => Color::ZERO,
        },
        None => shade_unlit(&rec, world, depth, config, rng),
    }
}

fn shade_unlit(
    rec: &HitRecord,
    world: &dyn Hittable,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    match config.unlit {
        UnlitShading::Normals => 0.5 * (rec.normal + Color::ONE),
        UnlitShading::Diffuse { reflectance } => {
            let mut direction = rec.normal + random_unit_vector(rng);
            if direction.length_squared() < 1e-8 {
                direction = rec.normal;
            }
            let bounced = Ray::new(rec.p, direction);
            reflectance * ray_color(&bounced, world, depth - 1, config, rng)
        }
    }
}

/// Compute sky gradient background.
///
/// Depends only on the ray's vertical direction component.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a linear color to gamma-encoded 8-bit RGB.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let quantize = |c: f32| (255.0 * Interval::UNIT.clamp(linear_to_gamma(c))) as u8;
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    viewport: &Viewport,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let samples = config.samples_per_pixel.max(1);

    if samples == 1 {
        let ray = viewport.center_ray(x, y);
        return ray_color(&ray, world, config.max_depth, config, rng);
    }

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        let ray = viewport.sample_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, config.max_depth, config, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Simple image buffer for storing linear render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    /// Gamma-encoded RGB bytes in raster order.
    pub fn to_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|color| color_to_rgb(*color))
            .collect()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
