//! Camera for ray generation and the image scan loop.

use crate::{
    ppm::{OutputError, PpmWriter},
    renderer::{render_pixel, ImageBuffer, RenderConfig},
    sampling::sample_square,
    Hittable, Ray,
};
use lumen_math::{Color, Point3, Vec3};
use log::{debug, info, warn};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::io::Write;
use std::time::Instant;

/// Height of the viewport in world units.
const VIEWPORT_HEIGHT: f64 = 2.0;

/// Distance from the camera center to the viewport along the view axis.
const FOCAL_LENGTH: f32 = 1.0;

/// Tallest image a camera will produce, however narrow its aspect ratio.
pub const MAX_IMAGE_HEIGHT: u32 = 16_384;

/// Camera configuration.
///
/// The camera looks down `-Z` from `center`. Everything derived from these
/// fields lives in a [`Viewport`], computed fresh for each render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Camera center
    pub center: Point3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            center: Point3::ZERO,
        }
    }

    /// Set the image aspect ratio (width over height).
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the image width in pixels.
    pub fn with_image_width(mut self, image_width: u32) -> Self {
        self.image_width = image_width;
        self
    }

    /// Set the camera position.
    pub fn with_center(mut self, center: Point3) -> Self {
        self.center = center;
        self
    }

    /// Image height implied by the width and aspect ratio, between 1 and
    /// [`MAX_IMAGE_HEIGHT`].
    pub fn image_height(&self) -> u32 {
        let height = f64::from(self.image_width.max(1)) / self.aspect_ratio;
        if !height.is_finite() || height < 1.0 {
            1
        } else if height > f64::from(MAX_IMAGE_HEIGHT) {
            MAX_IMAGE_HEIGHT
        } else {
            height as u32
        }
    }

    /// Derive the per-render viewport geometry.
    pub fn viewport(&self) -> Viewport {
        if self.image_width == 0 {
            warn!("image_width is 0, rendering a single column");
        }
        let image_width = self.image_width.max(1);
        let image_height = self.image_height();
        if image_height == MAX_IMAGE_HEIGHT {
            warn!(
                "aspect ratio {} asks for a very tall image, capping height at {MAX_IMAGE_HEIGHT}",
                self.aspect_ratio
            );
        }

        // Use the real pixel ratio, not the requested one, so pixels stay square
        let viewport_width = VIEWPORT_HEIGHT * f64::from(image_width) / f64::from(image_height);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = Vec3::new(viewport_width as f32, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -VIEWPORT_HEIGHT as f32, 0.0);

        let pixel_delta_u = viewport_u / image_width as f32;
        let pixel_delta_v = viewport_v / image_height as f32;

        let viewport_upper_left = self.center
            - Vec3::new(0.0, 0.0, FOCAL_LENGTH)
            - viewport_u / 2.0
            - viewport_v / 2.0;

        Viewport {
            image_width,
            image_height,
            center: self.center,
            pixel00_loc: viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v),
            pixel_delta_u,
            pixel_delta_v,
        }
    }

    /// Render the scene into a linear-color image buffer.
    pub fn render(
        &self,
        world: &dyn Hittable,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
    ) -> ImageBuffer {
        let viewport = self.viewport();
        let mut image = ImageBuffer::new(viewport.image_width, viewport.image_height);

        let scanned = scan::<Infallible>(&viewport, world, config, rng, |x, y, color| {
            image.set(x, y, color);
            Ok(())
        });
        if let Err(never) = scanned {
            match never {}
        }

        image
    }

    /// Render the scene straight into a PPM stream, returning the writer.
    pub fn render_ppm<W: Write>(
        &self,
        world: &dyn Hittable,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
        writer: W,
    ) -> Result<W, OutputError> {
        let viewport = self.viewport();
        let mut ppm = PpmWriter::new(writer, viewport.image_width, viewport.image_height)?;
        scan(&viewport, world, config, rng, |_, _, color| ppm.write_color(color))?;
        ppm.finish()
    }

    /// Render the scene, handing each averaged pixel to `emit` in raster order.
    pub fn render_with<E>(
        &self,
        world: &dyn Hittable,
        config: &RenderConfig,
        rng: &mut dyn RngCore,
        emit: impl FnMut(u32, u32, Color) -> Result<(), E>,
    ) -> Result<(), E> {
        scan(&self.viewport(), world, config, rng, emit)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Read-only geometry derived from a [`Camera`] for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub image_width: u32,
    pub image_height: u32,
    /// Camera center, origin of every primary ray
    pub center: Point3,
    /// Location of pixel 0, 0
    pub pixel00_loc: Point3,
    /// Offset to pixel to the right
    pub pixel_delta_u: Vec3,
    /// Offset to pixel below
    pub pixel_delta_v: Vec3,
}

impl Viewport {
    /// Ray from the camera center through the center of pixel (i, j).
    pub fn center_ray(&self, i: u32, j: u32) -> Ray {
        self.ray_through(i as f32, j as f32)
    }

    /// Ray through a uniformly jittered point inside pixel (i, j).
    pub fn sample_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        self.ray_through(i as f32 + offset.x, j as f32 + offset.y)
    }

    fn ray_through(&self, i: f32, j: f32) -> Ray {
        let pixel_sample = self.pixel00_loc + i * self.pixel_delta_u + j * self.pixel_delta_v;
        Ray::new(self.center, pixel_sample - self.center)
    }
}

/// Scan rows top to bottom, pixels left to right.
fn scan<E>(
    viewport: &Viewport,
    world: &dyn Hittable,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
    mut emit: impl FnMut(u32, u32, Color) -> Result<(), E>,
) -> Result<(), E> {
    if config.samples_per_pixel == 0 {
        warn!("samples_per_pixel is 0, rendering with 1 sample");
    }
    info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        viewport.image_width,
        viewport.image_height,
        config.samples_per_pixel.max(1),
        config.max_depth
    );

    let start = Instant::now();
    for y in 0..viewport.image_height {
        debug!("Scanlines remaining: {}", viewport.image_height - y);
        for x in 0..viewport.image_width {
            let color = render_pixel(viewport, world, x, y, config, rng);
            emit(x, y, color)?;
        }
    }
    info!("Rendered in {:?}", start.elapsed());

    Ok(())
}
