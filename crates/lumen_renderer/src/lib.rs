//! Lumen Renderer - CPU Ray Tracing
//!
//! A small recursive ray tracer: a camera shoots jittered rays through each
//! pixel, spheres report their nearest hit, and materials decide how light
//! bounces until the depth budget runs out or the ray escapes to the sky.
//!
//! Rendering is single-threaded and deterministic for a seeded generator.

mod camera;
mod hittable;
mod material;
mod ppm;
mod renderer;
mod sampling;
mod sphere;

pub use camera::{Camera, Viewport, MAX_IMAGE_HEIGHT};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{Dielectric, Lambertian, Material, Metal, ScatterResult};
pub use ppm::{OutputError, PpmHeader, PpmWriter, PPM_MAX_VALUE};
pub use renderer::{
    color_to_rgb, linear_to_gamma, ray_color, render_pixel, sky_gradient, Background,
    ImageBuffer, RenderConfig, UnlitShading, DEFAULT_MIN_HIT_DISTANCE,
};
pub use sampling::{gen_f32, random_unit_vector, sample_square};
pub use sphere::Sphere;

/// Re-export the math types from lumen_math
pub use lumen_math::{Color, Interval, Point3, Ray, Vec3};
