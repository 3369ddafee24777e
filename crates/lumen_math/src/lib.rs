// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// A position in world space.
pub type Point3 = Vec3;

/// Linear RGB radiance, channels nominally in [0, 1].
pub type Color = Vec3;
