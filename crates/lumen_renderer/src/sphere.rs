//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material, Ray,
};
use lumen_math::{Interval, Point3};
use std::sync::Arc;

/// A sphere primitive.
///
/// Spheres without a material are shaded by the renderer's unlit law.
#[derive(Clone)]
pub struct Sphere {
    center: Point3,
    radius: f32,
    material: Option<Arc<dyn Material>>,
}

impl Sphere {
    /// Create a new sphere with no material.
    pub fn new(center: Point3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material: None,
        }
    }

    /// Create a new sphere whose surface scatters with `material`.
    pub fn with_material(center: Point3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            material: Some(material),
            ..Self::new(center, radius)
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        // A point sphere has no surface to hit
        if self.radius <= 0.0 {
            return None;
        }

        let a = ray.direction().length_squared();
        if a == 0.0 {
            return None;
        }

        let oc = self.center - ray.origin();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(
            ray,
            root,
            outward_normal,
            self.material.as_deref(),
        ))
    }
}
