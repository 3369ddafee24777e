//! Demo scenes.

use clap::ValueEnum;
use lumen_renderer::{
    Color, Dielectric, Hittable, HittableList, Lambertian, Material, Metal, Point3, Sphere,
    UnlitShading,
};
use std::sync::Arc;

const SMALL_SPHERE: (Point3, f32) = (Point3::new(0.0, 0.0, -1.0), 0.5);
const GROUND: (Point3, f32) = (Point3::new(0.0, -100.5, -1.0), 100.0);

/// Built-in scenes selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneKind {
    /// Nothing but sky
    Gradient,
    /// Two spheres shaded by their normals
    Normals,
    /// Two gray spheres with diffuse bounces
    Diffuse,
    /// Ground, matte, glass and metal spheres
    Materials,
}

impl SceneKind {
    /// Shading law for the material-less spheres of this scene, if it has any.
    pub fn unlit_shading(self) -> Option<UnlitShading> {
        match self {
            SceneKind::Normals => Some(UnlitShading::Normals),
            SceneKind::Diffuse => Some(UnlitShading::Diffuse { reflectance: 0.5 }),
            SceneKind::Gradient | SceneKind::Materials => None,
        }
    }

    pub fn build(self) -> HittableList {
        match self {
            SceneKind::Gradient => HittableList::new(),
            SceneKind::Normals | SceneKind::Diffuse => plain_spheres(),
            SceneKind::Materials => material_spheres(),
        }
    }
}

fn plain_spheres() -> HittableList {
    [SMALL_SPHERE, GROUND]
        .into_iter()
        .map(|(center, radius)| -> Arc<dyn Hittable> { Arc::new(Sphere::new(center, radius)) })
        .collect()
}

fn material_spheres() -> HittableList {
    let ground: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0)));
    let center: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5)));
    let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.3));

    let mut world = HittableList::new();
    world.add(Arc::new(Sphere::with_material(GROUND.0, GROUND.1, ground.clone())));
    world.add(Arc::new(Sphere::with_material(SMALL_SPHERE.0, SMALL_SPHERE.1, center)));
    world.add(Arc::new(Sphere::with_material(Point3::new(-1.0, 0.0, -1.0), 0.5, glass)));
    world.add(Arc::new(Sphere::with_material(Point3::new(1.0, 0.0, -1.0), 0.5, metal)));
    // A pebble sharing the ground's material
    world.add(Arc::new(Sphere::with_material(Point3::new(0.4, -0.4, -0.6), 0.1, ground)));
    world
}
