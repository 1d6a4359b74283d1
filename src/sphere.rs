//! Sphere primitive for ray tracing.
//!
//! Implements ray-sphere intersection using the half-b form of the quadratic formula.

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::{Color, MaterialType};
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and a translucent material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (positive).
    pub radius: f32,

    /// Material applied to every hit on the sphere.
    pub material: MaterialType,
}

impl Sphere {
    /// Create a new translucent sphere.
    pub fn new(center: Vec3A, radius: f32, albedo: Color, alpha: f32) -> Self {
        Self {
            center,
            radius,
            material: MaterialType::Translucent { albedo, alpha },
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Near root first; the far root is the exit point when the origin is inside
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = r.at(root);
        let outward_normal = (p - self.center).normalize();
        Some(HitRecord::new(r, root, outward_normal, self.material))
    }
}
