//! Infinite checkered plane used as the scene backdrop.

use glam::{Vec2, Vec3A};

use crate::hittable::{HitRecord, Hittable, Layer};
use crate::interval::Interval;
use crate::material::{Checker, MaterialType};
use crate::ray::Ray;
use crate::EPSILON;

/// Normal components above this magnitude count as axis-aligned.
const AXIS_ALIGNED: f32 = 0.99;

/// Plane `dot(p, normal) = offset` with a checker pattern.
///
/// Always opaque and resolved as a backdrop: it is only seen where no
/// finite object is hit.
#[derive(Debug, Clone)]
pub struct CheckerPlane {
    /// Unit normal.
    pub normal: Vec3A,
    /// Signed distance of the plane from the origin along `normal`.
    pub offset: f32,
    /// Surface pattern.
    pub checker: Checker,
}

impl CheckerPlane {
    /// Create a plane. `normal` is expected to be unit length.
    pub fn new(normal: Vec3A, offset: f32, checker: Checker) -> Self {
        Self { normal, offset, checker }
    }

    /// 2D pattern coordinates of a point on the plane.
    ///
    /// Drops the axis the normal is aligned with; planes that are not
    /// aligned with Z or Y fall back to the (y, z) projection.
    pub fn project(&self, p: Vec3A) -> Vec2 {
        if self.normal.z.abs() > AXIS_ALIGNED {
            Vec2::new(p.x, p.y)
        } else if self.normal.y.abs() > AXIS_ALIGNED {
            Vec2::new(p.x, p.z)
        } else {
            Vec2::new(p.y, p.z)
        }
    }
}

impl Hittable for CheckerPlane {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let denom = r.direction.dot(self.normal);
        if denom.abs() <= EPSILON {
            return None;
        }

        let t = (self.offset - r.origin.dot(self.normal)) / denom;
        if !ray_t.surrounds(t) {
            return None;
        }

        let uv = self.project(r.at(t));
        let albedo = self.checker.value(uv.x, uv.y);
        Some(HitRecord::new(r, t, self.normal, MaterialType::Backdrop { albedo }))
    }

    fn layer(&self) -> Layer {
        Layer::Backdrop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const LIGHT: Vec3A = Vec3A::new(0.8, 0.8, 0.8);
    const DARK: Vec3A = Vec3A::new(0.3, 0.3, 0.3);

    fn back_wall() -> CheckerPlane {
        CheckerPlane::new(Vec3A::Z, -2.0, Checker::new(LIGHT, DARK, 1.5))
    }

    #[test]
    fn hit_distance_and_color() {
        let wall = back_wall();
        let r = Ray::new(Vec3A::new(0.1, 0.1, 4.0), Vec3A::NEG_Z);
        let rec = wall.hit(&r, Interval::FORWARD).unwrap();

        assert_abs_diff_eq!(rec.t, 6.0, epsilon = 1e-5);
        assert_eq!(rec.normal, Vec3A::Z);
        assert_eq!(rec.material, MaterialType::Backdrop { albedo: LIGHT });
        assert_eq!(wall.layer(), Layer::Backdrop);
    }

    #[test]
    fn checker_changes_across_cells() {
        let wall = back_wall();
        // x = 1.0 -> floor(1.5) = 1: odd cell
        let r = Ray::new(Vec3A::new(1.0, 0.1, 4.0), Vec3A::NEG_Z);
        let rec = wall.hit(&r, Interval::FORWARD).unwrap();
        assert_eq!(rec.material, MaterialType::Backdrop { albedo: DARK });
    }

    #[test]
    fn parallel_ray_misses() {
        let wall = back_wall();
        let r = Ray::new(Vec3A::new(0.0, 0.0, 4.0), Vec3A::X);
        assert!(wall.hit(&r, Interval::FORWARD).is_none());

        let grazing = Ray::new(Vec3A::new(0.0, 0.0, 4.0), Vec3A::new(1.0, 0.0, -1e-4).normalize());
        assert!(wall.hit(&grazing, Interval::FORWARD).is_none());
    }

    #[test]
    fn plane_behind_origin_misses() {
        let wall = back_wall();
        let r = Ray::new(Vec3A::new(0.0, 0.0, 4.0), Vec3A::Z);
        assert!(wall.hit(&r, Interval::FORWARD).is_none());
    }

    #[test]
    fn hit_from_behind_keeps_plane_normal() {
        let wall = back_wall();
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::Z);
        let rec = wall.hit(&r, Interval::FORWARD).unwrap();
        assert_abs_diff_eq!(rec.t, 3.0, epsilon = 1e-5);
        assert!(!rec.front_face);
    }

    #[test]
    fn projection_follows_dominant_axis() {
        let p = Vec3A::new(1.0, 2.0, 3.0);
        let checker = Checker::new(LIGHT, DARK, 1.0);

        let floor = CheckerPlane::new(Vec3A::Y, 0.0, checker);
        assert_eq!(floor.project(p), Vec2::new(1.0, 3.0));

        let side = CheckerPlane::new(Vec3A::X, 0.0, checker);
        assert_eq!(side.project(p), Vec2::new(2.0, 3.0));

        let tilted = CheckerPlane::new(Vec3A::new(0.0, 1.0, 1.0).normalize(), 0.0, checker);
        assert_eq!(tilted.project(p), Vec2::new(2.0, 3.0));
    }
}
