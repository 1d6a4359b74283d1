//! Axis-aligned box primitive.
//!
//! Intersection uses the slab method: each axis clips the ray to the
//! parameter range between the two planes bounding the box on that axis.

use glam::Vec3A;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::{Color, MaterialType};
use crate::ray::Ray;
use crate::EPSILON;

/// Axis-aligned box between two corners, with a translucent material.
#[derive(Debug, Clone)]
pub struct Aabb {
    /// Corner with the smallest coordinates.
    pub min: Vec3A,
    /// Corner with the largest coordinates.
    pub max: Vec3A,
    /// Material applied to every face.
    pub material: MaterialType,
}

impl Aabb {
    /// Create a new translucent box. `min` must not exceed `max` on any axis.
    pub fn new(min: Vec3A, max: Vec3A, albedo: Color, alpha: f32) -> Self {
        Self {
            min,
            max,
            material: MaterialType::Translucent { albedo, alpha },
        }
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3A {
        (self.min + self.max) * 0.5
    }

    /// Half of the box size along each axis.
    pub fn half_extents(&self) -> Vec3A {
        (self.max - self.min) * 0.5
    }

    /// Parametric range where the ray is inside all three slabs.
    ///
    /// Returns `None` when the ray is parallel to a slab it starts outside of.
    fn slab_range(&self, r: &Ray) -> Option<(f32, f32)> {
        let mut t_near = f32::NEG_INFINITY;
        let mut t_far = f32::INFINITY;

        for axis in 0..3 {
            let origin = r.origin[axis];
            let direction = r.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if direction == 0.0 {
                // Parallel: the axis constrains nothing, or excludes everything
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv_d = 1.0 / direction;
            let t0 = (lo - origin) * inv_d;
            let t1 = (hi - origin) * inv_d;
            t_near = t_near.max(t0.min(t1));
            t_far = t_far.min(t0.max(t1));
        }

        Some((t_near, t_far))
    }

    /// Signed unit axis of the face containing `p`.
    ///
    /// Picks the axis where `p` deviates most from the center relative to the
    /// half extent. Ties go to X, then Y.
    pub fn face_normal(&self, p: Vec3A) -> Vec3A {
        let local = p - self.center();
        let half = self.half_extents();

        let mut best_axis = 0;
        let mut best_deviation = f32::NEG_INFINITY;
        for axis in 0..3 {
            let deviation = if half[axis] > 0.0 {
                local[axis].abs() / half[axis]
            } else {
                // Zero thickness: every hit lies on this face
                f32::INFINITY
            };
            if deviation > best_deviation {
                best_axis = axis;
                best_deviation = deviation;
            }
        }

        let mut normal = Vec3A::ZERO;
        normal[best_axis] = if local[best_axis] < 0.0 { -1.0 } else { 1.0 };
        normal
    }
}

impl Hittable for Aabb {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let (t_near, t_far) = self.slab_range(r)?;

        if t_near >= t_far || t_far <= EPSILON {
            return None;
        }
        // Only entry hits count; a ray starting inside the box passes through
        if !ray_t.surrounds(t_near) {
            return None;
        }

        let normal = self.face_normal(r.at(t_near));
        Some(HitRecord::new(r, t_near, normal, self.material))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_box() -> Aabb {
        Aabb::new(Vec3A::splat(-1.0), Vec3A::splat(1.0), Vec3A::Y, 1.0)
    }

    #[test]
    fn principal_axis_rays_enter_and_exit_opposite_faces() {
        let cube = unit_box();
        let axes = [Vec3A::X, Vec3A::Y, Vec3A::Z, Vec3A::NEG_X, Vec3A::NEG_Y, Vec3A::NEG_Z];

        for axis in axes {
            // Offset from the center so the ray crosses the interior off-axis
            let offset = if axis.x != 0.0 { Vec3A::new(0.0, 0.3, -0.2) } else { Vec3A::new(0.25, 0.0, 0.1) * (Vec3A::ONE - axis.abs()) };
            let entry_ray = Ray::new(offset - axis * 5.0, axis);
            let entry = cube.hit(&entry_ray, Interval::FORWARD).expect("ray crosses the box");
            assert_abs_diff_eq!(entry.t, 4.0, epsilon = 1e-5);
            assert_eq!(entry.normal, -axis);
            assert_abs_diff_eq!(entry.normal.length(), 1.0);
            assert!(entry.front_face);

            let exit_ray = Ray::new(offset + axis * 5.0, -axis);
            let exit = cube.hit(&exit_ray, Interval::FORWARD).expect("reverse ray crosses the box");
            assert_abs_diff_eq!(exit.t, 4.0, epsilon = 1e-5);
            assert_eq!(exit.normal, axis);
        }
    }

    #[test]
    fn origin_inside_is_not_a_hit() {
        let cube = unit_box();
        let r = Ray::new(Vec3A::ZERO, Vec3A::X);
        assert!(cube.hit(&r, Interval::FORWARD).is_none());
    }

    #[test]
    fn box_behind_ray_is_missed() {
        let cube = unit_box();
        let r = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::Z);
        assert!(cube.hit(&r, Interval::FORWARD).is_none());
    }

    #[test]
    fn parallel_ray_outside_slab_misses() {
        let cube = unit_box();
        let r = Ray::new(Vec3A::new(0.0, 2.0, 5.0), Vec3A::NEG_Z);
        assert!(cube.hit(&r, Interval::FORWARD).is_none());
    }

    #[test]
    fn parallel_ray_inside_slab_hits() {
        let cube = unit_box();
        let r = Ray::new(Vec3A::new(0.5, -0.5, 5.0), Vec3A::NEG_Z);
        let rec = cube.hit(&r, Interval::FORWARD).unwrap();
        assert_abs_diff_eq!(rec.t, 4.0, epsilon = 1e-5);
        assert_eq!(rec.normal, Vec3A::Z);
    }

    #[test]
    fn diagonal_ray_hits_face_it_enters() {
        let cube = Aabb::new(Vec3A::new(0.4, -0.6, -0.4), Vec3A::new(1.4, 0.6, 0.6), Vec3A::Z, 0.65);
        let origin = Vec3A::new(0.0, 0.5, 4.0);
        let target = Vec3A::new(0.9, 0.0, 0.6);
        let r = Ray::new(origin, (target - origin).normalize());
        let rec = cube.hit(&r, Interval::FORWARD).unwrap();

        assert_abs_diff_eq!(rec.p.z, 0.6, epsilon = 1e-4);
        assert_eq!(rec.normal, Vec3A::Z);
    }

    #[test]
    fn non_cubic_box_normalizes_by_half_extents() {
        // Wide in X: a point near the +Z face but far along X still belongs to +Z
        let slab = Aabb::new(Vec3A::new(-10.0, -1.0, -1.0), Vec3A::new(10.0, 1.0, 1.0), Vec3A::ONE, 1.0);
        assert_eq!(slab.face_normal(Vec3A::new(5.0, 0.0, 1.0)), Vec3A::Z);
        assert_eq!(slab.face_normal(Vec3A::new(-10.0, 0.5, 0.2)), Vec3A::NEG_X);
    }

    #[test]
    fn edge_ties_prefer_x_then_y() {
        let cube = unit_box();
        assert_eq!(cube.face_normal(Vec3A::new(1.0, 1.0, 1.0)), Vec3A::X);
        assert_eq!(cube.face_normal(Vec3A::new(0.0, -1.0, 1.0)), Vec3A::NEG_Y);
    }

    #[test]
    fn flat_box_has_empty_slab_range() {
        let sheet = Aabb::new(Vec3A::new(-1.0, 0.0, -1.0), Vec3A::new(1.0, 0.0, 1.0), Vec3A::ONE, 0.5);
        let r = Ray::new(Vec3A::new(0.2, 3.0, 0.1), Vec3A::NEG_Y);
        assert!(sheet.hit(&r, Interval::FORWARD).is_none());

        // Points on the sheet still map to its thin axis
        assert_eq!(sheet.face_normal(Vec3A::new(0.9, 0.0, 0.9)), Vec3A::Y);
    }
}
