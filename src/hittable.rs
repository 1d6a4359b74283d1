//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, the HitRecord they
//! produce, and the nearest-hit resolver over a list of primitives.

use glam::Vec3A;

use crate::interval::Interval;
use crate::material::MaterialType;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Produced and consumed within a single compositing step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Outward surface normal at the intersection point (unit vector)
    pub normal: Vec3A,
    /// Ray parameter of the intersection point
    pub t: f32,
    /// True if the ray arrives from the side the normal points to
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: MaterialType,
}

impl HitRecord {
    /// Build a record for a hit at `t` along `r`.
    pub fn new(r: &Ray, t: f32, outward_normal: Vec3A, material: MaterialType) -> Self {
        let mut rec = Self {
            p: r.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set the outward surface normal and determine front/back face.
    ///
    /// The stored normal always points away from the surface; callers that
    /// need it facing the ray can flip it using `front_face`.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: Vec3A) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = outward_normal;
    }
}

/// How a primitive takes part in nearest-hit resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    /// Finite object, depth-compared against other objects.
    Object,
    /// Infinite backdrop, only considered when no object is hit.
    Backdrop,
}

/// Trait for objects that can be intersected by rays.
///
/// Must be thread-safe (Sync + Send) so a scene can be shared by the
/// parallel pixel loop.
pub trait Hittable: Sync + Send {
    /// Intersection with a parameter strictly inside `ray_t`, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Resolution layer of this primitive.
    fn layer(&self) -> Layer {
        Layer::Object
    }
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through Box<dyn Hittable>.
#[derive(Default)]
pub struct HittableList {
    /// Vector of boxed hittable objects
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Number of objects in the list.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the list holds no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Closest hit among the objects of one layer.
    pub fn nearest(&self, r: &Ray, ray_t: Interval, layer: Layer) -> Option<HitRecord> {
        self.nearest_where(r, ray_t, |object| object.layer() == layer)
    }

    /// Resolve the hit that a ray sees first.
    ///
    /// Objects are depth-compared against each other. Backdrops are only
    /// tested when no object is hit, so a backdrop in front of an object is
    /// ignored. Passing `depth_test_backdrop` compares every primitive by
    /// distance instead.
    pub fn resolve(&self, r: &Ray, ray_t: Interval, depth_test_backdrop: bool) -> Option<HitRecord> {
        if depth_test_backdrop {
            return self.nearest_where(r, ray_t, |_| true);
        }
        self.nearest(r, ray_t, Layer::Object)
            .or_else(|| self.nearest(r, ray_t, Layer::Backdrop))
    }

    fn nearest_where<F>(&self, r: &Ray, ray_t: Interval, mut include: F) -> Option<HitRecord>
    where
        F: FnMut(&dyn Hittable) -> bool,
    {
        let mut closest: Option<HitRecord> = None;
        let mut closest_so_far = ray_t.max;

        for object in &self.objects {
            if !include(&**object) {
                continue;
            }
            if let Some(rec) = object.hit(r, ray_t.with_max(closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}
