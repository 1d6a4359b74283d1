//! Scene and frame description.
//!
//! A [`Scene`] is an immutable list of primitives for the duration of a
//! frame. A [`Frame`] bundles everything one rendered image depends on.

use image::{ImageBuffer, Rgb};

use crate::camera::Camera;
use crate::compositor::{self, TraceSettings};
use crate::hittable::{Hittable, HittableList};
use crate::material::Color;

/// Primitives visible to the tracer.
#[derive(Default)]
pub struct Scene {
    /// Every primitive, finite objects and backdrops alike.
    pub objects: HittableList,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            objects: HittableList::new(),
        }
    }

    /// Add a primitive.
    pub fn add<H: Hittable + 'static>(&mut self, object: H) {
        self.objects.add(Box::new(object));
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// Validated inputs of one rendered frame.
pub struct Frame {
    /// View.
    pub camera: Camera,
    /// Primitives.
    pub scene: Scene,
    /// Compositing parameters.
    pub settings: TraceSettings,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Frame {
    /// Color of pixel `(i, j)`, row 0 at the top.
    pub fn pixel(&self, i: u32, j: u32) -> Color {
        let r = self.camera.get_ray(i, j, self.width, self.height);
        compositor::trace(r, &self.scene, &self.settings)
    }

    /// Trace every pixel of the frame.
    pub fn render(&self) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.camera.render(&self.scene, &self.settings, self.width, self.height)
    }
}
