//! Seethrough analytic ray tracer
//!
//! Casts one ray per pixel from a pinhole camera into a small scene of
//! spheres, axis-aligned boxes and checkered planes, and composites the
//! colors met along that ray with a bounded number of see-through passes.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod aabb;
pub mod camera;
pub mod compositor;
pub mod config;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod plane;
pub mod ray;
pub mod scene;
pub mod sphere;

pub use camera::Camera;
pub use compositor::{Compositor, Step, TraceSettings};
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use scene::Scene;

/// Distance tolerance used to reject self-intersections and degenerate
/// denominators. Every distance comparison in the tracer uses it.
pub const EPSILON: f32 = 1e-3;

/// Default number of see-through passes per pixel.
pub const DEFAULT_BOUNCES: u32 = 3;

/// Largest bounce budget a scene may request.
pub const MAX_BOUNCES: u32 = 16;

/// Compositing stops once less than this fraction of light remains.
pub const TRANSMITTANCE_CUTOFF: f32 = 0.01;
