//! Surface materials for see-through compositing.
//!
//! Finite objects are translucent: they tint the ray by their color weighted
//! by alpha and let `1 - alpha` of the light continue straight through.
//! Backdrops are opaque terminators and end the pixel's compositing.

use glam::Vec3A;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// Material carried by a hit record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaterialType {
    /// Partially transparent surface of a finite object.
    Translucent {
        /// Surface color.
        albedo: Color,
        /// Opacity in [0, 1]; 0 has no visual effect, 1 is opaque.
        alpha: f32,
    },

    /// Opaque backdrop; always the last term of a pixel.
    Backdrop {
        /// Color at the hit point (already resolved from any pattern).
        albedo: Color,
    },
}

/// What a single surface adds to a pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contribution {
    /// Color added before weighting by the incoming transmittance.
    pub color: Color,
    /// Fraction of light passing through, `None` when the surface terminates
    /// the ray.
    pub pass_through: Option<f32>,
}

impl MaterialType {
    /// Color and transmission of this material for one compositing step.
    pub fn contribution(&self) -> Contribution {
        match *self {
            MaterialType::Translucent { albedo, alpha } => Contribution {
                color: albedo * alpha,
                pass_through: Some(1.0 - alpha),
            },
            MaterialType::Backdrop { albedo } => Contribution {
                color: albedo,
                pass_through: None,
            },
        }
    }
}

/// Two-color procedural checkerboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Checker {
    /// Color of cells whose index sum is even.
    pub color1: Color,
    /// Color of cells whose index sum is odd.
    pub color2: Color,
    /// Cells per world unit.
    pub scale: f32,
}

impl Checker {
    /// Create a checker pattern.
    pub fn new(color1: Color, color2: Color, scale: f32) -> Self {
        Self { color1, color2, scale }
    }

    /// Pattern color at 2D surface coordinates `(u, v)`.
    pub fn value(&self, u: f32, v: f32) -> Color {
        // Euclidean remainder keeps the parity correct for negative cells.
        let pattern = ((u * self.scale).floor() + (v * self.scale).floor()).rem_euclid(2.0);
        if pattern < 0.5 {
            self.color1
        } else {
            self.color2
        }
    }
}
