//! Scene files.
//!
//! A scene file is TOML. Every section is optional: a missing `[camera]` or
//! `[render]` table (or any field in them) takes the built-in demo value,
//! while missing primitive arrays mean "no primitives of that kind".
//!
//! ```toml
//! [camera]
//! lookfrom = [0.0, 0.5, 4.0]
//! lookat = [0.0, 0.0, 0.0]
//! vup = [0.0, 1.0, 0.0]
//! vfov = 60.0
//!
//! [render]
//! width = 800
//! height = 600
//! max_bounces = 3
//! background = [0.1, 0.1, 0.15]
//! depth_test_backdrop = false
//!
//! [[sphere]]
//! center = [-0.8, 0.0, 0.0]
//! radius = 0.7
//! color = [1.0, 0.3, 0.3]
//! alpha = 0.5
//!
//! [[box]]
//! min = [0.4, -0.6, -0.4]
//! max = [1.4, 0.6, 0.6]
//! color = [0.3, 0.3, 1.0]
//! alpha = 0.65
//!
//! [[plane]]
//! normal = [0.0, 0.0, 1.0]
//! offset = -2.0
//! color1 = [0.8, 0.8, 0.8]
//! color2 = [0.3, 0.3, 0.3]
//! scale = 1.5
//! ```

use std::path::Path;

use glam::Vec3A;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::aabb::Aabb;
use crate::camera::Camera;
use crate::compositor::TraceSettings;
use crate::error::{Error, Result};
use crate::material::{Checker, Color};
use crate::plane::CheckerPlane;
use crate::scene::{Frame, Scene};
use crate::sphere::Sphere;
use crate::DEFAULT_BOUNCES;

/// Complete description of a frame as read from a scene file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    /// View parameters.
    #[serde(default)]
    pub camera: CameraConfig,
    /// Resolution and tracing parameters.
    #[serde(default)]
    pub render: RenderConfig,
    /// Translucent spheres.
    #[serde(default, rename = "sphere")]
    pub spheres: Vec<SphereConfig>,
    /// Translucent axis-aligned boxes.
    #[serde(default, rename = "box")]
    pub boxes: Vec<BoxConfig>,
    /// Checkered backdrop planes.
    #[serde(default, rename = "plane")]
    pub planes: Vec<PlaneConfig>,
}

/// Camera section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    /// Camera position.
    pub lookfrom: Vec3A,
    /// Look-at target.
    pub lookat: Vec3A,
    /// Up hint.
    pub vup: Vec3A,
    /// Vertical field of view in degrees.
    pub vfov: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            lookfrom: Vec3A::new(0.0, 0.5, 4.0),
            lookat: Vec3A::ZERO,
            vup: Vec3A::Y,
            vfov: 60.0,
        }
    }
}

/// Render section.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Compositing iterations per pixel.
    pub max_bounces: u32,
    /// Color where nothing is hit.
    pub background: Vec3A,
    /// Depth-compare planes against finite objects.
    pub depth_test_backdrop: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        let settings = TraceSettings::default();
        Self {
            width: 800,
            height: 600,
            max_bounces: DEFAULT_BOUNCES,
            background: settings.background,
            depth_test_backdrop: settings.depth_test_backdrop,
        }
    }
}

/// One `[[sphere]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SphereConfig {
    /// Center point.
    pub center: Vec3A,
    /// Radius, positive.
    pub radius: f32,
    /// RGB color in [0, 1].
    pub color: Color,
    /// Opacity in [0, 1].
    #[serde(default = "opaque")]
    pub alpha: f32,
}

/// One `[[box]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BoxConfig {
    /// Corner with the smallest coordinates.
    pub min: Vec3A,
    /// Corner with the largest coordinates.
    pub max: Vec3A,
    /// RGB color in [0, 1].
    pub color: Color,
    /// Opacity in [0, 1].
    #[serde(default = "opaque")]
    pub alpha: f32,
}

/// One `[[plane]]` entry.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlaneConfig {
    /// Plane normal; normalized when the scene is built.
    pub normal: Vec3A,
    /// Signed offset `d` in `dot(p, normal) = d`, for the normalized normal.
    pub offset: f32,
    /// Checker color of even cells.
    pub color1: Color,
    /// Checker color of odd cells.
    pub color2: Color,
    /// Checker cells per world unit.
    #[serde(default = "unit_scale")]
    pub scale: f32,
}

fn opaque() -> f32 {
    1.0
}

fn unit_scale() -> f32 {
    1.0
}

impl Default for SceneConfig {
    /// The built-in demo: a translucent red sphere and a translucent blue box
    /// in front of a gray checkered wall.
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            render: RenderConfig::default(),
            spheres: vec![SphereConfig {
                center: Vec3A::new(-0.8, 0.0, 0.0),
                radius: 0.7,
                color: Vec3A::new(1.0, 0.3, 0.3),
                alpha: 0.5,
            }],
            boxes: vec![BoxConfig {
                min: Vec3A::new(0.4, -0.6, -0.4),
                max: Vec3A::new(1.4, 0.6, 0.6),
                color: Vec3A::new(0.3, 0.3, 1.0),
                alpha: 0.65,
            }],
            planes: vec![PlaneConfig {
                normal: Vec3A::Z,
                offset: -2.0,
                color1: Vec3A::splat(0.8),
                color2: Vec3A::splat(0.3),
                scale: 1.5,
            }],
        }
    }
}

impl SceneConfig {
    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded scene file {} ({} bytes)", path.display(), text.len());
        Self::from_toml(&text)
    }

    /// Parse a scene from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Tracing parameters of the render section.
    pub fn trace_settings(&self) -> TraceSettings {
        TraceSettings {
            max_bounces: self.render.max_bounces,
            background: self.render.background,
            depth_test_backdrop: self.render.depth_test_backdrop,
        }
    }

    /// Validate everything and build the frame.
    pub fn build(&self) -> Result<Frame> {
        let CameraConfig { lookfrom, lookat, vup, vfov } = self.camera;
        let camera = Camera::new(lookfrom, lookat, vup, vfov)?;

        if self.render.width == 0 || self.render.height == 0 {
            return Err(Error::InvalidSettings(format!(
                "resolution must be non-zero, got {}x{}",
                self.render.width, self.render.height
            )));
        }
        let settings = self.trace_settings();
        settings.validate()?;

        let mut scene = Scene::new();
        for (index, sphere) in self.spheres.iter().enumerate() {
            scene.add(sphere.build(index)?);
        }
        for (index, cuboid) in self.boxes.iter().enumerate() {
            scene.add(cuboid.build(index)?);
        }
        for (index, plane) in self.planes.iter().enumerate() {
            scene.add(plane.build(index)?);
        }
        debug!(
            "Scene has {} spheres, {} boxes, {} planes",
            self.spheres.len(),
            self.boxes.len(),
            self.planes.len()
        );

        Ok(Frame {
            camera,
            scene,
            settings,
            width: self.render.width,
            height: self.render.height,
        })
    }
}

impl SphereConfig {
    fn build(&self, index: usize) -> Result<Sphere> {
        let invalid = |reason: String| Error::InvalidPrimitive {
            kind: "sphere",
            index,
            reason,
        };
        if !self.center.is_finite() {
            return Err(invalid(format!("center must be finite, got {:?}", self.center)));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(invalid(format!("radius must be positive, got {}", self.radius)));
        }
        check_color(self.color, "color").map_err(invalid)?;
        check_unit(self.alpha, "alpha").map_err(invalid)?;
        Ok(Sphere::new(self.center, self.radius, self.color, self.alpha))
    }
}

impl BoxConfig {
    fn build(&self, index: usize) -> Result<Aabb> {
        let invalid = |reason: String| Error::InvalidPrimitive {
            kind: "box",
            index,
            reason,
        };
        if !(self.min.is_finite() && self.max.is_finite()) {
            return Err(invalid("corners must be finite".to_string()));
        }
        if self.min.cmpgt(self.max).any() {
            return Err(invalid(format!(
                "min {:?} exceeds max {:?}",
                self.min, self.max
            )));
        }
        check_color(self.color, "color").map_err(invalid)?;
        check_unit(self.alpha, "alpha").map_err(invalid)?;
        Ok(Aabb::new(self.min, self.max, self.color, self.alpha))
    }
}

impl PlaneConfig {
    fn build(&self, index: usize) -> Result<CheckerPlane> {
        let invalid = |reason: String| Error::InvalidPrimitive {
            kind: "plane",
            index,
            reason,
        };
        if !(self.normal.is_finite() && self.offset.is_finite()) {
            return Err(invalid("normal and offset must be finite".to_string()));
        }
        let normal = self
            .normal
            .try_normalize()
            .ok_or_else(|| invalid("normal must be non-zero".to_string()))?;
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(invalid(format!("checker scale must be positive, got {}", self.scale)));
        }
        check_color(self.color1, "color1").map_err(invalid)?;
        check_color(self.color2, "color2").map_err(invalid)?;
        let checker = Checker::new(self.color1, self.color2, self.scale);
        Ok(CheckerPlane::new(normal, self.offset, checker))
    }
}

fn check_unit(value: f32, name: &str) -> std::result::Result<(), String> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(format!("{name} must be in [0, 1], got {value}"))
    }
}

fn check_color(color: Color, name: &str) -> std::result::Result<(), String> {
    if color.is_finite() && color.cmpge(Vec3A::ZERO).all() && color.cmple(Vec3A::ONE).all() {
        Ok(())
    } else {
        Err(format!("{name} components must be in [0, 1], got {color:?}"))
    }
}
