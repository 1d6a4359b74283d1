//! Pinhole camera for ray generation and frame rendering

use glam::{Vec2, Vec3A};
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;

use crate::compositor::{self, TraceSettings};
use crate::error::{Error, Result};
use crate::ray::Ray;
use crate::scene::Scene;

/// Squared lengths below this are treated as zero when validating the view.
const DEGENERATE: f32 = 1e-12;

/// Pinhole camera with a vertical field of view.
///
/// The view basis is derived once in [`Camera::new`] and never changes, so a
/// camera can be shared by every pixel of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Point camera is looking from (camera position)
    lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    lookat: Vec3A,
    /// Camera-relative "up" direction vector
    vup: Vec3A,
    /// Vertical field of view in degrees
    vfov: f32,

    /// Unit view direction
    forward: Vec3A,
    /// Unit vector pointing to the right of the image
    right: Vec3A,
    /// Unit vector pointing to the top of the image, orthogonal to `forward`
    up: Vec3A,
    /// Distance to the image plane spanning [-1, 1] vertically
    focal_length: f32,
}

impl Camera {
    /// Build a camera, rejecting parameters that cannot form a view basis.
    ///
    /// `vfov` must lie strictly between 0 and 180 degrees, `lookat` must
    /// differ from `lookfrom`, and `vup` must not be parallel to the view
    /// direction.
    pub fn new(lookfrom: Vec3A, lookat: Vec3A, vup: Vec3A, vfov: f32) -> Result<Self> {
        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(Error::InvalidCamera(format!(
                "vertical field of view must be in (0, 180) degrees, got {vfov}"
            )));
        }
        if !(lookfrom.is_finite() && lookat.is_finite() && vup.is_finite()) {
            return Err(Error::InvalidCamera("camera vectors must be finite".to_string()));
        }

        let view = lookat - lookfrom;
        if view.length_squared() < DEGENERATE {
            return Err(Error::InvalidCamera(
                "lookfrom and lookat must be distinct points".to_string(),
            ));
        }
        let forward = view.normalize();

        let side = forward.cross(vup);
        if side.length_squared() < DEGENERATE {
            return Err(Error::InvalidCamera(
                "vup must not be parallel to the view direction".to_string(),
            ));
        }
        let right = side.normalize();
        let up = right.cross(forward).normalize();

        let focal_length = 1.0 / (vfov.to_radians() * 0.5).tan();

        Ok(Self {
            lookfrom,
            lookat,
            vup,
            vfov,
            forward,
            right,
            up,
            focal_length,
        })
    }

    /// Camera position.
    pub fn lookfrom(&self) -> Vec3A {
        self.lookfrom
    }

    /// Look-at target.
    pub fn lookat(&self) -> Vec3A {
        self.lookat
    }

    /// Up hint the basis was built from.
    pub fn vup(&self) -> Vec3A {
        self.vup
    }

    /// Vertical field of view in degrees.
    pub fn vfov(&self) -> f32 {
        self.vfov
    }

    /// Unit view direction.
    pub fn forward(&self) -> Vec3A {
        self.forward
    }

    /// Unit right vector of the image plane.
    pub fn right(&self) -> Vec3A {
        self.right
    }

    /// Unit up vector of the image plane.
    pub fn up(&self) -> Vec3A {
        self.up
    }

    /// `1 / tan(vfov / 2)`.
    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    /// Normalized device coordinate of the center of pixel `(i, j)`.
    ///
    /// Row 0 is the top of the image. The vertical extent maps to [-1, 1] and
    /// the horizontal one to [-aspect, aspect], so the field of view is
    /// anchored to the vertical axis whatever the image shape.
    pub fn pixel_uv(i: u32, j: u32, width: u32, height: u32) -> Vec2 {
        let resolution = Vec2::new(width as f32, height as f32);
        // Fragment coordinates grow upwards from the bottom-left corner
        let frag = Vec2::new(i as f32 + 0.5, height as f32 - j as f32 - 0.5);
        (2.0 * frag - resolution) / resolution.y
    }

    /// Unit-length ray through normalized device coordinate `uv`.
    pub fn ray_for_uv(&self, uv: Vec2) -> Ray {
        let direction = (uv.x * self.right + uv.y * self.up + self.focal_length * self.forward).normalize();
        Ray::new(self.lookfrom, direction)
    }

    /// Ray through the center of pixel `(i, j)`.
    pub fn get_ray(&self, i: u32, j: u32, width: u32, height: u32) -> Ray {
        self.ray_for_uv(Self::pixel_uv(i, j, width, height))
    }

    /// Renders one frame of the scene on the CPU.
    ///
    /// Every pixel is an independent pure function of the camera, scene and
    /// settings, so pixels are traced in parallel with Rayon.
    ///
    /// Returns an image buffer with linear, unclamped f32 RGB values.
    pub fn render(
        &self,
        scene: &Scene,
        settings: &TraceSettings,
        width: u32,
        height: u32,
    ) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> = ImageBuffer::new(width, height);

        info!("Tracing {}x{} pixels using {} CPU cores...", width, height, rayon::current_num_threads());
        debug!(
            "Camera at {:?} looking at {:?}, vfov {}, focal length {:.4}",
            self.lookfrom, self.lookat, self.vfov, self.focal_length
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new(u64::from(width) * u64::from(height));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let r = self.get_ray(i, j, width, height);
            let color = compositor::trace(r, scene, settings);
            *pixel = Rgb([color.x, color.y, color.z]);
            pb.inc(1);
        });

        pb.finish_and_clear();
        info!("Frame traced in {:.2?}", generation_start.elapsed());

        image
    }
}
