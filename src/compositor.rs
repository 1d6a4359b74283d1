//! Bounded see-through compositing along a single ray.
//!
//! A pixel's ray is pushed straight through up to `max_bounces` translucent
//! surfaces. Each surface adds its color weighted by the light still reaching
//! it (the transmittance) and by its alpha, then lets `1 - alpha` of that
//! light continue. An opaque backdrop or the background ends the pixel.

use glam::Vec3A;

use crate::error::{Error, Result};
use crate::interval::Interval;
use crate::material::Color;
use crate::ray::Ray;
use crate::scene::Scene;
use crate::{DEFAULT_BOUNCES, EPSILON, MAX_BOUNCES, TRANSMITTANCE_CUTOFF};

/// Per-frame tracing parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceSettings {
    /// Maximum number of compositing iterations per pixel.
    pub max_bounces: u32,
    /// Color seen where nothing is hit.
    pub background: Color,
    /// Depth-compare backdrops against finite objects instead of using them
    /// only as a fallback.
    pub depth_test_backdrop: bool,
}

impl Default for TraceSettings {
    fn default() -> Self {
        Self {
            max_bounces: DEFAULT_BOUNCES,
            background: Vec3A::new(0.1, 0.1, 0.15),
            depth_test_backdrop: false,
        }
    }
}

impl TraceSettings {
    /// Check that the settings describe a usable frame.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_BOUNCES).contains(&self.max_bounces) {
            return Err(Error::InvalidSettings(format!(
                "max_bounces must be between 1 and {MAX_BOUNCES}, got {}",
                self.max_bounces
            )));
        }
        if !self.background.is_finite() || self.background.min_element() < 0.0 {
            return Err(Error::InvalidSettings(format!(
                "background must be a non-negative color, got {:?}",
                self.background
            )));
        }
        Ok(())
    }
}

/// Outcome of one compositing iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Passed through a translucent surface at `t`; compositing continues.
    Transmitted {
        /// Ray parameter of the surface.
        t: f32,
    },
    /// Stopped on an opaque surface at `t`.
    Opaque {
        /// Ray parameter of the surface.
        t: f32,
    },
    /// Nothing was hit; the background color was added.
    Background,
    /// Remaining transmittance fell below the cutoff.
    Extinguished,
    /// The bounce budget is used up.
    Exhausted,
}

impl Step {
    /// True if compositing ends with this step.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Step::Transmitted { .. })
    }
}

/// Compositing state for one pixel.
#[derive(Clone)]
pub struct Compositor<'a> {
    scene: &'a Scene,
    settings: &'a TraceSettings,
    ray: Ray,
    color: Color,
    transmittance: f32,
    bounces: u32,
    finished: bool,
}

impl<'a> Compositor<'a> {
    /// Start compositing along `ray`: black, fully transmissive.
    pub fn new(ray: Ray, scene: &'a Scene, settings: &'a TraceSettings) -> Self {
        Self {
            scene,
            settings,
            ray,
            color: Color::ZERO,
            transmittance: 1.0,
            bounces: 0,
            finished: false,
        }
    }

    /// Color accumulated so far.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Fraction of light still reaching the current ray origin.
    pub fn transmittance(&self) -> f32 {
        self.transmittance
    }

    /// Number of iterations that looked for a surface.
    pub fn bounces(&self) -> u32 {
        self.bounces
    }

    /// Ray the next iteration will trace.
    pub fn ray(&self) -> Ray {
        self.ray
    }

    /// True once a terminal step has been taken.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Run one iteration. Returns `None` once compositing has finished.
    pub fn step(&mut self) -> Option<Step> {
        if self.finished {
            return None;
        }

        let step = self.advance();
        self.finished = step.is_terminal();
        Some(step)
    }

    fn advance(&mut self) -> Step {
        if self.bounces >= self.settings.max_bounces {
            return Step::Exhausted;
        }
        if self.transmittance < TRANSMITTANCE_CUTOFF {
            return Step::Extinguished;
        }
        self.bounces += 1;

        let Some(rec) = self.scene.objects.resolve(&self.ray, Interval::FORWARD, self.settings.depth_test_backdrop)
        else {
            self.color += self.transmittance * self.settings.background;
            return Step::Background;
        };

        let contribution = rec.material.contribution();
        self.color += self.transmittance * contribution.color;
        match contribution.pass_through {
            Some(pass_through) => {
                self.transmittance *= pass_through;
                // Step past the surface so it is not hit again
                self.ray = self.ray.advanced(rec.t + 2.0 * EPSILON);
                Step::Transmitted { t: rec.t }
            }
            None => Step::Opaque { t: rec.t },
        }
    }

    /// Run to completion and return the pixel color.
    pub fn run(mut self) -> Color {
        while self.step().is_some() {}
        self.color
    }
}

/// Final color seen along `ray`.
pub fn trace(ray: Ray, scene: &Scene, settings: &TraceSettings) -> Color {
    Compositor::new(ray, scene, settings).run()
}
