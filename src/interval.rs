//! Interval arithmetic for ray parameter ranges.
//!
//! Ray hits are only accepted strictly inside an open interval of `t`
//! values. The lower bound carries the self-intersection epsilon, the upper
//! bound shrinks to the closest hit found so far.

use crate::EPSILON;

/// Interval [min, max] for range checking.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    /// Minimum value of the interval
    pub min: f32,
    /// Maximum value of the interval
    pub max: f32,
}

impl Interval {
    /// Everything in front of a ray origin, excluding the epsilon shell.
    pub const FORWARD: Interval = Interval {
        min: EPSILON,
        max: f32::INFINITY,
    };

    /// Create a new interval with given min and max values
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Check if the interval contains the given value (inclusive bounds)
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Check if the interval surrounds the given value (exclusive bounds)
    pub fn surrounds(&self, x: f32) -> bool {
        self.min < x && x < self.max
    }

    /// Same lower bound, upper bound replaced.
    pub fn with_max(&self, max: f32) -> Self {
        Self { min: self.min, max }
    }
}
