use std::fmt;

/// Modality LUT linear transform from stored pixel values to HU
///
/// `HU = stored * slope + intercept`. Missing RescaleSlope and
/// RescaleIntercept tags fall back to the identity transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Rescale {
    pub slope: f64,
    pub intercept: f64,
}

impl Default for Rescale {
    fn default() -> Self {
        Self {
            slope: 1.0,
            intercept: 0.0,
        }
    }
}

impl Rescale {
    /// Creates a new Rescale
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Builds a rescale from optional tag values, defaulting to (1, 0)
    pub fn from_tags(slope: Option<f64>, intercept: Option<f64>) -> Self {
        let default = Self::default();
        Self {
            slope: slope.unwrap_or(default.slope),
            intercept: intercept.unwrap_or(default.intercept),
        }
    }

    /// Applies the transform in single precision
    ///
    /// The stored value is widened to `f32` first, and slope and intercept are
    /// applied in `f32`, so the HU volume matches a float32 pixel array.
    #[inline]
    pub fn apply(&self, stored: i32) -> f32 {
        stored as f32 * self.slope as f32 + self.intercept as f32
    }

    /// Whether this is the identity transform
    pub fn is_identity(&self) -> bool {
        self.slope == 1.0 && self.intercept == 0.0
    }
}

impl fmt::Display for Rescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x * {} + {}", self.slope, self.intercept)
    }
}
