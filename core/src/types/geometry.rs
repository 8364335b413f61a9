use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Extracts every decimal number from a DICOM multi-value string
///
/// Accepts the usual separators seen in the wild:
/// - "0.1\\0.1"
/// - "0.1 0.1"
/// - "[0.1, 0.1]"
/// - Exponential notation: "1.5e-4 1.5e-4"
pub fn parse_numbers(s: &str) -> Vec<f64> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| {
        Regex::new(r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?").expect("Failed to compile regex")
    });

    re.find_iter(s)
        .filter_map(|m| m.as_str().parse().ok())
        .collect()
}

/// Patient-space position of a slice's first voxel, in millimeters
///
/// Taken from ImagePositionPatient (0020,0032). The `z` component is the
/// axial coordinate used to order slices along the stacking axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct ImagePosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl ImagePosition {
    /// Creates a new ImagePosition
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Builds a position from the three values of ImagePositionPatient
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly three values are given
    pub fn from_values(values: &[f64]) -> Result<Self, String> {
        match values {
            [x, y, z] => Ok(Self::new(*x, *y, *z)),
            other => Err(format!(
                "ImagePositionPatient must have 3 values, found {}",
                other.len()
            )),
        }
    }

    /// Parses a position from its string form
    pub fn parse(s: &str) -> Result<Self, String> {
        Self::from_values(&parse_numbers(s))
            .map_err(|e| format!("Failed to parse ImagePositionPatient from '{}': {}", s, e))
    }
}

impl fmt::Display for ImagePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}) mm", self.x, self.y, self.z)
    }
}

/// Pixel spacing in millimeters (row, column)
///
/// Represents the physical spacing between adjacent pixels
/// within a slice, measured in mm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct PixelSpacing {
    pub row: f64,
    pub col: f64,
}

impl PixelSpacing {
    /// Creates a new PixelSpacing
    pub fn new(row: f64, col: f64) -> Self {
        Self { row, col }
    }

    /// Parses pixel spacing from string
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two numbers can be found
    pub fn parse(s: &str) -> Result<Self, String> {
        match parse_numbers(s).as_slice() {
            [row, col, ..] => Ok(Self::new(*row, *col)),
            _ => Err(format!("Failed to parse PixelSpacing from '{}'", s)),
        }
    }
}

impl fmt::Display for PixelSpacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} mm", self.row, self.col)
    }
}
