/// Grayscale display window in HU
///
/// Values at or below `min` render black, values at or above `max` render
/// white, and values in between map linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct DisplayWindow {
    pub min: f32,
    pub max: f32,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self {
            min: -1000.0,
            max: 400.0,
        }
    }
}

impl DisplayWindow {
    /// Creates a new DisplayWindow
    pub fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Maps an HU value to an 8-bit gray level
    #[inline]
    pub fn gray_level(&self, hu: f32) -> u8 {
        if hu.is_nan() || hu <= self.min {
            return 0;
        }
        if hu >= self.max {
            return u8::MAX;
        }
        let t = (hu - self.min) / (self.max - self.min);
        (t * u8::MAX as f32).round() as u8
    }
}

/// Binning of the HU histogram
///
/// The default is 200 equal-width bins over [-1000, 2000] HU, used
/// regardless of the data's actual range.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HistogramConfig {
    pub bins: usize,
    pub min: f64,
    pub max: f64,
}

impl Default for HistogramConfig {
    fn default() -> Self {
        Self {
            bins: 200,
            min: -1000.0,
            max: 2000.0,
        }
    }
}

impl HistogramConfig {
    /// Creates a new HistogramConfig
    ///
    /// # Errors
    ///
    /// Returns an error for zero bins or an empty or inverted range
    pub fn new(bins: usize, min: f64, max: f64) -> Result<Self, String> {
        if bins == 0 {
            return Err("histogram needs at least one bin".to_string());
        }
        if !(min < max) {
            return Err(format!("invalid histogram range [{}, {}]", min, max));
        }
        Ok(Self { bins, min, max })
    }

    /// Width of every bin in HU
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / self.bins as f64
    }
}
