use crate::types::HistogramConfig;

/// Fixed-range histogram of HU values
///
/// Bins are equal-width and half-open `[lo, hi)`, except the last bin which
/// also includes the upper bound. Values outside the range, and NaN, are
/// counted in `excluded` rather than in any bin.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct Histogram {
    pub config: HistogramConfig,
    pub counts: Vec<u64>,
    pub excluded: u64,
}

impl Histogram {
    /// Bins `values` according to `config`
    pub fn compute<I>(values: I, config: HistogramConfig) -> Self
    where
        I: IntoIterator<Item = f32>,
    {
        let mut counts = vec![0u64; config.bins];
        let mut excluded = 0u64;
        let edges = Self::edges_for(&config);

        for value in values {
            match Self::bin_index(&config, &edges, value as f64) {
                Some(index) => counts[index] += 1,
                None => excluded += 1,
            }
        }

        Self {
            config,
            counts,
            excluded,
        }
    }

    fn edges_for(config: &HistogramConfig) -> Vec<f64> {
        let width = config.bin_width();
        (0..=config.bins)
            .map(|i| {
                if i == config.bins {
                    config.max
                } else {
                    config.min + i as f64 * width
                }
            })
            .collect()
    }

    fn bin_index(config: &HistogramConfig, edges: &[f64], value: f64) -> Option<usize> {
        if value.is_nan() || value < config.min || value > config.max {
            return None;
        }
        let last = config.bins - 1;
        if value == config.max {
            return Some(last);
        }

        let scaled = (value - config.min) / (config.max - config.min) * config.bins as f64;
        let mut index = (scaled as usize).min(last);

        // Rounding in the scaling can land one bin off near an edge
        if value < edges[index] {
            index -= 1;
        } else if index < last && value >= edges[index + 1] {
            index += 1;
        }
        Some(index)
    }

    /// Bin edges, `bins + 1` values from `min` to `max`
    pub fn edges(&self) -> Vec<f64> {
        Self::edges_for(&self.config)
    }

    /// Width of every bin in HU
    pub fn bin_width(&self) -> f64 {
        self.config.bin_width()
    }

    /// Number of values that fell into a bin
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Index and count of the fullest bin, first one on ties
    ///
    /// Returns `None` when every bin is empty.
    pub fn peak_bin(&self) -> Option<(usize, u64)> {
        self.counts
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .fold(None, |best: Option<(usize, u64)>, (i, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((i, count)),
            })
    }

    /// Center HU value of a bin
    pub fn bin_center(&self, index: usize) -> f64 {
        self.config.min + (index as f64 + 0.5) * self.bin_width()
    }
}
