use super::{HistogramConfig, InvalidFilePolicy, SliceOrder};

/// Configuration for loading a CT series into a volume
///
/// Defaults reproduce the plain viewer behavior: slices ordered by
/// InstanceNumber and any unreadable `.dcm` file aborts the load.
///
/// # Example
///
/// ```
/// use ctvolume_core::{InvalidFilePolicy, LoadOptions, SliceOrder};
///
/// let options = LoadOptions::default()
///     .with_order(SliceOrder::PatientPosition)
///     .skip_invalid_files(true);
///
/// assert_eq!(options.order, SliceOrder::PatientPosition);
/// assert_eq!(options.invalid_files, InvalidFilePolicy::Skip);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LoadOptions {
    /// Slice ordering along the stacking axis
    pub order: SliceOrder,

    /// Handling of unreadable `.dcm` files
    pub invalid_files: InvalidFilePolicy,

    /// Binning for the HU histogram
    pub histogram: HistogramConfig,
}

impl LoadOptions {
    /// Builder: Set the slice ordering
    ///
    /// # Example
    ///
    /// ```
    /// use ctvolume_core::{LoadOptions, SliceOrder};
    ///
    /// let options = LoadOptions::default().with_order(SliceOrder::Auto);
    /// assert_eq!(options.order, SliceOrder::Auto);
    /// ```
    pub fn with_order(mut self, order: SliceOrder) -> Self {
        self.order = order;
        self
    }

    /// Builder: Skip unreadable files instead of aborting
    pub fn skip_invalid_files(mut self, skip: bool) -> Self {
        self.invalid_files = if skip {
            InvalidFilePolicy::Skip
        } else {
            InvalidFilePolicy::Abort
        };
        self
    }

    /// Builder: Set the histogram binning
    pub fn with_histogram(mut self, histogram: HistogramConfig) -> Self {
        self.histogram = histogram;
        self
    }
}
