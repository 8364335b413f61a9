use crate::archive::ExtractedArchive;
use crate::error::Result;
use crate::selection::{discover_ct_slices, sort_slices};
use crate::types::{LoadOptions, PixelSpacing, SliceOrder};
use crate::volume::{Histogram, HuStatistics, HuVolume};
use log::info;
use std::path::Path;

/// Main entry point for turning a CT series into an HU volume
///
/// Runs the whole pipeline in one pass: extract, discover `.dcm` files, keep
/// CT slices, order them, rescale to HU and stack. Nothing is visualized
/// unless the volume was assembled completely.
///
/// # Example
///
/// ```no_run
/// use ctvolume_core::{CtVolumeLoader, LoadOptions};
///
/// let bytes = std::fs::read("series.zip").unwrap();
/// let loaded = CtVolumeLoader::load_zip_bytes(&bytes, &LoadOptions::default()).unwrap();
///
/// println!("{} slices, middle is #{}", loaded.volume.len(), loaded.volume.middle_index());
/// ```
pub struct CtVolumeLoader;

impl CtVolumeLoader {
    /// Loads a volume from an in-memory ZIP archive
    ///
    /// The archive is extracted into a temporary directory that is removed
    /// before this function returns, on success and on error alike.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The bytes are not a valid ZIP archive
    /// - The archive holds no CT slice
    /// - A `.dcm` file cannot be read (unless invalid files are skipped)
    /// - A slice lacks the ordering key or has a different shape
    pub fn load_zip_bytes(bytes: &[u8], options: &LoadOptions) -> Result<LoadedVolume> {
        let archive = ExtractedArchive::from_bytes(bytes)?;
        Self::load_directory(archive.path(), options)
    }

    /// Loads a volume from a ZIP file on disk
    pub fn load_zip_file(path: &Path, options: &LoadOptions) -> Result<LoadedVolume> {
        info!("Loading archive: {}", path.display());
        let archive = ExtractedArchive::from_file(path)?;
        Self::load_directory(archive.path(), options)
    }

    /// Loads a volume from an already-extracted directory tree
    pub fn load_directory(root: &Path, options: &LoadOptions) -> Result<LoadedVolume> {
        let mut records = discover_ct_slices(root, options)?;
        let order = sort_slices(&mut records, options.order, options.invalid_files)?;
        let volume = HuVolume::from_slices(&records)?;
        let histogram = Histogram::compute(volume.voxels(), options.histogram);

        let (slices, rows, cols) = volume.shape();
        info!("Assembled volume of {} x {} x {}", slices, rows, cols);

        Ok(LoadedVolume {
            volume,
            order,
            histogram,
        })
    }
}

/// A fully assembled volume together with how it was built
#[derive(Debug, Clone)]
pub struct LoadedVolume {
    /// The stacked HU volume
    pub volume: HuVolume,

    /// The ordering strategy actually applied (`Auto` resolved)
    pub order: SliceOrder,

    /// Histogram over every voxel
    pub histogram: Histogram,
}

impl LoadedVolume {
    /// Summarizes the volume for display of slice `slice_index`
    pub fn summary(&self, slice_index: usize) -> VolumeSummary {
        let (slices, rows, columns) = self.volume.shape();
        VolumeSummary {
            slices,
            rows,
            columns,
            order: self.order,
            displayed_slice: slice_index,
            instance_numbers: self.volume.instance_numbers(),
            pixel_spacing: self.volume.pixel_spacing(),
            slice_spacing: self.volume.slice_spacing(),
            statistics: self.volume.statistics(),
            histogram_counts: self.histogram.counts.clone(),
            histogram_excluded: self.histogram.excluded,
            histogram_peak: self
                .histogram
                .peak_bin()
                .map(|(index, count)| (self.histogram.bin_center(index), count)),
        }
    }
}

/// Reportable facts about a loaded volume
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct VolumeSummary {
    /// Number of slices
    pub slices: usize,

    /// Rows per slice
    pub rows: usize,

    /// Columns per slice
    pub columns: usize,

    /// Ordering strategy applied
    pub order: SliceOrder,

    /// Index of the slice being displayed
    pub displayed_slice: usize,

    /// InstanceNumber of each slice in volume order
    pub instance_numbers: Vec<Option<i32>>,

    /// In-plane pixel spacing
    pub pixel_spacing: Option<PixelSpacing>,

    /// Spacing between slices
    pub slice_spacing: Option<f64>,

    /// HU statistics over all voxels
    pub statistics: Option<HuStatistics>,

    /// Histogram bin counts
    pub histogram_counts: Vec<u64>,

    /// Voxels outside the histogram range
    pub histogram_excluded: u64,

    /// Center HU and count of the fullest histogram bin
    pub histogram_peak: Option<(f64, u64)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HistogramConfig;
    use ndarray::Array3;

    #[test]
    fn test_summary_of_loaded_volume() {
        let data = Array3::from_shape_vec((3, 1, 2), vec![-1000.0, -1000.0, 0.0, 0.0, 0.0, 3000.0])
            .unwrap();
        let volume = HuVolume::from_array(data);
        let histogram = Histogram::compute(volume.voxels(), HistogramConfig::default());
        let loaded = LoadedVolume {
            volume,
            order: SliceOrder::InstanceNumber,
            histogram,
        };

        let summary = loaded.summary(1);
        assert_eq!((summary.slices, summary.rows, summary.columns), (3, 1, 2));
        assert_eq!(summary.displayed_slice, 1);
        assert_eq!(summary.histogram_counts.len(), 200);
        assert_eq!(summary.histogram_excluded, 1);
        // Three voxels at 0 HU land in the bin [-10, 5)
        assert_eq!(summary.histogram_peak, Some((-2.5, 3)));
        assert_eq!(summary.statistics.unwrap().max, 3000.0);
    }
}
