//! Visualization of an assembled volume
//!
//! Produces the two outputs of a load: the selected axial slice as a
//! windowed grayscale PNG, and the HU histogram as an SVG bar chart.

mod histogram_plot;
mod slice_image;

pub use histogram_plot::{
    render_histogram_svg, HistogramPlot, HISTOGRAM_TITLE, X_AXIS_LABEL, Y_AXIS_LABEL,
};
pub use slice_image::render_slice;

use crate::error::Result;
use crate::types::DisplayWindow;
use crate::volume::{Histogram, HuVolume};
use log::info;
use std::path::{Path, PathBuf};

/// File name of the rendered axial slice
pub const SLICE_IMAGE_NAME: &str = "axial_slice.png";

/// File name of the rendered histogram
pub const HISTOGRAM_PLOT_NAME: &str = "hu_histogram.svg";

/// Paths of the files written by [`write_outputs`]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct RenderedOutputs {
    pub slice_image: PathBuf,
    pub histogram_plot: PathBuf,
}

/// Renders slice `slice_index` and the histogram into `out_dir`
///
/// The directory is created if needed.
///
/// # Errors
///
/// Returns an error if the slice index is out of range or a file cannot be
/// written.
pub fn write_outputs(
    volume: &HuVolume,
    histogram: &Histogram,
    slice_index: usize,
    window: DisplayWindow,
    out_dir: &Path,
) -> Result<RenderedOutputs> {
    let slice = volume.slice(slice_index)?;
    std::fs::create_dir_all(out_dir)?;

    let slice_image = out_dir.join(SLICE_IMAGE_NAME);
    render_slice(slice, window).save(&slice_image)?;
    info!("Wrote slice #{} to {}", slice_index, slice_image.display());

    let histogram_plot = out_dir.join(HISTOGRAM_PLOT_NAME);
    std::fs::write(&histogram_plot, render_histogram_svg(histogram))?;
    info!("Wrote histogram to {}", histogram_plot.display());

    Ok(RenderedOutputs {
        slice_image,
        histogram_plot,
    })
}
