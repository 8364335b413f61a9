use crate::types::DisplayWindow;
use image::{GrayImage, Luma};
use ndarray::ArrayView2;

/// Renders one HU slice as an 8-bit grayscale image
///
/// Rows map to image rows and columns to image columns. The image carries
/// only pixels: no axes, ticks or colorbar.
pub fn render_slice(slice: ArrayView2<'_, f32>, window: DisplayWindow) -> GrayImage {
    let (rows, cols) = slice.dim();
    GrayImage::from_fn(cols as u32, rows as u32, |x, y| {
        Luma([window.gray_level(slice[[y as usize, x as usize]])])
    })
}
