use crate::error::{CtVolumeError, Result};
use dicom_object::{FileDicomObject, InMemDicomObject};
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use ndarray::Array2;

/// Decodes the stored pixel values of a single-frame grayscale image
///
/// Values come out exactly as stored, with signedness taken from
/// PixelRepresentation and no modality or VOI LUT applied. Rescaling to HU
/// is left to the caller.
///
/// # Errors
///
/// Returns an error if the pixel data cannot be decoded, or if the image is
/// multi-frame or has more than one sample per pixel.
pub fn decode_stored_pixels(dcm: &FileDicomObject<InMemDicomObject>) -> Result<Array2<i32>> {
    let decoded = dcm.decode_pixel_data()?;

    let samples = decoded.samples_per_pixel();
    if samples != 1 {
        return Err(CtVolumeError::PixelDataError(format!(
            "expected grayscale data, found {} samples per pixel",
            samples
        )));
    }

    let frames = decoded.number_of_frames();
    if frames != 1 {
        return Err(CtVolumeError::PixelDataError(format!(
            "expected a single frame, found {}",
            frames
        )));
    }

    let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let values = decoded.to_vec_with_options::<i32>(&options)?;
    let shape = (decoded.rows() as usize, decoded.columns() as usize);

    Array2::from_shape_vec(shape, values)
        .map_err(|e| CtVolumeError::PixelDataError(format!("{}", e)))
}
