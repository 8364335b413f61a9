use crate::types::{ImagePosition, PixelSpacing, Rescale};
use dicom_object::InMemDicomObject;

use super::tags::{
    get_f64_value, get_multi_f64_value, get_string_value, IMAGE_POSITION_PATIENT, PIXEL_SPACING,
    RESCALE_INTERCEPT, RESCALE_SLOPE,
};

/// Extracts the modality LUT rescale
///
/// Missing or unparsable RescaleSlope defaults to 1 and RescaleIntercept to 0.
pub fn extract_rescale(dcm: &InMemDicomObject) -> Rescale {
    Rescale::from_tags(
        get_f64_value(dcm, RESCALE_SLOPE),
        get_f64_value(dcm, RESCALE_INTERCEPT),
    )
}

/// Extracts ImagePositionPatient, if present and well formed
pub fn extract_image_position(dcm: &InMemDicomObject) -> Option<ImagePosition> {
    get_multi_f64_value(dcm, IMAGE_POSITION_PATIENT)
        .and_then(|values| ImagePosition::from_values(&values).ok())
}

/// Extracts PixelSpacing, if present and well formed
pub fn extract_pixel_spacing(dcm: &InMemDicomObject) -> Option<PixelSpacing> {
    get_multi_f64_value(dcm, PIXEL_SPACING)
        .and_then(|values| match values.as_slice() {
            [row, col, ..] => Some(PixelSpacing::new(*row, *col)),
            _ => None,
        })
        .or_else(|| get_string_value(dcm, PIXEL_SPACING).and_then(|s| PixelSpacing::parse(&s).ok()))
}
