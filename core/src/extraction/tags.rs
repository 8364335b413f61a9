use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Identification Tags
pub const MODALITY: Tag = Tag(0x0008, 0x0060);
pub const SERIES_INSTANCE_UID: Tag = Tag(0x0020, 0x000E);
pub const INSTANCE_NUMBER: Tag = Tag(0x0020, 0x0013);

// Image Geometry Tags
pub const PIXEL_SPACING: Tag = Tag(0x0028, 0x0030);
pub const SLICE_THICKNESS: Tag = Tag(0x0018, 0x0050);
pub const IMAGE_POSITION_PATIENT: Tag = Tag(0x0020, 0x0032);

// Modality LUT Tags
pub const RESCALE_INTERCEPT: Tag = Tag(0x0028, 0x1052);
pub const RESCALE_SLOPE: Tag = Tag(0x0028, 0x1053);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get a floating point value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to f64
pub fn get_f64_value(dcm: &InMemDicomObject, tag: Tag) -> Option<f64> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_float64().ok())
}

/// Helper to get a multi-valued floating point value from DICOM tag
///
/// Falls back to pulling the numbers out of the string form when the
/// element cannot be converted directly.
pub fn get_multi_f64_value(dcm: &InMemDicomObject, tag: Tag) -> Option<Vec<f64>> {
    let elem = dcm.element(tag).ok()?;
    if let Ok(values) = elem.to_multi_float64() {
        return Some(values);
    }
    elem.to_str().ok().map(|s| crate::types::parse_numbers(&s))
}

/// Reads an optional integer tag strictly
///
/// Absent tags yield `Ok(None)`; present tags that cannot be coerced to an
/// integer are an error rather than being treated as missing.
pub fn require_int_if_present(
    dcm: &InMemDicomObject,
    tag: Tag,
    name: &str,
) -> crate::Result<Option<i32>> {
    match dcm.element(tag) {
        Ok(elem) => {
            if elem.to_str().map(|s| s.trim().is_empty()).unwrap_or(false) {
                return Ok(None);
            }
            let value = elem.to_int::<i32>().map_err(|e| {
                crate::CtVolumeError::InvalidValue(format!("{} is not an integer: {}", name, e))
            })?;
            Ok(Some(value))
        }
        Err(_) => Ok(None),
    }
}
