use crate::error::{CtVolumeError, Result};
use crate::extraction::tags::{
    get_string_value, require_int_if_present, INSTANCE_NUMBER, MODALITY, SERIES_INSTANCE_UID,
    SLICE_THICKNESS,
};
use crate::extraction::{
    decode_stored_pixels, extract_image_position, extract_pixel_spacing, extract_rescale,
    get_f64_value,
};
use crate::types::{ImagePosition, PixelSpacing, Rescale};
use dicom_object::{open_file, FileDicomObject, InMemDicomObject};
use ndarray::Array2;
use std::path::PathBuf;

/// One parsed DICOM slice: the tags the pipeline consumes plus its pixels
///
/// Pixels are kept as the stored integers; conversion to HU happens when the
/// volume is assembled.
#[derive(Debug, Clone)]
pub struct CtSliceRecord {
    /// Path to the DICOM file
    pub file_path: PathBuf,

    /// Modality (0008,0060), trimmed
    pub modality: String,

    /// InstanceNumber (0020,0013)
    pub instance_number: Option<i32>,

    /// ImagePositionPatient (0020,0032)
    pub image_position: Option<ImagePosition>,

    /// PixelSpacing (0028,0030)
    pub pixel_spacing: Option<PixelSpacing>,

    /// SliceThickness (0018,0050)
    pub slice_thickness: Option<f64>,

    /// SeriesInstanceUID (0020,000E)
    pub series_instance_uid: Option<String>,

    /// RescaleSlope / RescaleIntercept
    pub rescale: Rescale,

    /// Stored pixel values, rows x columns
    pub pixels: Array2<i32>,
}

impl CtSliceRecord {
    /// Creates a record from a DICOM file path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, lacks a Modality tag,
    /// carries a non-integer InstanceNumber, or has undecodable pixel data.
    /// Errors name the offending file.
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let dcm = open_file(&path).map_err(|e| CtVolumeError::from(e).in_file(&path))?;
        Self::from_dicom(path, &dcm)
    }

    /// Creates a record from an already-opened DICOM object
    pub fn from_dicom(path: PathBuf, dcm: &FileDicomObject<InMemDicomObject>) -> Result<Self> {
        let modality = read_modality(dcm).map_err(|e| e.in_file(&path))?;
        Self::from_dicom_with_modality(path, dcm, modality)
    }

    /// Creates a record when the Modality has already been read
    pub fn from_dicom_with_modality(
        path: PathBuf,
        dcm: &FileDicomObject<InMemDicomObject>,
        modality: String,
    ) -> Result<Self> {
        Self::read(&path, dcm, modality).map_err(|e| e.in_file(&path))
    }

    fn read(
        path: &std::path::Path,
        dcm: &FileDicomObject<InMemDicomObject>,
        modality: String,
    ) -> Result<Self> {
        let instance_number = require_int_if_present(dcm, INSTANCE_NUMBER, "InstanceNumber")?;
        let pixels = decode_stored_pixels(dcm)?;

        Ok(Self {
            file_path: path.to_path_buf(),
            modality,
            instance_number,
            image_position: extract_image_position(dcm),
            pixel_spacing: extract_pixel_spacing(dcm),
            slice_thickness: get_f64_value(dcm, SLICE_THICKNESS),
            series_instance_uid: get_string_value(dcm, SERIES_INSTANCE_UID),
            rescale: extract_rescale(dcm),
            pixels,
        })
    }

    /// Whether the Modality is CT, compared case-insensitively
    pub fn is_ct(&self) -> bool {
        is_ct_modality(&self.modality)
    }

    /// In-plane shape as (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        self.pixels.dim()
    }

    /// Converts the stored pixels to Hounsfield Units
    pub fn to_hu(&self) -> Array2<f32> {
        let rescale = self.rescale;
        self.pixels.mapv(|stored| rescale.apply(stored))
    }
}

/// Reads the Modality tag, which every slice must carry
pub fn read_modality(dcm: &InMemDicomObject) -> Result<String> {
    get_string_value(dcm, MODALITY)
        .ok_or_else(|| CtVolumeError::TagNotFound("Modality".to_string()))
}

/// Checks a Modality value against "CT" after trimming and uppercasing
pub fn is_ct_modality(modality: &str) -> bool {
    modality.trim().to_uppercase() == "CT"
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use dicom_dictionary_std::tags;
    use dicom_object::FileMetaTableBuilder;
    use ndarray::array;

    fn make_record(modality: &str, rescale: Rescale) -> CtSliceRecord {
        CtSliceRecord {
            file_path: PathBuf::from("slice.dcm"),
            modality: modality.to_string(),
            instance_number: Some(1),
            image_position: None,
            pixel_spacing: None,
            slice_thickness: None,
            series_instance_uid: None,
            rescale,
            pixels: array![[0, 1024], [-24, 2000]],
        }
    }

    #[test]
    fn test_is_ct_modality() {
        assert!(is_ct_modality("CT"));
        assert!(is_ct_modality("ct"));
        assert!(is_ct_modality(" Ct "));
        assert!(!is_ct_modality("MR"));
        assert!(!is_ct_modality("RTSTRUCT"));
        assert!(!is_ct_modality(""));
    }

    #[test]
    fn test_to_hu_applies_rescale() {
        let record = make_record("CT", Rescale::new(1.0, -1024.0));
        assert_eq!(record.to_hu(), array![[-1024.0_f32, 0.0], [-1048.0, 976.0]]);
        assert_eq!(record.shape(), (2, 2));
        assert!(record.is_ct());
    }

    #[test]
    fn test_to_hu_identity_without_rescale_tags() {
        let record = make_record("MR", Rescale::default());
        assert_eq!(record.to_hu(), array![[0.0_f32, 1024.0], [-24.0, 2000.0]]);
        assert!(!record.is_ct());
    }

    fn ct_dicom_without_modality() -> FileDicomObject<InMemDicomObject> {
        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::new(tags::INSTANCE_NUMBER, VR::IS, PrimitiveValue::from("4")));
        obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(1_u16)));
        obj.put(DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(2_u16)));
        obj.put(DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)));
        obj.put(DataElement::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            VR::CS,
            PrimitiveValue::from("MONOCHROME2"),
        ));
        obj.put(DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
        obj.put(DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)));
        obj.put(DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)));
        obj.put(DataElement::new(
            tags::PIXEL_REPRESENTATION,
            VR::US,
            PrimitiveValue::from(0_u16),
        ));
        obj.put(DataElement::new(
            tags::PIXEL_DATA,
            VR::OW,
            PrimitiveValue::U16(vec![7_u16, 9].into()),
        ));
        obj.with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax("1.2.840.10008.1.2.1")
                .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.2")
                .media_storage_sop_instance_uid("1.2.3.4"),
        )
        .unwrap()
    }

    #[test]
    fn test_from_dicom_with_modality_uses_given_modality() {
        let dcm = ct_dicom_without_modality();

        let record =
            CtSliceRecord::from_dicom_with_modality(PathBuf::from("a.dcm"), &dcm, "CT".to_string())
                .unwrap();
        assert!(record.is_ct());
        assert_eq!(record.instance_number, Some(4));
        assert_eq!(record.pixels, array![[7, 9]]);

        // Reading the modality from the object itself needs the tag
        let err = CtSliceRecord::from_dicom(PathBuf::from("a.dcm"), &dcm).unwrap_err();
        assert!(matches!(err, CtVolumeError::TagNotFound(msg) if msg.contains("Modality")));
    }
}
