//! Synthetic DICOM and ZIP fixtures shared by the integration tests

#![allow(dead_code)]

use dicom_core::{DataElement, PrimitiveValue, VR};
use dicom_dictionary_std::tags;
use dicom_object::{FileMetaTableBuilder, InMemDicomObject};
use std::io::{Cursor, Write};
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const EXPLICIT_VR_LE: &str = "1.2.840.10008.1.2.1";
const CT_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.2";

/// Description of one synthetic single-frame slice
#[derive(Debug, Clone)]
pub struct SliceFixture {
    pub modality: String,
    pub instance_number: Option<i32>,
    pub position: Option<[f64; 3]>,
    pub rescale: Option<(f64, f64)>,
    pub rows: u16,
    pub columns: u16,
    pub signed: bool,
    pub pixels: Vec<i16>,
}

impl SliceFixture {
    /// A CT slice filled with a single stored value
    pub fn ct(instance_number: i32, rows: u16, columns: u16, value: i16) -> Self {
        Self {
            modality: "CT".to_string(),
            instance_number: Some(instance_number),
            position: None,
            rescale: None,
            rows,
            columns,
            signed: true,
            pixels: vec![value; rows as usize * columns as usize],
        }
    }

    pub fn with_modality(mut self, modality: &str) -> Self {
        self.modality = modality.to_string();
        self
    }

    pub fn with_rescale(mut self, slope: f64, intercept: f64) -> Self {
        self.rescale = Some((slope, intercept));
        self
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = Some([x, y, z]);
        self
    }

    pub fn without_instance_number(mut self) -> Self {
        self.instance_number = None;
        self
    }

    pub fn with_pixels(mut self, pixels: Vec<i16>) -> Self {
        assert_eq!(pixels.len(), self.rows as usize * self.columns as usize);
        self.pixels = pixels;
        self
    }

    /// Encodes the slice as a complete DICOM file
    pub fn to_bytes(&self) -> Vec<u8> {
        let sop_instance_uid = format!(
            "1.2.826.0.1.3680043.2.1125.{}",
            self.instance_number.unwrap_or(0).unsigned_abs()
        );

        let mut obj = InMemDicomObject::new_empty();
        obj.put(DataElement::new(
            tags::SOP_CLASS_UID,
            VR::UI,
            PrimitiveValue::from(CT_IMAGE_STORAGE),
        ));
        obj.put(DataElement::new(
            tags::SOP_INSTANCE_UID,
            VR::UI,
            PrimitiveValue::from(sop_instance_uid.as_str()),
        ));
        obj.put(DataElement::new(
            tags::MODALITY,
            VR::CS,
            PrimitiveValue::from(self.modality.as_str()),
        ));
        if let Some(number) = self.instance_number {
            obj.put(DataElement::new(
                tags::INSTANCE_NUMBER,
                VR::IS,
                PrimitiveValue::from(number.to_string()),
            ));
        }
        if let Some([x, y, z]) = self.position {
            obj.put(DataElement::new(
                tags::IMAGE_POSITION_PATIENT,
                VR::DS,
                PrimitiveValue::from(format!("{}\\{}\\{}", x, y, z)),
            ));
        }
        if let Some((slope, intercept)) = self.rescale {
            obj.put(DataElement::new(
                tags::RESCALE_SLOPE,
                VR::DS,
                PrimitiveValue::from(slope.to_string()),
            ));
            obj.put(DataElement::new(
                tags::RESCALE_INTERCEPT,
                VR::DS,
                PrimitiveValue::from(intercept.to_string()),
            ));
        }

        obj.put(DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)));
        obj.put(DataElement::new(
            tags::PHOTOMETRIC_INTERPRETATION,
            VR::CS,
            PrimitiveValue::from("MONOCHROME2"),
        ));
        obj.put(DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(self.rows)));
        obj.put(DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(self.columns)));
        obj.put(DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)));
        obj.put(DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)));
        obj.put(DataElement::new(tags::HIGH_BIT, VR::US, PrimitiveValue::from(15_u16)));
        obj.put(DataElement::new(
            tags::PIXEL_REPRESENTATION,
            VR::US,
            PrimitiveValue::from(u16::from(self.signed)),
        ));

        let words: Vec<u16> = self.pixels.iter().map(|&v| v as u16).collect();
        obj.put(DataElement::new(
            tags::PIXEL_DATA,
            VR::OW,
            PrimitiveValue::U16(words.into()),
        ));

        let file = obj
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax(EXPLICIT_VR_LE)
                    .media_storage_sop_class_uid(CT_IMAGE_STORAGE)
                    .media_storage_sop_instance_uid(sop_instance_uid.as_str()),
            )
            .unwrap();

        let mut bytes = Vec::new();
        file.write_all(&mut bytes).unwrap();
        bytes
    }

    /// Writes the slice to `path`, creating parent directories
    pub fn write_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, self.to_bytes()).unwrap();
    }
}

/// Builds an in-memory ZIP archive from (entry name, contents) pairs
pub fn zip_entries<N: AsRef<str>>(entries: &[(N, Vec<u8>)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, contents) in entries {
        zip.start_file(name.as_ref(), SimpleFileOptions::default())
            .unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Builds an in-memory ZIP archive of slices named `<name>.dcm`
pub fn zip_slices(slices: &[(&str, SliceFixture)]) -> Vec<u8> {
    let entries: Vec<(String, Vec<u8>)> = slices
        .iter()
        .map(|(name, slice)| (format!("{}.dcm", name), slice.to_bytes()))
        .collect();
    zip_entries(&entries)
}
