use std::path::PathBuf;
use thiserror::Error;

/// Result type for ctvolume operations
pub type Result<T> = std::result::Result<T, CtVolumeError>;

/// Error types for ctvolume operations
#[derive(Error, Debug)]
pub enum CtVolumeError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// Tag not found in DICOM file
    #[error("Tag not found: {0}")]
    TagNotFound(String),

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// Pixel data could not be decoded into a grayscale matrix
    #[error("Pixel data error: {0}")]
    PixelDataError(String),

    /// ZIP archive could not be read or extracted
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// The archive held no DICOM file with modality CT
    #[error("No CT DICOM slices found in uploaded ZIP.")]
    NoCtSlices,

    /// A slice does not share the in-plane shape of the first slice
    #[error(
        "Slice {index} ({}) has shape {found:?}, expected {expected:?}",
        path.display()
    )]
    ShapeMismatch {
        index: usize,
        expected: (usize, usize),
        found: (usize, usize),
        path: PathBuf,
    },

    /// Requested slice index is outside the volume
    #[error("Slice index {index} is out of range for a volume of {len} slices")]
    SliceOutOfRange { index: usize, len: usize },

    /// Image encoding error
    #[error("Render error: {0}")]
    RenderError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CtVolumeError {
    /// Attaches the offending file to a tag-level error message
    pub fn in_file(self, path: &std::path::Path) -> Self {
        match self {
            CtVolumeError::TagNotFound(tag) => {
                CtVolumeError::TagNotFound(format!("{} in {}", tag, path.display()))
            }
            CtVolumeError::InvalidValue(msg) => {
                CtVolumeError::InvalidValue(format!("{} in {}", msg, path.display()))
            }
            CtVolumeError::DicomError(msg) => {
                CtVolumeError::DicomError(format!("{}: {}", path.display(), msg))
            }
            CtVolumeError::PixelDataError(msg) => {
                CtVolumeError::PixelDataError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        }
    }
}

// Helper conversions
impl From<String> for CtVolumeError {
    fn from(s: String) -> Self {
        CtVolumeError::InvalidValue(s)
    }
}

impl From<&str> for CtVolumeError {
    fn from(s: &str) -> Self {
        CtVolumeError::InvalidValue(s.to_string())
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for CtVolumeError {
    fn from(e: dicom_object::ReadError) -> Self {
        CtVolumeError::DicomError(format!("{}", e))
    }
}

impl From<dicom_core::value::ConvertValueError> for CtVolumeError {
    fn from(e: dicom_core::value::ConvertValueError) -> Self {
        CtVolumeError::InvalidValue(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for CtVolumeError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        CtVolumeError::PixelDataError(format!("{}", e))
    }
}

impl From<zip::result::ZipError> for CtVolumeError {
    fn from(e: zip::result::ZipError) -> Self {
        CtVolumeError::ArchiveError(format!("{}", e))
    }
}

impl From<image::ImageError> for CtVolumeError {
    fn from(e: image::ImageError) -> Self {
        CtVolumeError::RenderError(format!("{}", e))
    }
}

impl From<walkdir::Error> for CtVolumeError {
    fn from(e: walkdir::Error) -> Self {
        CtVolumeError::IoError(e.into())
    }
}
