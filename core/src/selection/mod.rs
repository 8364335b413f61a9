//! Discovery, filtering and ordering of CT slices
//!
//! Walks an extracted tree for `.dcm` files, keeps the CT slices and puts
//! them in stacking order.

mod discovery;
mod ordering;
mod record;

pub use discovery::{collect_dicom_files, discover_ct_slices, distinct_series, has_dcm_extension};
pub use ordering::sort_slices;
pub use record::{is_ct_modality, read_modality, CtSliceRecord};
