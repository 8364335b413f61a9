//! Hounsfield Unit volume assembly

mod histogram;

pub use histogram::Histogram;

use crate::error::{CtVolumeError, Result};
use crate::selection::CtSliceRecord;
use crate::types::{ImagePosition, PixelSpacing};
use log::debug;
use ndarray::{stack, Array2, Array3, ArrayView2, Axis};
use std::path::PathBuf;

/// Summary statistics over every voxel of a volume
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct HuStatistics {
    pub min: f32,
    pub max: f32,
    pub mean: f64,
    pub voxels: usize,
}

/// Per-slice provenance kept alongside the voxel data
#[derive(Debug, Clone, PartialEq)]
pub struct SliceInfo {
    pub file_path: PathBuf,
    pub instance_number: Option<i32>,
    pub image_position: Option<ImagePosition>,
}

/// Stack of HU slices ordered along the leading axis
///
/// Shape is `(slices, rows, columns)`; every slice shares the same in-plane
/// shape.
#[derive(Debug, Clone)]
pub struct HuVolume {
    data: Array3<f32>,
    slices: Vec<SliceInfo>,
    pixel_spacing: Option<PixelSpacing>,
    slice_thickness: Option<f64>,
}

impl HuVolume {
    /// Converts ordered records to HU and stacks them
    ///
    /// Shapes are checked before stacking so that a mismatch names the
    /// offending slice.
    ///
    /// # Errors
    ///
    /// Returns [`CtVolumeError::NoCtSlices`] for an empty input and
    /// [`CtVolumeError::ShapeMismatch`] when a slice's shape differs from the
    /// first slice's.
    pub fn from_slices(records: &[CtSliceRecord]) -> Result<Self> {
        let first = records.first().ok_or(CtVolumeError::NoCtSlices)?;
        let expected = first.shape();

        for (index, record) in records.iter().enumerate() {
            let found = record.shape();
            if found != expected {
                return Err(CtVolumeError::ShapeMismatch {
                    index,
                    expected,
                    found,
                    path: record.file_path.clone(),
                });
            }
        }

        let hu_slices: Vec<Array2<f32>> = records.iter().map(CtSliceRecord::to_hu).collect();
        let views: Vec<ArrayView2<f32>> = hu_slices.iter().map(|s| s.view()).collect();
        let data = stack(Axis(0), &views)
            .map_err(|e| CtVolumeError::InvalidValue(format!("failed to stack slices: {}", e)))?;
        debug!("Stacked volume with shape {:?}", data.shape());

        let slices = records
            .iter()
            .map(|r| SliceInfo {
                file_path: r.file_path.clone(),
                instance_number: r.instance_number,
                image_position: r.image_position,
            })
            .collect();

        Ok(Self {
            data,
            slices,
            pixel_spacing: first.pixel_spacing,
            slice_thickness: first.slice_thickness,
        })
    }

    /// Builds a volume directly from HU data, without slice provenance
    pub fn from_array(data: Array3<f32>) -> Self {
        let slices = (0..data.len_of(Axis(0)))
            .map(|_| SliceInfo {
                file_path: PathBuf::new(),
                instance_number: None,
                image_position: None,
            })
            .collect();
        Self {
            data,
            slices,
            pixel_spacing: None,
            slice_thickness: None,
        }
    }

    /// Number of slices
    pub fn len(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Whether the volume has no slices
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shape as (slices, rows, columns)
    pub fn shape(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Index of the middle slice, `len / 2` rounded down
    pub fn middle_index(&self) -> usize {
        self.len() / 2
    }

    /// View of one axial slice
    ///
    /// # Errors
    ///
    /// Returns [`CtVolumeError::SliceOutOfRange`] for an index past the end
    pub fn slice(&self, index: usize) -> Result<ArrayView2<'_, f32>> {
        if index >= self.len() {
            return Err(CtVolumeError::SliceOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(self.data.index_axis(Axis(0), index))
    }

    /// Every voxel value, slice by slice in row-major order
    pub fn voxels(&self) -> impl Iterator<Item = f32> + '_ {
        self.data.iter().copied()
    }

    /// The underlying array
    pub fn data(&self) -> &Array3<f32> {
        &self.data
    }

    /// Provenance of each slice, in volume order
    pub fn slices(&self) -> &[SliceInfo] {
        &self.slices
    }

    /// InstanceNumber of each slice, in volume order
    pub fn instance_numbers(&self) -> Vec<Option<i32>> {
        self.slices.iter().map(|s| s.instance_number).collect()
    }

    /// In-plane pixel spacing of the first slice
    pub fn pixel_spacing(&self) -> Option<PixelSpacing> {
        self.pixel_spacing
    }

    /// Spacing between slices along the stacking axis in mm
    ///
    /// Taken from the first two ImagePositionPatient z values when both are
    /// present, otherwise from SliceThickness.
    pub fn slice_spacing(&self) -> Option<f64> {
        match self.slices.as_slice() {
            [a, b, ..] => match (a.image_position, b.image_position) {
                (Some(pa), Some(pb)) => Some((pb.z - pa.z).abs()),
                _ => self.slice_thickness,
            },
            _ => self.slice_thickness,
        }
    }

    /// Minimum, maximum and mean HU over all voxels
    ///
    /// Returns `None` for a volume without voxels.
    pub fn statistics(&self) -> Option<HuStatistics> {
        let voxels = self.data.len();
        if voxels == 0 {
            return None;
        }

        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        let mut sum = 0.0f64;
        for &v in self.data.iter() {
            min = min.min(v);
            max = max.max(v);
            sum += v as f64;
        }

        Some(HuStatistics {
            min,
            max,
            mean: sum / voxels as f64,
            voxels,
        })
    }
}
