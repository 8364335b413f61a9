use crate::error::{CtVolumeError, Result};
use crate::types::{InvalidFilePolicy, SliceOrder};
use log::{info, warn};

use super::record::CtSliceRecord;

/// Sorts slice records along the stacking axis
///
/// `Auto` is resolved against the first record in discovery order. The sort
/// is stable, so records with equal keys keep their discovery order. No check
/// is made that keys are unique or contiguous.
///
/// Records lacking the sort key fail the load under
/// [`InvalidFilePolicy::Abort`]; under [`InvalidFilePolicy::Skip`] they are
/// dropped with a warning.
///
/// # Returns
///
/// The concrete strategy that was applied
///
/// # Errors
///
/// Returns [`CtVolumeError::TagNotFound`] naming the first record that lacks
/// the sort key, or [`CtVolumeError::NoCtSlices`] when skipping leaves no
/// record.
pub fn sort_slices(
    records: &mut Vec<CtSliceRecord>,
    order: SliceOrder,
    policy: InvalidFilePolicy,
) -> Result<SliceOrder> {
    let first_has_position = records
        .first()
        .map(|r| r.image_position.is_some())
        .unwrap_or(false);
    let order = order.resolve(first_has_position);

    match order {
        SliceOrder::InstanceNumber | SliceOrder::Auto => {
            require_key(records, "InstanceNumber", policy, |r| {
                r.instance_number.is_some()
            })?;
            records.sort_by_key(|r| r.instance_number.unwrap_or_default());
        }
        SliceOrder::PatientPosition => {
            require_key(records, "ImagePositionPatient", policy, |r| {
                r.image_position.is_some()
            })?;
            records.sort_by(|a, b| z_of(a).total_cmp(&z_of(b)));
        }
    }

    info!("Ordered {} slices by {}", records.len(), order);
    Ok(order)
}

fn z_of(record: &CtSliceRecord) -> f64 {
    record.image_position.map(|p| p.z).unwrap_or_default()
}

fn require_key(
    records: &mut Vec<CtSliceRecord>,
    name: &str,
    policy: InvalidFilePolicy,
    has_key: impl Fn(&CtSliceRecord) -> bool,
) -> Result<()> {
    match policy {
        InvalidFilePolicy::Abort => match records.iter().find(|r| !has_key(r)) {
            Some(record) => Err(CtVolumeError::TagNotFound(format!(
                "{} in {}",
                name,
                record.file_path.display()
            ))),
            None => Ok(()),
        },
        InvalidFilePolicy::Skip => {
            records.retain(|r| {
                let keep = has_key(r);
                if !keep {
                    warn!("Skipping {}: no {}", r.file_path.display(), name);
                }
                keep
            });
            if records.is_empty() {
                return Err(CtVolumeError::NoCtSlices);
            }
            Ok(())
        }
    }
}
