use crate::error::{CtVolumeError, Result};
use crate::types::{InvalidFilePolicy, LoadOptions};
use dicom_object::open_file;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::record::{is_ct_modality, read_modality, CtSliceRecord};

/// Collects every `.dcm` file under `root`, recursively
///
/// The extension check is case-insensitive. Entries are visited in file-name
/// order within each directory, so the discovery order is deterministic.
pub fn collect_dicom_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && has_dcm_extension(entry.path()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// Whether the file name ends in `.dcm`, ignoring case
pub fn has_dcm_extension(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.to_ascii_lowercase().ends_with(".dcm"))
        .unwrap_or(false)
}

/// Outcome of reading one discovered file
enum Discovered {
    Ct(Box<CtSliceRecord>),
    Other(String),
}

fn read_file(path: PathBuf) -> Result<Discovered> {
    let dcm = open_file(&path).map_err(|e| CtVolumeError::from(e).in_file(&path))?;
    let modality = read_modality(&dcm).map_err(|e| e.in_file(&path))?;
    if !is_ct_modality(&modality) {
        return Ok(Discovered::Other(modality));
    }
    CtSliceRecord::from_dicom_with_modality(path, &dcm, modality)
        .map(|record| Discovered::Ct(Box::new(record)))
}

/// Walks `root`, parses every `.dcm` file and keeps the CT slices
///
/// Records are returned in discovery order. Non-CT files are dropped
/// silently; unreadable files either abort the walk or are skipped,
/// according to `options.invalid_files`.
///
/// # Errors
///
/// Returns [`CtVolumeError::NoCtSlices`] when no CT slice remains, or the
/// first file-level error under [`InvalidFilePolicy::Abort`].
pub fn discover_ct_slices(root: &Path, options: &LoadOptions) -> Result<Vec<CtSliceRecord>> {
    let files = collect_dicom_files(root)?;
    info!("Found {} .dcm files under {}", files.len(), root.display());

    let mut records = Vec::new();
    let mut discarded = 0usize;
    let mut skipped = 0usize;

    for path in files {
        match read_file(path.clone()) {
            Ok(Discovered::Ct(record)) => {
                debug!("Read CT slice: {}", path.display());
                records.push(*record);
            }
            Ok(Discovered::Other(modality)) => {
                debug!("Discarding {} slice: {}", modality, path.display());
                discarded += 1;
            }
            Err(e) => match options.invalid_files {
                InvalidFilePolicy::Abort => return Err(e),
                InvalidFilePolicy::Skip => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped += 1;
                }
            },
        }
    }

    info!(
        "Kept {} CT slices, discarded {} non-CT, skipped {} invalid",
        records.len(),
        discarded,
        skipped
    );

    if records.is_empty() {
        return Err(CtVolumeError::NoCtSlices);
    }

    let series = distinct_series(&records);
    if series.len() > 1 {
        warn!(
            "CT slices span {} series, stacking them together: {}",
            series.len(),
            series.join(", ")
        );
    }

    Ok(records)
}

/// SeriesInstanceUIDs present among `records`, in first-seen order
///
/// Records without the tag are not counted.
pub fn distinct_series(records: &[CtSliceRecord]) -> Vec<&str> {
    let mut series: Vec<&str> = Vec::new();
    for uid in records.iter().filter_map(|r| r.series_instance_uid.as_deref()) {
        if !series.contains(&uid) {
            series.push(uid);
        }
    }
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rescale;
    use ndarray::Array2;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn record_in_series(uid: Option<&str>) -> CtSliceRecord {
        CtSliceRecord {
            file_path: PathBuf::from("slice.dcm"),
            modality: "CT".to_string(),
            instance_number: Some(1),
            image_position: None,
            pixel_spacing: None,
            slice_thickness: None,
            series_instance_uid: uid.map(str::to_string),
            rescale: Rescale::default(),
            pixels: Array2::zeros((1, 1)),
        }
    }

    #[test]
    fn test_distinct_series() {
        let records = vec![
            record_in_series(Some("1.2.3")),
            record_in_series(None),
            record_in_series(Some("1.2.3")),
            record_in_series(Some("1.2.4")),
        ];
        assert_eq!(distinct_series(&records), vec!["1.2.3", "1.2.4"]);
        assert!(distinct_series(&records[1..2]).is_empty());
    }

    #[test]
    fn test_has_dcm_extension() {
        assert!(has_dcm_extension(Path::new("a/b/slice.dcm")));
        assert!(has_dcm_extension(Path::new("SLICE.DCM")));
        assert!(has_dcm_extension(Path::new("x.Dcm")));
        assert!(!has_dcm_extension(Path::new("slice.dicom")));
        assert!(!has_dcm_extension(Path::new("slice")));
        assert!(!has_dcm_extension(Path::new("dcm")));
    }

    #[test]
    fn test_collect_dicom_files_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("series").join("deep");
        fs::create_dir_all(&nested).unwrap();

        File::create(temp_dir.path().join("b.dcm")).unwrap();
        File::create(temp_dir.path().join("a.DCM")).unwrap();
        File::create(nested.join("c.dcm")).unwrap();
        File::create(temp_dir.path().join("notes.txt")).unwrap();
        File::create(temp_dir.path().join("uploaded.zip")).unwrap();
        fs::create_dir(temp_dir.path().join("folder.dcm")).unwrap();

        let files = collect_dicom_files(temp_dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.DCM", "b.dcm", "c.dcm"]);
    }

    #[test]
    fn test_no_files_is_no_ct_slices() {
        let temp_dir = TempDir::new().unwrap();
        let err = discover_ct_slices(temp_dir.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, CtVolumeError::NoCtSlices));
    }

    #[test]
    fn test_unparsable_file_policy() {
        let temp_dir = TempDir::new().unwrap();
        let mut file = File::create(temp_dir.path().join("broken.dcm")).unwrap();
        file.write_all(b"This is not a DICOM file").unwrap();

        let abort = discover_ct_slices(temp_dir.path(), &LoadOptions::default()).unwrap_err();
        assert!(matches!(abort, CtVolumeError::DicomError(_)));

        let skip = discover_ct_slices(
            temp_dir.path(),
            &LoadOptions::default().skip_invalid_files(true),
        )
        .unwrap_err();
        assert!(matches!(skip, CtVolumeError::NoCtSlices));
    }
}
