//! Scoped extraction of an uploaded ZIP archive

use crate::error::Result;
use log::{debug, info};
use std::fs::File;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use zip::ZipArchive;

/// File name the uploaded blob is saved under inside the scratch directory
pub const UPLOADED_ARCHIVE_NAME: &str = "uploaded.zip";

/// An uploaded archive extracted into a private temporary directory
///
/// The directory and everything in it is removed when this value is dropped,
/// whether the load that used it succeeded or failed.
#[derive(Debug)]
pub struct ExtractedArchive {
    dir: TempDir,
    entries: usize,
}

impl ExtractedArchive {
    /// Saves `bytes` to a fresh temporary directory and extracts them there
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created or the
    /// bytes are not a readable ZIP archive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let dir = tempfile::Builder::new().prefix("ctvolume-").tempdir()?;
        let zip_path = dir.path().join(UPLOADED_ARCHIVE_NAME);
        std::fs::write(&zip_path, bytes)?;
        debug!(
            "Saved {} byte archive to {}",
            bytes.len(),
            zip_path.display()
        );

        let mut archive = ZipArchive::new(File::open(&zip_path)?)?;
        let entries = archive.len();
        archive.extract(dir.path())?;
        info!(
            "Extracted {} archive entries into {}",
            entries,
            dir.path().display()
        );

        Ok(Self { dir, entries })
    }

    /// Reads a ZIP file from disk and extracts it
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Root of the extracted tree
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Number of entries the archive contained
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Path of the saved archive itself
    pub fn archive_path(&self) -> PathBuf {
        self.dir.path().join(UPLOADED_ARCHIVE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CtVolumeError;
    use std::io::{Cursor, Write};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn build_zip(files: &[(&str, &[u8])]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (name, contents) in files {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(contents).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_extracts_nested_entries() {
        let bytes = build_zip(&[("a.dcm", b"one"), ("series/b.DCM", b"two")]);
        let extracted = ExtractedArchive::from_bytes(&bytes).unwrap();

        assert_eq!(extracted.entries(), 2);
        assert!(extracted.archive_path().is_file());
        assert_eq!(
            std::fs::read(extracted.path().join("series/b.DCM")).unwrap(),
            b"two"
        );
    }

    #[test]
    fn test_directory_removed_on_drop() {
        let bytes = build_zip(&[("a.dcm", b"one")]);
        let extracted = ExtractedArchive::from_bytes(&bytes).unwrap();
        let root = extracted.path().to_path_buf();
        assert!(root.is_dir());

        drop(extracted);
        assert!(!root.exists());
    }

    #[test]
    fn test_invalid_zip_is_archive_error() {
        let err = ExtractedArchive::from_bytes(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, CtVolumeError::ArchiveError(_)));
    }
}
