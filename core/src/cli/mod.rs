pub mod report;

use crate::api::{CtVolumeLoader, VolumeSummary};
use crate::error::{CtVolumeError, Result};
use crate::render::{write_outputs, RenderedOutputs};
use crate::types::{DisplayWindow, LoadOptions, SliceOrder};
use clap::{Parser, ValueEnum};
use log::info;
use std::path::PathBuf;

/// Command-line arguments for ctvolume
#[derive(Parser, Debug)]
#[command(name = "ctvolume")]
#[command(about = "Build a Hounsfield Unit volume from a zipped CT series")]
#[command(version)]
pub struct Cli {
    /// Path to a ZIP archive of DICOM files
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Directory the slice image and histogram are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Axial slice to display (defaults to the middle slice)
    #[arg(short, long)]
    pub slice: Option<usize>,

    /// Slice ordering strategy
    #[arg(long, default_value = "instance-number")]
    pub order: OrderArg,

    /// Skip unreadable .dcm files instead of aborting
    #[arg(long)]
    pub skip_invalid: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

/// Slice ordering strategy
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OrderArg {
    /// Ascending InstanceNumber
    InstanceNumber,
    /// Ascending ImagePositionPatient z
    Position,
    /// Position when the first slice has one, InstanceNumber otherwise
    Auto,
}

impl From<OrderArg> for SliceOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::InstanceNumber => SliceOrder::InstanceNumber,
            OrderArg::Position => SliceOrder::PatientPosition,
            OrderArg::Auto => SliceOrder::Auto,
        }
    }
}

impl Cli {
    /// Load options selected by the flags
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions::default()
            .with_order(self.order.into())
            .skip_invalid_files(self.skip_invalid)
    }
}

/// Loads the archive and writes the slice image and histogram
///
/// The requested slice defaults to the middle one. Nothing is written unless
/// the volume loads and the slice index is in range.
///
/// # Errors
///
/// Returns the first error of the load or of writing the outputs
pub fn run(cli: &Cli) -> Result<(VolumeSummary, RenderedOutputs)> {
    let options = cli.load_options();
    info!("Using slice order: {}", options.order);

    let loaded = CtVolumeLoader::load_zip_file(&cli.archive, &options)?;

    let slice_index = cli.slice.unwrap_or_else(|| loaded.volume.middle_index());
    let outputs = write_outputs(
        &loaded.volume,
        &loaded.histogram,
        slice_index,
        DisplayWindow::default(),
        &cli.output_dir,
    )?;

    Ok((loaded.summary(slice_index), outputs))
}

/// Message printed to stderr when a run fails
///
/// A series without CT slices gets its message verbatim; everything else is
/// prefixed with `Error:`.
pub fn error_message(err: &CtVolumeError) -> String {
    match err {
        CtVolumeError::NoCtSlices => err.to_string(),
        other => format!("Error: {}", other),
    }
}
