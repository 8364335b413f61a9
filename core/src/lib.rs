pub mod api;
pub mod archive;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod render;
pub mod selection;
pub mod types;
pub mod volume;

pub use api::{CtVolumeLoader, LoadedVolume, VolumeSummary};
pub use archive::ExtractedArchive;
pub use cli::report::TextReport;
pub use error::{CtVolumeError, Result};
pub use render::{write_outputs, RenderedOutputs};
pub use selection::{discover_ct_slices, sort_slices, CtSliceRecord};
pub use types::*;
pub use volume::{Histogram, HuStatistics, HuVolume};
