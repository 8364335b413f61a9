//! Core type definitions for CT volume reconstruction
//!
//! This module provides the value types shared across the pipeline:
//! - [`Rescale`]: Modality LUT slope/intercept mapping stored values to HU
//! - [`SliceOrder`]: Strategies for ordering slices along the stacking axis
//! - [`InvalidFilePolicy`]: What to do with `.dcm` files that cannot be read
//! - [`LoadOptions`]: Configuration for a single load of a slice series
//! - [`DisplayWindow`] and [`HistogramConfig`]: Fixed visualization ranges
//! - [`ImagePosition`] and [`PixelSpacing`]: Slice geometry

mod enums;
mod geometry;
mod options;
mod rescale;
mod window;

pub use enums::{InvalidFilePolicy, SliceOrder};
pub use geometry::{parse_numbers, ImagePosition, PixelSpacing};
pub use options::LoadOptions;
pub use rescale::Rescale;
pub use window::{DisplayWindow, HistogramConfig};
