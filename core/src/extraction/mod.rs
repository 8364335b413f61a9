pub mod geometry;
pub mod pixels;
pub mod tags;

pub use geometry::{extract_image_position, extract_pixel_spacing, extract_rescale};
pub use pixels::decode_stored_pixels;
pub use tags::*;
