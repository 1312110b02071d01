//! Raster input: frame types, decoding and resizing.
//!
//! - Frame types via [`RasterFrame`] and [`Pixel`]
//! - Decoding via [`load_frames`]
//! - Optional fitting to a character grid via [`ResizeLimits`]

mod resize;
mod source;
mod types;

pub use resize::{calculate_dimensions, downsample, ResizeLimits, DEFAULT_CHAR_ASPECT_RATIO};
pub use source::{image_to_frame, load_frames};
pub use types::{Pixel, PixelFormat, RasterFrame};
