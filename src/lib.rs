//! termreel library crate.
//!
//! Converts animated raster images into sequences of terminal-renderable
//! frames: rows of glyphs picked by luminance, optionally wrapped in ANSI
//! color escapes.
//!
//! ```ignore
//! use termreel::pipeline::{OutputTarget, Pipeline, RenderOptions};
//!
//! let pipeline = Pipeline::new(RenderOptions::default())?;
//! pipeline.convert("anim.gif".as_ref(), &OutputTarget::File("frames.json".into()))?;
//! ```

pub mod animation;
pub mod ascii;
pub mod cli;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod raster;

pub use error::{ReelError, Result};
