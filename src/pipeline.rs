//! Conversion pipeline for termreel.
//!
//! Drives decoded frames through resize, smoothing and composition, then
//! hands the ordered result to the animation encoder. All options are fixed
//! when the [`Pipeline`] is built, so invalid configuration is reported
//! before any frame is touched.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::animation::{Animation, AnimationBuilder, OutputStyle};
use crate::ascii::{BilateralFilter, ColorLayer, ColorMode, Compositor, Frame};
use crate::config::Config;
use crate::error::{ReelError, Result};
use crate::raster::{downsample, load_frames, RasterFrame, ResizeLimits};

/// Largest accepted indent for pretty output.
const MAX_INDENT: usize = 16;

/// Options for one conversion run.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub color_mode: ColorMode,
    pub layer: ColorLayer,
    pub resize: ResizeLimits,
    pub output: OutputStyle,
    /// Render frames concurrently
    pub parallel: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            layer: ColorLayer::Foreground,
            resize: ResizeLimits::default(),
            output: OutputStyle::default(),
            parallel: true,
        }
    }
}

impl RenderOptions {
    /// Build options from a loaded config file.
    ///
    /// Fails if the configured color mode is not recognized.
    pub fn from_config(config: &Config) -> Result<Self> {
        let color_mode = match config.render.color_mode.as_deref() {
            Some(name) => name.parse()?,
            None => ColorMode::default(),
        };
        let layer = if config.render.background {
            ColorLayer::Background
        } else {
            ColorLayer::Foreground
        };
        let output = if config.output.pretty {
            OutputStyle::Pretty {
                indent: config.output.indent,
            }
        } else {
            OutputStyle::Compact
        };

        Ok(Self {
            color_mode,
            layer,
            resize: ResizeLimits {
                max_width: config.resize.max_width,
                max_height: config.resize.max_height,
                char_aspect: config.resize.char_aspect,
            },
            output,
            parallel: config.processing.parallel,
        })
    }

    /// Check option values that cannot be expressed in the types.
    pub fn validate(&self) -> Result<()> {
        let aspect = self.resize.char_aspect;
        if !aspect.is_finite() || aspect <= 0.0 {
            return Err(ReelError::InvalidOption(format!(
                "character aspect ratio must be a positive number, got {}",
                aspect
            )));
        }
        if self.resize.max_width == Some(0) || self.resize.max_height == Some(0) {
            return Err(ReelError::InvalidOption(
                "maximum width and height must be greater than 0".to_string(),
            ));
        }
        if let OutputStyle::Pretty { indent } = self.output {
            if indent > MAX_INDENT {
                return Err(ReelError::InvalidOption(format!(
                    "indent must be at most {}, got {}",
                    MAX_INDENT, indent
                )));
            }
        }
        Ok(())
    }
}

/// Where the output document goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Atomically replace a file
    File(PathBuf),
    /// Write to standard output
    Stdout,
}

impl OutputTarget {
    /// `-` means stdout, anything else is a file path.
    pub fn from_arg(arg: &Path) -> Self {
        if arg.as_os_str() == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(arg.to_path_buf())
        }
    }
}

/// Outcome of a completed conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: usize,
    /// Character grid of the first frame (columns, rows)
    pub columns: usize,
    pub rows: usize,
    pub color_mode: ColorMode,
    pub elapsed: Duration,
}

/// A validated conversion pipeline.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: RenderOptions,
    filter: BilateralFilter,
    compositor: Compositor,
}

impl Pipeline {
    /// Validate `options` and build the pipeline.
    pub fn new(options: RenderOptions) -> Result<Self> {
        options.validate()?;
        let compositor = Compositor::new(options.color_mode, options.layer);
        Ok(Self {
            options,
            filter: BilateralFilter::new(),
            compositor,
        })
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Render a single source frame. `index` is its position in source order.
    pub fn render_frame(&self, frame: &RasterFrame, index: usize) -> Result<Frame> {
        frame.ensure_rgb(index)?;

        let resized;
        let frame = match self.options.resize.target_for(frame.width, frame.height) {
            Some((w, h)) => {
                resized = downsample(frame, w, h);
                &resized
            }
            None => frame,
        };

        let smoothed = self.filter.apply(frame, index)?;
        self.compositor.compose(&smoothed, index)
    }

    /// Render all frames, preserving source order.
    pub fn render_frames(&self, frames: &[RasterFrame]) -> Result<Animation> {
        if self.options.parallel {
            let rendered: Vec<Frame> = frames
                .par_iter()
                .enumerate()
                .map(|(index, frame)| self.render_frame(frame, index))
                .collect::<Result<_>>()?;
            Ok(rendered.into_iter().collect())
        } else {
            let mut builder = AnimationBuilder::with_capacity(frames.len());
            for (index, frame) in frames.iter().enumerate() {
                builder.push(self.render_frame(frame, index)?);
            }
            Ok(builder.finish())
        }
    }

    /// Decode `input`, render every frame and write the document to `output`.
    pub fn convert(&self, input: &Path, output: &OutputTarget) -> Result<RunSummary> {
        let start = Instant::now();

        let frames = load_frames(input)?;
        if frames.is_empty() {
            return Err(ReelError::EmptyAnimation);
        }
        log::info!(
            "Rendering {} frame(s) from {} in {} mode",
            frames.len(),
            input.display(),
            self.options.color_mode
        );

        let animation = self.render_frames(&frames)?;
        self.write(&animation, output)?;

        // Rows hold escape sequences, so the width comes from the raster grid
        let columns = match self.options.resize.target_for(frames[0].width, frames[0].height) {
            Some((w, _)) => w as usize,
            None => frames[0].width as usize,
        };
        let rows = animation.frames().first().map_or(0, Frame::height);

        let summary = RunSummary {
            frames: animation.len(),
            columns,
            rows,
            color_mode: self.options.color_mode,
            elapsed: start.elapsed(),
        };
        log::info!(
            "Converted {} frame(s) ({}x{}) in {:.2?}",
            summary.frames,
            summary.columns,
            summary.rows,
            summary.elapsed
        );
        Ok(summary)
    }

    /// Write a rendered animation to `output`.
    pub fn write(&self, animation: &Animation, output: &OutputTarget) -> Result<()> {
        match output {
            OutputTarget::File(path) => animation.save(path, self.options.output),
            OutputTarget::Stdout => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                let write_err = |source: io::Error| ReelError::OutputWrite {
                    path: PathBuf::from("-"),
                    source,
                };
                animation
                    .write_to(&mut lock, self.options.output)
                    .map_err(|e| write_err(e.into()))?;
                lock.write_all(b"\n").map_err(write_err)?;
                lock.flush().map_err(write_err)
            }
        }
    }
}
