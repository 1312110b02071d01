//! Animation assembly and serialization.
//!
//! Frames are collected in source order into an [`Animation`], which is
//! written once as a JSON array of frames, each an array of row strings.

use std::io::{self, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::ascii::Frame;
use crate::error::{ReelError, Result};

/// Default indent width for pretty output.
pub const DEFAULT_INDENT: usize = 4;

/// JSON layout of the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Pretty-printed with the given number of spaces per level
    Pretty { indent: usize },
    /// Single line
    Compact,
}

impl Default for OutputStyle {
    fn default() -> Self {
        OutputStyle::Pretty {
            indent: DEFAULT_INDENT,
        }
    }
}

/// Ordered frames of a rendered animation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Animation {
    frames: Vec<Frame>,
}

impl Animation {
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Serialize to `writer`.
    pub fn write_to<W: Write>(&self, writer: W, style: OutputStyle) -> serde_json::Result<()> {
        match style {
            OutputStyle::Pretty { indent } => {
                let indent = vec![b' '; indent];
                let formatter = serde_json::ser::PrettyFormatter::with_indent(&indent);
                let mut ser = serde_json::Serializer::with_formatter(writer, formatter);
                self.serialize(&mut ser)
            }
            OutputStyle::Compact => serde_json::to_writer(writer, self),
        }
    }

    /// Serialize to a string.
    pub fn to_json(&self, style: OutputStyle) -> Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, style)?;
        // serde_json only emits valid UTF-8
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Write the document to `path` atomically.
    ///
    /// The JSON is written to a temporary file next to `path` and renamed
    /// over it once complete, so readers never observe a partial document.
    pub fn save(&self, path: &Path, style: OutputStyle) -> Result<()> {
        let write_err = |source: io::Error| ReelError::OutputWrite {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
        {
            let mut writer = io::BufWriter::new(tmp.as_file_mut());
            self.write_to(&mut writer, style)
                .map_err(|e| write_err(e.into()))?;
            writer.write_all(b"\n").map_err(write_err)?;
            writer.flush().map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(path).map_err(|e| write_err(e.error))?;

        log::info!("Wrote {} frame(s) to {}", self.len(), path.display());
        Ok(())
    }

    /// Read a document previously written by [`Animation::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|source| ReelError::SourceOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_reader(io::BufReader::new(file))?)
    }
}

impl FromIterator<Frame> for Animation {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}

/// Accumulates frames in the order they are produced.
#[derive(Debug, Default)]
pub struct AnimationBuilder {
    frames: Vec<Frame>,
}

impl AnimationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            frames: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Freeze the collected frames.
    pub fn finish(self) -> Animation {
        Animation {
            frames: self.frames,
        }
    }
}
