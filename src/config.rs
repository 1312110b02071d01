//! Configuration file handling for termreel.
//!
//! Loads configuration from `~/.config/termreel/config.toml` or a custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::animation::DEFAULT_INDENT;
use crate::raster::DEFAULT_CHAR_ASPECT_RATIO;

/// Configuration file structure for termreel.
/// Loaded from ~/.config/termreel/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub resize: ResizeConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub processing: ProcessingConfig,
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
pub struct RenderConfig {
    /// Color mode name, validated when the pipeline is built
    #[serde(default)]
    pub color_mode: Option<String>,
    /// Apply colors to the cell background instead of the glyph
    #[serde(default)]
    pub background: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ResizeConfig {
    #[serde(default)]
    pub max_width: Option<u32>,
    #[serde(default)]
    pub max_height: Option<u32>,
    #[serde(default = "default_char_aspect")]
    pub char_aspect: f32,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            max_width: None,
            max_height: None,
            char_aspect: DEFAULT_CHAR_ASPECT_RATIO,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: DEFAULT_INDENT,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ProcessingConfig {
    #[serde(default = "default_true")]
    pub parallel: bool,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

fn default_true() -> bool {
    true
}

fn default_indent() -> usize {
    DEFAULT_INDENT
}

fn default_char_aspect() -> f32 {
    DEFAULT_CHAR_ASPECT_RATIO
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config = Self::from_toml(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            log::debug!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("termreel").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/termreel/config.toml")
        })
}

/// Commented default configuration written by `config init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# termreel configuration

[render]
# Color mode: grayscale, 16-color, 256-color, truecolor
color_mode = "truecolor"
# Color the cell background instead of the glyph
background = false

[resize]
# Fit frames into this many characters (unset = one character per pixel)
# max_width = 120
# max_height = 40
# Terminal character height/width ratio
char_aspect = 2.0

[output]
# Pretty-print the JSON document
pretty = true
# Spaces per indent level when pretty-printing
indent = 4

[processing]
# Render frames on all cores
parallel = true
"#;
