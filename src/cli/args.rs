//! CLI argument parsing with clap.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

use super::enums::ColorChoice;

/// Convert animated images into terminal-renderable ASCII frames
#[derive(Parser, Debug)]
#[command(name = "termreel")]
#[command(version, about = "Convert animated images into ANSI-colored ASCII frames", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Config file path
    #[arg(long, short, global = true)]
    pub config: Option<PathBuf>,

    /// Log progress and timing to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an animation to a JSON document of frames
    #[command(after_help = "EXAMPLES:
    termreel convert anim.gif                      # truecolor, writes frames.json
    termreel convert anim.gif -m 256-color -o a.json
    termreel convert anim.gif --width 80 -o -      # fit to 80 columns, print to stdout")]
    Convert(ConvertArgs),
    /// Show frame count and dimensions of an animation
    Info {
        /// Animated GIF or still image
        input: PathBuf,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(ClapArgs, Debug, Clone)]
pub struct ConvertArgs {
    /// Animated GIF or still image
    pub input: PathBuf,

    /// Output file (`-` for stdout)
    #[arg(long, short, default_value = "frames.json")]
    pub output: PathBuf,

    /// Color mode (overrides config)
    #[arg(long, short = 'm')]
    pub color_mode: Option<ColorChoice>,

    /// Color the cell background instead of the glyph
    #[arg(long)]
    pub background: bool,

    /// Maximum output width in characters
    #[arg(long)]
    pub width: Option<u32>,

    /// Maximum output height in characters
    #[arg(long)]
    pub height: Option<u32>,

    /// Terminal character height/width ratio used when resizing
    #[arg(long)]
    pub char_aspect: Option<f32>,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Render frames one at a time
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Create default config file
    Init,
}
