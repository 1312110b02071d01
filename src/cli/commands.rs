//! Subcommand handlers for convert, info and config actions.

use std::path::Path;

use super::args::{ConfigAction, ConvertArgs};
use crate::animation::OutputStyle;
use crate::config::{default_path, Config, DEFAULT_CONFIG_TOML};
use crate::error::{ReelError, Result};
use crate::pipeline::{OutputTarget, Pipeline, RenderOptions, RunSummary};
use crate::raster::load_frames;

/// Merge command-line overrides into options loaded from the config file.
pub fn apply_overrides(mut options: RenderOptions, args: &ConvertArgs) -> RenderOptions {
    if let Some(choice) = args.color_mode {
        options.color_mode = choice.into();
    }
    if args.background {
        options.layer = crate::ascii::ColorLayer::Background;
    }
    if args.width.is_some() {
        options.resize.max_width = args.width;
    }
    if args.height.is_some() {
        options.resize.max_height = args.height;
    }
    if let Some(aspect) = args.char_aspect {
        options.resize.char_aspect = aspect;
    }
    if args.compact {
        options.output = OutputStyle::Compact;
    }
    if args.sequential {
        options.parallel = false;
    }
    options
}

/// Run the convert subcommand.
///
/// Options are resolved and validated before the input is opened.
pub fn run_convert(args: &ConvertArgs, config: &Config) -> Result<RunSummary> {
    let options = apply_overrides(RenderOptions::from_config(config)?, args);
    let pipeline = Pipeline::new(options)?;
    let target = OutputTarget::from_arg(&args.output);

    let summary = pipeline.convert(&args.input, &target)?;

    if let OutputTarget::File(path) = &target {
        eprintln!(
            "Done: {} frame(s), {}x{} characters, {} -> {}",
            summary.frames,
            summary.columns,
            summary.rows,
            summary.color_mode,
            path.display()
        );
    }
    Ok(summary)
}

/// Print frame count and dimensions of an input file.
pub fn show_info(input: &Path, config: &Config) -> Result<()> {
    let options = RenderOptions::from_config(config)?;
    let frames = load_frames(input)?;
    let first = frames.first().ok_or(ReelError::EmptyAnimation)?;

    println!("{}", input.display());
    println!("  Frames: {}", frames.len());
    println!("  Size: {}x{} pixels", first.width, first.height);
    match options.resize.target_for(first.width, first.height) {
        Some((w, h)) => println!("  Output grid: {}x{} characters (resized)", w, h),
        None => println!("  Output grid: {}x{} characters", first.width, first.height),
    }
    Ok(())
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction, config_path: Option<&Path>) -> Result<()> {
    let path = config_path
        .map(Path::to_path_buf)
        .unwrap_or_else(default_path);

    match action {
        ConfigAction::Show => {
            let config = Config::load(Some(&path))?;
            let options = RenderOptions::from_config(&config)?;

            println!("Current configuration:");
            println!("  Color mode: {}", options.color_mode);
            println!("  Layer: {:?}", options.layer);
            println!(
                "  Max size: {} x {}",
                options
                    .resize
                    .max_width
                    .map_or("-".to_string(), |w| w.to_string()),
                options
                    .resize
                    .max_height
                    .map_or("-".to_string(), |h| h.to_string())
            );
            println!("  Char aspect: {}", options.resize.char_aspect);
            match options.output {
                OutputStyle::Pretty { indent } => println!("  Output: pretty (indent {})", indent),
                OutputStyle::Compact => println!("  Output: compact"),
            }
            println!("  Parallel: {}", if options.parallel { "yes" } else { "no" });
            println!();

            if path.exists() {
                println!("Config file: {} (exists)", path.display());
            } else {
                println!("Config file: {} (not found)", path.display());
            }
            Ok(())
        }
        ConfigAction::Init => {
            let write_err = |source: std::io::Error| ReelError::OutputWrite {
                path: path.clone(),
                source,
            };

            if path.exists() {
                return Err(ReelError::InvalidOption(format!(
                    "config file already exists: {} (use 'termreel config show' to view it)",
                    path.display()
                )));
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG_TOML).map_err(write_err)?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}
