use clap::Parser;
use tracing_subscriber::filter::LevelFilter;

use termreel::cli::{self, Args, Command};
use termreel::config::Config;
use termreel::Result;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    // Also installs the bridge for `log` records emitted by the library
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Convert(convert) => {
            let config = Config::load(args.config.as_deref())?;
            cli::run_convert(&convert, &config)?;
        }
        Command::Info { input } => {
            let config = Config::load(args.config.as_deref())?;
            cli::show_info(&input, &config)?;
        }
        Command::Config { action } => {
            cli::handle_config_action(action, args.config.as_deref())?;
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
