use std::fs;
use std::path::PathBuf;

use clap::Parser;

use ticklist::io::config_io::read_config;
use ticklist::{logging, tui};

/// A tiny persistent to-do list with a terminal UI
#[derive(Parser)]
#[command(name = "tk", about = "[x] ticklist - your to-dos, one key away", version)]
struct Cli {
    /// Keep data in this directory instead of ~/.ticklist
    #[arg(short = 'C', long = "dir")]
    dir: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let data_dir = match cli.dir {
        Some(dir) => dir,
        None => default_data_dir()?,
    };
    fs::create_dir_all(&data_dir)?;

    let config = read_config(&data_dir)?;
    // Keep the handle alive for the whole session; dropping it stops logging
    let _logger = logging::init(&config.log.level, &data_dir)?;

    tui::run(&data_dir, &config)
}

fn default_data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    match std::env::var_os("HOME") {
        Some(home) => Ok(PathBuf::from(home).join(".ticklist")),
        None => Err("could not determine home directory; pass --dir".into()),
    }
}
