mod cli;
mod error;
mod paths;

use std::fs::{self, File};
use std::process::ExitCode;

use clap::Parser;
use log::error;
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Terminal logging at the requested verbosity, plus a debug log file in the cache dir.
fn init_logging(verbosity: u8) {
    let term_level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    paths::rotate_logs();
    if let Some(path) = paths::log_file() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        if let Ok(file) = File::create(&path) {
            loggers.push(WriteLogger::new(LevelFilter::Debug, Config::default(), file));
        }
    }

    let _ = CombinedLogger::init(loggers);
}
