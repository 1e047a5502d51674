//! Logger setup for the command-line front end.
//!
//! Warnings (or everything from debug up with `--verbose`) go to stderr so
//! they never mix with command output; the full debug log is always written
//! to a file in the temp directory.

use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use std::error::Error;
use std::fs::File;
use std::path::PathBuf;

pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("sonicly.log")
}

pub fn init_logging(verbose: bool) -> Result<(), Box<dyn Error>> {
    let term_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    // Keep dependency chatter (hyper, rustls) out of the logs
    let config = ConfigBuilder::new()
        .add_filter_allow_str("sonicly")
        .build();

    CombinedLogger::init(vec![
        TermLogger::new(
            term_level,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(LevelFilter::Debug, config, File::create(log_file_path())?),
    ])?;

    Ok(())
}
