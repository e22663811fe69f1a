//! Logging initialization
//!
//! Diagnostics go to stderr through the `log` facade so stdout carries only
//! rendered results.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Map the quiet/verbose flags to a level filter
pub fn level_for(quiet: bool, verbose: u8) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Initialize the terminal logger on stderr
pub fn initialize(level: LevelFilter, no_color: bool) {
    let color = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };

    // Ignore the error if a logger was already set.
    let _ = TermLogger::init(level, build_config(), TerminalMode::Stderr, color);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .set_thread_level(LevelFilter::Off)
        .build()
}
