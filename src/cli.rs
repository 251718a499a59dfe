use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use simplelog::LevelFilter;

/// Interactive shell over a red-black tree of integers.
///
/// Reads one command per line from stdin: insert, search, delete, min, max,
/// successor, predecessor (each followed by an integer), sort, root, height,
/// display and end.
#[derive(Debug, Parser)]
#[command(name = "rbtree", version, about)]
pub(crate) struct Cli {
    /// Integers separated by whitespace or commas, inserted before the prompt starts.
    #[arg(short, long, value_name = "PATH")]
    pub(crate) input: Option<PathBuf>,

    /// Level of diagnostics written to stderr.
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub(crate) log_level: LogLevel,

    /// Do not print the `Enter a command:` prompt.
    #[arg(short, long)]
    pub(crate) quiet: bool,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}
