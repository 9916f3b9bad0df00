use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// mailcal - turn a pasted email into Google Calendar links
#[derive(Debug, Parser)]
#[command(name = "mailcal")]
#[command(about = "Turn a pasted email into Google Calendar event links", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Log level (overrides RUST_LOG)
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevel>,

    /// Write the default configuration file and exit
    #[arg(long = "init-config")]
    pub init_config: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
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
