pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod env_manager;
pub mod event;
pub mod input;
pub mod parser;
pub mod presenter;

use anyhow::Result;
use env_logger::Env;
use log::*;

pub async fn run(config: &Config) -> Result<()> {
    let app = app::Application::from_config(config)?;
    info!("Initializing mailcal pipeline");
    app.run().await
}

/// Log to stderr with a timestamp; `level` overrides `RUST_LOG`
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("info"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder
        .format(|buf, record| {
            use chrono::Local;
            use std::io::Write;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use calendar::{CalendarLink, DateFormatError, LinkGenerator};
pub use config::Config;
pub use event::EventDetails;
pub use presenter::Outcome;
