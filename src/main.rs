use anyhow::Result;
use clap::Parser;
use log::info;
use mailcal::cli::Cli;
use mailcal::config::{self, Config};
use mailcal::env_manager;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    mailcal::init_logger(cli.log_level.map(Into::into));
    env_manager::load_env_file();

    let config_path = match cli.config {
        Some(path) => path,
        None => config::get_config_path()?,
    };

    if cli.init_config {
        Config::default().save_to(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;
    info!("Using model {}", config.language_model.model);

    mailcal::run(&config).await
}
