use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MODEL: &str = "gpt-4";
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_CALENDAR_URL: &str = "https://calendar.google.com/calendar/render";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub language_model: LanguageModelConfig,
    #[serde(default)]
    pub calendar: CalendarConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageModelConfig {
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for LanguageModelConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_LLM_BASE_URL.to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarConfig {
    pub base_url: String,
    pub default_duration_minutes: i64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_CALENDAR_URL.to_string(), default_duration_minutes: 60 }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;

        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.language_model.model.trim().is_empty() {
            return Err(anyhow!("language_model.model must not be empty"));
        }
        if self.language_model.timeout_secs == 0 {
            return Err(anyhow!("language_model.timeout_secs must be greater than zero"));
        }
        if self.calendar.default_duration_minutes <= 0 {
            return Err(anyhow!("calendar.default_duration_minutes must be greater than zero"));
        }
        url::Url::parse(&self.calendar.base_url)
            .with_context(|| format!("Invalid calendar.base_url '{}'", self.calendar.base_url))?;
        url::Url::parse(&self.language_model.base_url).with_context(|| {
            format!("Invalid language_model.base_url '{}'", self.language_model.base_url)
        })?;
        Ok(())
    }
}

pub fn get_config_path() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("com", "mailcal", "mailcal")
        .context("Failed to determine config directory")?;

    Ok(proj_dirs.config_dir().join("config.toml"))
}
