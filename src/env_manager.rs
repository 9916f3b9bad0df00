use log::{debug, info, warn};
use secrecy::SecretString;
use std::env;

/// Environment variable holding the language model credential
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Load variables from a `.env` file in the current directory or its parents.
/// A missing file is not an error.
pub fn load_env_file() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded environment from {:?}", path),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }
}

/// API key from the environment; blank values count as missing
pub fn openai_api_key() -> Option<SecretString> {
    api_key_from(env::var(API_KEY_VAR).ok())
}

fn api_key_from(value: Option<String>) -> Option<SecretString> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SecretString::from)
}
