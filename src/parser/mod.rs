/// mailcal extraction module
///
/// Turns email text into [`EventDetails`](crate::event::EventDetails) by asking a
/// language model and parsing its reply.
pub mod openai;
pub mod prompt;
pub mod reply;
pub mod traits;
pub mod utils;

use crate::config::LanguageModelConfig;
use crate::env_manager;
use log::info;

pub use openai::OpenAIExtractor;
pub use reply::parse_event_reply;
pub use traits::EventExtractor;

/// Errors raised while extracting event details
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("Email content is empty")]
    EmptyInput,
    #[error("{} environment variable not set", env_manager::API_KEY_VAR)]
    MissingApiKey,
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("OpenAI API error: {status} - {body}")]
    Api { status: reqwest::StatusCode, body: String },
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
    #[error("Could not parse event details from reply: {0}")]
    Unparseable(String),
}

/// Factory for creating the configured extractor
pub struct ExtractorFactory;

impl ExtractorFactory {
    /// Create an extractor from configuration and the environment credential.
    ///
    /// A missing API key is not an error here; the extractor reports it when
    /// it is first asked to extract.
    pub fn create(config: &LanguageModelConfig) -> Result<Box<dyn EventExtractor>, ExtractionError> {
        info!("Creating OpenAI extractor (model {})", config.model);
        let extractor = OpenAIExtractor::new(config, env_manager::openai_api_key())?;
        Ok(Box::new(extractor))
    }
}
