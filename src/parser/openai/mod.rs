//! OpenAI extractor module for mailcal
//!
//! This module talks to an OpenAI-compatible chat-completions endpoint.

mod extractor;
mod types;

pub use extractor::{OpenAIExtractor, EXTRACTION_TEMPERATURE};
pub use types::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatMessageResponse,
};
