//! OpenAI extractor implementation for mailcal

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use crate::config::LanguageModelConfig;
use crate::event::EventDetails;
use crate::parser::prompt::build_prompt;
use crate::parser::reply::parse_event_reply;
use crate::parser::traits::EventExtractor;
use crate::parser::utils::truncate_for_log;
use crate::parser::ExtractionError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

/// Sampling temperature used for every extraction request
pub const EXTRACTION_TEMPERATURE: f32 = 0.0;

/// Extractor backed by an OpenAI-compatible chat-completions API
pub struct OpenAIExtractor {
    client: Client,
    api_key: Option<SecretString>,
    model: String,
    base_url: String,
}

impl OpenAIExtractor {
    pub fn new(
        config: &LanguageModelConfig,
        api_key: Option<SecretString>,
    ) -> Result<Self, ExtractionError> {
        let client = Client::builder().timeout(Duration::from_secs(config.timeout_secs)).build()?;

        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            temperature: EXTRACTION_TEMPERATURE,
        }
    }

    /// Send the prompt and return the text of the model's reply
    async fn complete(&self, prompt: &str) -> Result<String, ExtractionError> {
        let api_key = self.api_key.as_ref().ok_or(ExtractionError::MissingApiKey)?;
        let url = format!("{}/chat/completions", self.base_url);

        debug!("Sending extraction request to {} (model {})", url, self.model);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key.expose_secret())
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("OpenAI API error: {} - {}", status, truncate_for_log(&body, 500));
            return Err(ExtractionError::Api { status, body });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&body).map_err(|e| {
            ExtractionError::InvalidResponse(format!("{}: {}", e, truncate_for_log(&body, 200)))
        })?;

        parsed
            .first_content()
            .map(|content| content.trim().to_string())
            .ok_or_else(|| ExtractionError::InvalidResponse("reply has no message content".to_string()))
    }
}

#[async_trait]
impl EventExtractor for OpenAIExtractor {
    async fn extract(&self, email_content: &str) -> Result<EventDetails, ExtractionError> {
        if email_content.trim().is_empty() {
            return Err(ExtractionError::EmptyInput);
        }

        let prompt = build_prompt(email_content);
        let reply = self.complete(&prompt).await?;
        debug!("Raw reply from OpenAI: {}", reply);

        parse_event_reply(&reply)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn extractor_for(server: &MockServer, api_key: Option<&str>) -> OpenAIExtractor {
        let config = LanguageModelConfig { base_url: server.uri(), ..Default::default() };
        OpenAIExtractor::new(&config, api_key.map(|k| SecretString::from(k.to_string()))).unwrap()
    }

    fn completion(content: &str) -> serde_json::Value {
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }]
        })
    }

    #[tokio::test]
    async fn test_extract_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .and(body_partial_json(json!({"model": "gpt-4", "temperature": 0.0})))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "```json\n{\"Dates\": \"2024-06-03\", \"StartTime\": \"14:00\", \"EndTime\": null, \"EventName\": \"Design review\", \"Location\": \"Zoom\", \"Notes\": null}\n```",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, Some("test-key"));
        let details = extractor.extract("Design review on June 3rd at 2pm over Zoom").await.unwrap();

        assert_eq!(details.dates.as_deref(), Some("2024-06-03"));
        assert_eq!(details.start_time.as_deref(), Some("14:00"));
        assert_eq!(details.end_time, None);
        assert_eq!(details.event_name.as_deref(), Some("Design review"));
        assert_eq!(details.location.as_deref(), Some("Zoom"));
    }

    #[tokio::test]
    async fn test_prompt_contains_email() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion(
                "Dates: 2024-05-10\nStartTime: 12:30\nEndTime: null\nEventName: Lunch\nLocation: null\nNotes: null",
            )))
            .expect(1)
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, Some("test-key"));
        extractor.extract("Lunch with Ana on Friday").await.unwrap();

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let content = body["messages"][0]["content"].as_str().unwrap();
        assert_eq!(body["messages"][0]["role"], "user");
        assert!(content.contains("Email Content:\nLunch with Ana on Friday"));
    }

    #[tokio::test]
    async fn test_api_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, Some("bad-key"));
        match extractor.extract("Standup at 9").await {
            Err(ExtractionError::Api { status, body }) => {
                assert_eq!(status.as_u16(), 401);
                assert_eq!(body, "invalid api key");
            }
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_api_key_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("EventName: x")))
            .expect(0)
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, None);
        assert!(matches!(
            extractor.extract("Standup at 9").await,
            Err(ExtractionError::MissingApiKey)
        ));
    }

    #[tokio::test]
    async fn test_empty_choices_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, Some("test-key"));
        assert!(matches!(
            extractor.extract("Standup at 9").await,
            Err(ExtractionError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_unparseable_reply() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(completion("Sorry, I can't help with that.")),
            )
            .mount(&server)
            .await;

        let extractor = extractor_for(&server, Some("test-key"));
        assert!(matches!(
            extractor.extract("Standup at 9").await,
            Err(ExtractionError::Unparseable(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let config = LanguageModelConfig::default();
        let extractor = OpenAIExtractor::new(&config, None).unwrap();
        assert!(matches!(extractor.extract("  \n ").await, Err(ExtractionError::EmptyInput)));
        assert_eq!(extractor.model(), "gpt-4");
    }
}
