//! Extractor trait for mailcal
//!
//! The language model is treated as a capability: something that turns email
//! text into [`EventDetails`] or fails. Any provider, or a canned mock in
//! tests, can stand behind it.

use super::ExtractionError;
use crate::event::EventDetails;
use async_trait::async_trait;

#[async_trait]
pub trait EventExtractor: Send + Sync {
    /// Extract event details from non-empty email text
    async fn extract(&self, email_content: &str) -> Result<EventDetails, ExtractionError>;

    /// Short name used in logs
    fn name(&self) -> &str;
}
