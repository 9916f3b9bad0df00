use crate::calendar::{CalendarLink, LinkGenerator};
use crate::config::Config;
use crate::event::EventDetails;
use crate::input::{self, InputError, LineSource};
use crate::parser::{EventExtractor, ExtractorFactory};
use crate::presenter::{self, Outcome};
use anyhow::Result;
use std::io::{self, Write};

/// The email-to-calendar pipeline: collect, extract, generate, present.
///
/// Every stage catches and logs its own failure; a failed stage ends the run
/// with a failure [`Outcome`] instead of an error.
pub struct Application {
    extractor: Box<dyn EventExtractor>,
    link_generator: LinkGenerator,
}

impl Application {
    pub fn new(extractor: Box<dyn EventExtractor>, link_generator: LinkGenerator) -> Self {
        Self { extractor, link_generator }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let extractor = ExtractorFactory::create(&config.language_model)?;
        let link_generator = LinkGenerator::new(&config.calendar)?;
        Ok(Self::new(extractor, link_generator))
    }

    /// Run once against the process's stdin and stdout
    pub async fn run(&self) -> Result<()> {
        log::info!("Starting mailcal with {} extractor", self.extractor.name());

        let mut stdout = io::stdout().lock();
        presenter::print_banner(&mut stdout)?;
        stdout.flush()?;
        drop(stdout);

        let outcome = match input::stdin_source() {
            Ok(mut source) => self.process(source.as_mut()).await,
            Err(e) => {
                log::error!("Failed to open input: {}", e);
                Outcome::InputFailed
            }
        };

        presenter::present(&outcome, &mut io::stdout().lock())?;
        Ok(())
    }

    /// Drive one email through the pipeline
    pub async fn process(&self, source: &mut dyn LineSource) -> Outcome {
        let email_content = match input::collect_email_text(source) {
            Ok(text) => text,
            Err(InputError::NoInput) => {
                log::error!("No email content provided. Please try again.");
                return Outcome::NoInput;
            }
            Err(e) => {
                log::error!("Failed to read email content: {}", e);
                return Outcome::InputFailed;
            }
        };

        let Some(details) = self.extract_event_details(&email_content).await else {
            return Outcome::ExtractionFailed;
        };

        match self.generate_links(&details) {
            Some(links) => Outcome::Links(links),
            None => Outcome::LinkGenerationFailed,
        }
    }

    pub async fn extract_event_details(&self, email_content: &str) -> Option<EventDetails> {
        match self.extractor.extract(email_content).await {
            Ok(details) => {
                log::info!("Extracted event details: {:?}", details);
                Some(details)
            }
            Err(e) => {
                log::error!("Error extracting event details: {}", e);
                None
            }
        }
    }

    pub fn generate_links(&self, details: &EventDetails) -> Option<Vec<CalendarLink>> {
        match self.link_generator.generate(details) {
            Ok(links) => {
                let urls: Vec<&str> = links.iter().map(CalendarLink::as_str).collect();
                log::info!("Generated calendar links: {:?}", urls);
                Some(links)
            }
            Err(e) => {
                log::error!("Error generating calendar link: {}", e);
                None
            }
        }
    }
}
