use std::fmt;

mod links;

pub use links::*;

/// Errors raised while turning event details into calendar links
#[derive(Debug, thiserror::Error)]
pub enum DateFormatError {
    #[error("No event dates were provided")]
    MissingDates,
    #[error("No start time was provided for {date}")]
    MissingStartTime { date: String },
    #[error("Invalid date/time '{value}': {source}")]
    InvalidDateTime {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

/// A Google Calendar "create event" deep link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLink(String);

impl CalendarLink {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalendarLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
