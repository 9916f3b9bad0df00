//! Event details extracted from an email.
//!
//! The six fields mirror the labels the language model is asked to fill in.
//! Every field is optional because the model answers `null` for anything it
//! cannot determine.

use serde::{Deserialize, Serialize};

/// One of the six labelled fields of an extraction reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventField {
    Dates,
    StartTime,
    EndTime,
    EventName,
    Location,
    Notes,
}

impl EventField {
    pub const ALL: [EventField; 6] = [
        EventField::Dates,
        EventField::StartTime,
        EventField::EndTime,
        EventField::EventName,
        EventField::Location,
        EventField::Notes,
    ];

    /// Label used in the prompt and expected back in the reply
    pub fn label(self) -> &'static str {
        match self {
            EventField::Dates => "Dates",
            EventField::StartTime => "StartTime",
            EventField::EndTime => "EndTime",
            EventField::EventName => "EventName",
            EventField::Location => "Location",
            EventField::Notes => "Notes",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            EventField::Dates => {
                "The dates of the event in format YYYY-MM-DD, separated by commas if multiple"
            }
            EventField::StartTime => "The start time of the event in format HH:MM",
            EventField::EndTime => "The end time of the event in format HH:MM",
            EventField::EventName => "The name of the event",
            EventField::Location => "The location of the event",
            EventField::Notes => "Any additional notes about the event",
        }
    }

    /// Match a label loosely: case, spaces, underscores and dashes are ignored,
    /// so `start time`, `start_time` and `StartTime` all resolve to `StartTime`.
    /// The singular `Date` is accepted for `Dates`.
    pub fn from_label(label: &str) -> Option<Self> {
        let key: String = label
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();

        if key == "date" {
            return Some(EventField::Dates);
        }
        EventField::ALL.into_iter().find(|field| field.label().to_lowercase() == key)
    }
}

/// Structured result of one extraction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EventDetails {
    pub dates: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub event_name: Option<String>,
    pub location: Option<String>,
    pub notes: Option<String>,
}

impl EventDetails {
    pub fn get(&self, field: EventField) -> Option<&str> {
        let value = match field {
            EventField::Dates => &self.dates,
            EventField::StartTime => &self.start_time,
            EventField::EndTime => &self.end_time,
            EventField::EventName => &self.event_name,
            EventField::Location => &self.location,
            EventField::Notes => &self.notes,
        };
        value.as_deref()
    }

    /// Store a raw value, treating null-like answers as absent
    pub fn set(&mut self, field: EventField, raw: Option<&str>) {
        let value = raw.and_then(normalize_field_value);
        match field {
            EventField::Dates => self.dates = value,
            EventField::StartTime => self.start_time = value,
            EventField::EndTime => self.end_time = value,
            EventField::EventName => self.event_name = value,
            EventField::Location => self.location = value,
            EventField::Notes => self.notes = value,
        }
    }

    /// Dates split on commas and trimmed, in the order given.
    ///
    /// A single date without commas is a one-element list. An absent or blank
    /// field yields an empty list.
    pub fn date_list(&self) -> Vec<&str> {
        match self.dates.as_deref().map(str::trim) {
            Some(dates) if !dates.is_empty() => dates.split(',').map(str::trim).collect(),
            _ => Vec::new(),
        }
    }
}

/// Trim a reply value and map `null`-style answers to `None`
pub fn normalize_field_value(raw: &str) -> Option<String> {
    let value = raw.trim().trim_matches(|c| c == '"' || c == '\'').trim();

    if value.is_empty() {
        return None;
    }

    match value.to_lowercase().as_str() {
        "null" | "none" | "n/a" | "nil" => None,
        _ => Some(value.to_string()),
    }
}
