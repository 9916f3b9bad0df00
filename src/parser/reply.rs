//! Tolerant parser for model replies.
//!
//! Models do not always follow the requested format exactly. A reply may wrap
//! the JSON block in prose, drop the code fence, or answer with plain
//! `Label: value` lines. The parser tries a JSON object first and falls back
//! to scanning lines for known labels. Either way all six labels must be
//! present; a `null` value is fine, a missing label is not.

use super::utils::truncate_for_log;
use super::ExtractionError;
use crate::event::{EventDetails, EventField};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)```").expect("valid fence regex"));

static LABEL_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?i)^[\s\-*•>#"'`]*(dates?|start[\s_-]*time|end[\s_-]*time|event[\s_-]*name|location|notes)["'`*]*\s*[:=]\s*(.*)$"#,
    )
    .expect("valid label regex")
});

/// Parse a model reply into event details
pub fn parse_event_reply(reply: &str) -> Result<EventDetails, ExtractionError> {
    if let Some(details) = locate_json(reply).and_then(parse_json_object) {
        debug!("Parsed reply as JSON object");
        return Ok(details);
    }

    if let Some(details) = scan_labels(reply) {
        debug!("Parsed reply by scanning labelled lines");
        return Ok(details);
    }

    Err(ExtractionError::Unparseable(truncate_for_log(reply.trim(), 200)))
}

/// Find the most likely JSON object in the reply
fn locate_json(reply: &str) -> Option<&str> {
    if let Some(block) = FENCED_BLOCK.captures(reply).and_then(|caps| caps.get(1)) {
        return Some(block.as_str().trim());
    }

    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    (start < end).then(|| &reply[start..=end])
}

fn parse_json_object(candidate: &str) -> Option<EventDetails> {
    let value: Value = serde_json::from_str(candidate).ok()?;
    let object = value.as_object()?;

    let mut details = EventDetails::default();
    let mut seen = Vec::new();
    for (key, value) in object {
        if let Some(field) = EventField::from_label(key) {
            details.set(field, json_value_to_string(value).as_deref());
            seen.push(field);
        }
    }

    has_every_label(&seen).then_some(details)
}

/// Every field must be labelled in the reply; a null value still counts
fn has_every_label(seen: &[EventField]) -> bool {
    let missing: Vec<&str> =
        EventField::ALL.iter().filter(|f| !seen.contains(f)).map(|f| f.label()).collect();
    if !missing.is_empty() {
        debug!("Reply is missing labels: {}", missing.join(", "));
    }
    missing.is_empty()
}

fn json_value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(json_value_to_string).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::Object(_) => None,
    }
}

fn scan_labels(reply: &str) -> Option<EventDetails> {
    let mut details = EventDetails::default();
    let mut seen = Vec::new();

    for line in reply.lines() {
        let Some(caps) = LABEL_LINE.captures(line) else {
            continue;
        };
        let label = caps.get(1).map_or("", |m| m.as_str());
        let Some(field) = EventField::from_label(label) else {
            continue;
        };

        let raw = caps.get(2).map_or("", |m| m.as_str());
        let value = raw.trim().trim_end_matches(',').trim().trim_matches('*');
        details.set(field, Some(value));
        seen.push(field);
    }

    has_every_label(&seen).then_some(details)
}
