//! Google Calendar deep-link generation.
//
// Times are naive: the values the model extracted are copied into the link
// as-is, with no timezone conversion.

use super::{CalendarLink, DateFormatError};
use crate::config::CalendarConfig;
use crate::event::EventDetails;
use anyhow::{anyhow, Context, Result};
use chrono::{Duration, NaiveDateTime};
use log::{debug, info};
use url::Url;

const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M";
const COMPACT_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Builds one "create event" link per extracted date
#[derive(Debug, Clone)]
pub struct LinkGenerator {
    base_url: Url,
    default_duration: Duration,
}

impl LinkGenerator {
    pub fn new(config: &CalendarConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid calendar URL '{}'", config.base_url))?;
        let default_duration = Duration::try_minutes(config.default_duration_minutes)
            .filter(|d| *d > Duration::zero())
            .ok_or_else(|| {
                anyhow!("Invalid default duration: {} minutes", config.default_duration_minutes)
            })?;

        Ok(Self { base_url, default_duration })
    }

    /// Generate links in the order the dates are listed.
    ///
    /// Any malformed date or time fails the whole batch; no partial list is
    /// returned.
    pub fn generate(&self, details: &EventDetails) -> Result<Vec<CalendarLink>, DateFormatError> {
        let dates = details.date_list();
        if dates.is_empty() {
            return Err(DateFormatError::MissingDates);
        }

        let links = dates
            .into_iter()
            .map(|date| {
                let start_time = details
                    .start_time
                    .as_deref()
                    .ok_or_else(|| DateFormatError::MissingStartTime { date: date.to_string() })?;
                let (start, end) = self.event_window(date, start_time, details.end_time.as_deref())?;
                Ok(self.build_link(details, start, end))
            })
            .collect::<Result<Vec<_>, DateFormatError>>()?;

        info!("Generated {} calendar link(s)", links.len());
        Ok(links)
    }

    /// Start and end instants for one date
    fn event_window(
        &self,
        date: &str,
        start_time: &str,
        end_time: Option<&str>,
    ) -> Result<(NaiveDateTime, NaiveDateTime), DateFormatError> {
        let start = parse_datetime(date, start_time)?;
        let end = match end_time {
            Some(end_time) => parse_datetime(date, end_time)?,
            None => start + self.default_duration,
        };
        debug!("Event window for {}: {} - {}", date, start, end);
        Ok((start, end))
    }

    fn build_link(
        &self,
        details: &EventDetails,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> CalendarLink {
        let dates = format!("{}/{}", start.format(COMPACT_FORMAT), end.format(COMPACT_FORMAT));

        let params = [
            ("action", "TEMPLATE"),
            ("text", details.event_name.as_deref().unwrap_or("")),
            ("dates", dates.as_str()),
            ("details", details.notes.as_deref().unwrap_or("")),
            ("location", details.location.as_deref().unwrap_or("")),
        ];
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, quote_plus(value)))
            .collect::<Vec<_>>()
            .join("&");

        let mut url = self.base_url.clone();
        url.set_query(Some(&query));
        CalendarLink(url.to_string())
    }
}

/// Form-encode a query value the way common web stacks do: space becomes `+`,
/// only ASCII alphanumerics and `-._~` stay literal.
fn quote_plus(value: &str) -> String {
    // form_urlencoded keeps `*` and escapes `~`; swap both to the RFC 3986 set
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('*', "%2A")
        .replace("%7E", "~")
}

fn parse_datetime(date: &str, time: &str) -> Result<NaiveDateTime, DateFormatError> {
    let value = format!("{}T{}", date, time.trim());
    NaiveDateTime::parse_from_str(&value, DATETIME_FORMAT)
        .map_err(|source| DateFormatError::InvalidDateTime { value, source })
}
