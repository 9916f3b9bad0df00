//! Terminal output for one pipeline run

use crate::calendar::CalendarLink;
use crate::input::SENTINEL;
use std::io::{self, Write};

pub const NO_INPUT_MESSAGE: &str = "No email content provided. Please try again.";
pub const INPUT_FAILED_MESSAGE: &str = "Failed to read email content.";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Failed to extract event details.";
pub const LINKS_FAILED_MESSAGE: &str = "Failed to generate Google Calendar links.";

/// Final state of a pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    NoInput,
    InputFailed,
    ExtractionFailed,
    LinkGenerationFailed,
    Links(Vec<CalendarLink>),
}

pub fn print_banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "Paste the email content here. Type '{}' on a new line when done:",
        SENTINEL
    )
}

pub fn present(outcome: &Outcome, out: &mut impl Write) -> io::Result<()> {
    match outcome {
        Outcome::NoInput => writeln!(out, "{}", NO_INPUT_MESSAGE),
        Outcome::InputFailed => writeln!(out, "{}", INPUT_FAILED_MESSAGE),
        Outcome::ExtractionFailed => writeln!(out, "{}", EXTRACTION_FAILED_MESSAGE),
        Outcome::LinkGenerationFailed => writeln!(out, "{}", LINKS_FAILED_MESSAGE),
        Outcome::Links(links) => {
            writeln!(out, "\nGoogle Calendar Links:")?;
            for (i, link) in links.iter().enumerate() {
                writeln!(out, "Date {}: {}", i + 1, link)?;
            }
            Ok(())
        }
    }
}
