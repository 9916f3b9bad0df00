//! Collects the pasted email body from the terminal.
//!
//! Lines are read until a line equal to `END` (any case, surrounding
//! whitespace ignored). End of input before the sentinel ends collection too.

use crate::parser::utils::sanitize_user_input;
use log::{debug, info};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, IsTerminal};

/// Line that terminates pasted input
pub const SENTINEL: &str = "END";

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("No email content provided")]
    NoInput,
    #[error("Input interrupted")]
    Interrupted,
    #[error("Failed to read input: {0}")]
    Read(#[from] io::Error),
    #[error("Terminal input failed: {0}")]
    Terminal(#[from] ReadlineError),
}

/// Source of input lines, without their trailing newline
pub trait LineSource {
    /// Returns `Ok(None)` at end of input
    fn next_line(&mut self) -> Result<Option<String>, InputError>;
}

/// Reads lines from any buffered reader (pipes, files, tests)
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }
}

/// Interactive line editor for terminals
pub struct TerminalSource {
    editor: DefaultEditor,
}

impl TerminalSource {
    pub fn new() -> Result<Self, InputError> {
        Ok(Self { editor: DefaultEditor::new()? })
    }
}

impl LineSource for TerminalSource {
    fn next_line(&mut self) -> Result<Option<String>, InputError> {
        match self.editor.readline("") {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Interrupted) => Err(InputError::Interrupted),
            Err(err) => Err(err.into()),
        }
    }
}

/// Pick a line source for stdin: a line editor when attached to a terminal,
/// a plain buffered reader otherwise.
pub fn stdin_source() -> Result<Box<dyn LineSource>, InputError> {
    if io::stdin().is_terminal() {
        debug!("Reading email content from terminal");
        Ok(Box::new(TerminalSource::new()?))
    } else {
        debug!("Reading email content from redirected stdin");
        Ok(Box::new(ReaderSource::new(io::stdin().lock())))
    }
}

pub fn is_sentinel(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case(SENTINEL)
}

/// Read lines until the sentinel and return them joined and trimmed.
///
/// Fails with [`InputError::NoInput`] when nothing but whitespace was entered
/// or when the user pressed Ctrl-C.
pub fn collect_email_text(source: &mut dyn LineSource) -> Result<String, InputError> {
    let mut lines = Vec::new();

    loop {
        match source.next_line() {
            Ok(Some(line)) if is_sentinel(&line) => break,
            Ok(Some(line)) => lines.push(sanitize_user_input(&line)),
            Ok(None) => {
                debug!("End of input reached before '{}'", SENTINEL);
                break;
            }
            Err(InputError::Interrupted) => {
                info!("Input interrupted, discarding {} line(s)", lines.len());
                return Err(InputError::NoInput);
            }
            Err(e) => return Err(e),
        }
    }

    let text = lines.join("\n").trim().to_string();
    if text.is_empty() {
        return Err(InputError::NoInput);
    }

    debug!("Collected {} line(s) of email content", lines.len());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;
    use test_case::test_case;

    fn collect(input: &str) -> Result<String, InputError> {
        let mut source = ReaderSource::new(Cursor::new(input.to_string()));
        collect_email_text(&mut source)
    }

    struct InterruptedSource {
        lines: Vec<String>,
    }

    impl LineSource for InterruptedSource {
        fn next_line(&mut self) -> Result<Option<String>, InputError> {
            if self.lines.is_empty() {
                Err(InputError::Interrupted)
            } else {
                Ok(Some(self.lines.remove(0)))
            }
        }
    }

    #[test_case("END" ; "upper")]
    #[test_case("end" ; "lower")]
    #[test_case("  End \t" ; "padded mixed case")]
    fn test_sentinel_detection(line: &str) {
        assert!(is_sentinel(line));
    }

    #[test]
    fn test_sentinel_must_be_whole_line() {
        assert!(!is_sentinel("The END"));
        assert!(!is_sentinel("ENDING"));
    }

    #[test]
    fn test_only_sentinel_is_no_input() {
        assert!(matches!(collect("END\n"), Err(InputError::NoInput)));
    }

    #[test]
    fn test_whitespace_only_is_no_input() {
        assert!(matches!(collect("   \n\t\n  end  \n"), Err(InputError::NoInput)));
    }

    #[test]
    fn test_lines_are_joined_and_trimmed() {
        let text = collect("\n  Hi team,\r\nStandup moves to 2024-05-01 at 09:30.\n\nEND\nignored\n").unwrap();
        assert_eq!(text, "Hi team,\nStandup moves to 2024-05-01 at 09:30.");
    }

    #[test]
    fn test_eof_without_sentinel_keeps_lines() {
        let text = collect("Lunch on Friday\nat noon").unwrap();
        assert_eq!(text, "Lunch on Friday\nat noon");
    }

    #[test]
    fn test_control_characters_are_removed() {
        let text = collect("Meeting\u{0007} at 10\nEND\n").unwrap();
        assert_eq!(text, "Meeting at 10");
    }

    #[test]
    fn test_interrupt_discards_input() {
        let mut source = InterruptedSource { lines: vec!["Dinner at 7".to_string()] };
        assert!(matches!(collect_email_text(&mut source), Err(InputError::NoInput)));
    }
}
