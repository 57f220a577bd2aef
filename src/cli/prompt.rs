use std::io::{BufRead, Write};

use anyhow::Result;
use inquire::error::CustomUserError;
use inquire::validator::Validation;
use inquire::{CustomType, InquireError, Text};

use crate::domain::{Cents, format_cents, parse_cents};

/// An answered prompt: the parsed value, or the raw text when it did not parse.
pub type Answer<T> = std::result::Result<T, String>;

/// Source of answers for the command loop.
///
/// Every method returns `Ok(None)` when input has ended or the user cancelled,
/// which ends the loop. `out` is the session's output stream, for prompt
/// sources that echo their questions there.
pub trait Prompt {
    fn text(&mut self, message: &str, out: &mut dyn Write) -> Result<Option<String>>;

    fn integer(&mut self, message: &str, out: &mut dyn Write) -> Result<Option<Answer<i64>>>;

    /// A money amount. When `required` is false a blank answer is `Ok(None)`.
    fn amount(
        &mut self,
        message: &str,
        required: bool,
        out: &mut dyn Write,
    ) -> Result<Option<Answer<Option<Cents>>>>;
}

/// Reads one answer per line from any `BufRead`, writing the questions to
/// the session output. Used for `--input` scripts, piped stdin and tests.
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> Prompt for LinePrompt<R> {
    fn text(&mut self, message: &str, out: &mut dyn Write) -> Result<Option<String>> {
        write!(out, "{}", message)?;
        out.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(Some(line))
    }

    fn integer(&mut self, message: &str, out: &mut dyn Write) -> Result<Option<Answer<i64>>> {
        Ok(self
            .text(message, out)?
            .map(|raw| raw.trim().parse::<i64>().map_err(|_| raw)))
    }

    fn amount(
        &mut self,
        message: &str,
        required: bool,
        out: &mut dyn Write,
    ) -> Result<Option<Answer<Option<Cents>>>> {
        Ok(self.text(message, out)?.map(|raw| {
            if !required && raw.trim().is_empty() {
                Ok(None)
            } else {
                parse_cents(&raw).map(Some).map_err(|_| raw)
            }
        }))
    }
}

/// Interactive prompts on a terminal. Invalid numbers are rejected in place,
/// so every answer it returns has parsed.
pub struct TerminalPrompt;

fn cancelled<T>(result: std::result::Result<T, InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

impl Prompt for TerminalPrompt {
    fn text(&mut self, message: &str, _out: &mut dyn Write) -> Result<Option<String>> {
        cancelled(Text::new(message).prompt())
    }

    fn integer(&mut self, message: &str, _out: &mut dyn Write) -> Result<Option<Answer<i64>>> {
        let answer = CustomType::<i64>::new(message)
            .with_error_message("Please type a whole number")
            .prompt();
        Ok(cancelled(answer)?.map(Ok))
    }

    fn amount(
        &mut self,
        message: &str,
        required: bool,
        _out: &mut dyn Write,
    ) -> Result<Option<Answer<Option<Cents>>>> {
        if required {
            let answer = CustomType::<Cents>::new(message)
                .with_parser(&|input: &str| parse_cents(input).map_err(|_| ()))
                .with_formatter(&|cents: Cents| format_cents(cents))
                .with_error_message("Please type a valid amount, e.g. 12.50")
                .prompt();
            return Ok(cancelled(answer)?.map(|cents| Ok(Some(cents))));
        }

        let answer = Text::new(message)
            .with_validator(|input: &str| -> std::result::Result<Validation, CustomUserError> {
                if input.trim().is_empty() || parse_cents(input).is_ok() {
                    Ok(Validation::Valid)
                } else {
                    Ok(Validation::Invalid(
                        "Please type a valid amount or leave blank".into(),
                    ))
                }
            })
            .prompt();
        Ok(cancelled(answer)?.map(|raw| Ok(parse_cents(&raw).ok())))
    }
}
