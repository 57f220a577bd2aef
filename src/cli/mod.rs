mod prompt;

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub use prompt::{Answer, LinePrompt, Prompt, TerminalPrompt};

use crate::application::{AppError, BudgetStatus, ExpenseTracker};
use crate::domain::{Cents, ExpenseUpdate, format_cents};

pub const COMMAND_PROMPT: &str =
    "Enter command (add, update, delete, view, summary, monthly, budget, export, exit): ";

/// Expense Ledger - track expenses and monthly budgets
#[derive(Parser)]
#[command(name = "expense-ledger")]
#[command(about = "An in-memory expense tracker with monthly budgets and CSV export")]
#[command(version)]
pub struct Cli {
    /// Read commands from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Install the stderr log subscriber. `RUST_LOG` takes precedence over
    /// the verbosity flag.
    pub fn init_logging(&self) {
        let default_filter = if self.verbose {
            "expense_ledger=debug"
        } else {
            "expense_ledger=error"
        };

        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
            )
            .with_writer(io::stderr)
            .init();
    }

    /// Scripts and piped stdin are read line by line; a terminal gets
    /// interactive prompts.
    pub fn run(self) -> Result<()> {
        let mut tracker = ExpenseTracker::new();
        let stdout = io::stdout();

        match &self.input {
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                Session::new(BufReader::new(file), stdout.lock()).run(&mut tracker)
            }
            None if io::stdin().is_terminal() => {
                Session::with_prompt(TerminalPrompt, stdout.lock()).run(&mut tracker)
            }
            None => Session::new(io::stdin().lock(), stdout.lock()).run(&mut tracker),
        }
    }
}

/// Commands understood by the interactive loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Update,
    Delete,
    View,
    Summary,
    Monthly,
    Budget,
    Export,
    Exit,
}

impl Command {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "add" => Some(Command::Add),
            "update" => Some(Command::Update),
            "delete" => Some(Command::Delete),
            "view" => Some(Command::View),
            "summary" => Some(Command::Summary),
            "monthly" => Some(Command::Monthly),
            "budget" => Some(Command::Budget),
            "export" => Some(Command::Export),
            "exit" => Some(Command::Exit),
            _ => None,
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Returns early with `Flow::Exit` when the prompt source is exhausted.
macro_rules! answer {
    ($prompt:expr) => {
        match $prompt? {
            Some(answer) => answer,
            None => return Ok(Flow::Exit),
        }
    };
}

/// Command loop over any prompt source. Results go to `writer`.
///
/// A command reads all of its answers before any of them is checked, so a
/// bad number never leaves unread answers to be taken as commands.
pub struct Session<P, W> {
    prompt: P,
    writer: W,
}

impl<R: BufRead, W: Write> Session<LinePrompt<R>, W> {
    /// Line-oriented session; questions are echoed to `writer`.
    pub fn new(reader: R, writer: W) -> Self {
        Self::with_prompt(LinePrompt::new(reader), writer)
    }
}

impl<P: Prompt, W: Write> Session<P, W> {
    pub fn with_prompt(prompt: P, writer: W) -> Self {
        Self { prompt, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Run until `exit` or end of input.
    pub fn run(&mut self, tracker: &mut ExpenseTracker) -> Result<()> {
        while let Some(line) = self.text(COMMAND_PROMPT)? {
            let flow = match Command::from_str(&line) {
                Some(command) => {
                    debug!(?command, "dispatching");
                    self.dispatch(command, tracker)?
                }
                None => {
                    writeln!(self.writer, "Unknown command.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        self.writer.flush()?;
        Ok(())
    }

    fn dispatch(&mut self, command: Command, tracker: &mut ExpenseTracker) -> Result<Flow> {
        match command {
            Command::Add => self.add(tracker),
            Command::Update => self.update(tracker),
            Command::Delete => self.delete(tracker),
            Command::View => self.view(tracker),
            Command::Summary => {
                writeln!(
                    self.writer,
                    "Total expenses: {}",
                    format_cents(tracker.total_summary())
                )?;
                Ok(Flow::Continue)
            }
            Command::Monthly => self.monthly(tracker),
            Command::Budget => self.budget(tracker),
            Command::Export => self.export(tracker),
            Command::Exit => Ok(Flow::Exit),
        }
    }

    fn add(&mut self, tracker: &mut ExpenseTracker) -> Result<Flow> {
        let description = answer!(self.text("Enter description: "));
        let amount = answer!(self.amount("Enter amount: ", true));
        let category = answer!(self.text("Enter category: "));

        let amount_cents = match amount {
            Ok(Some(cents)) => cents,
            Ok(None) => return self.invalid("amount", ""),
            Err(raw) => return self.invalid("amount", &raw),
        };

        let expense = tracker.add(description, amount_cents, category);
        writeln!(self.writer, "Added expense: {}", expense)?;
        Ok(Flow::Continue)
    }

    fn update(&mut self, tracker: &mut ExpenseTracker) -> Result<Flow> {
        let index = answer!(self.integer("Enter expense index to update: "));
        let description =
            answer!(self.text("Enter new description (leave blank to keep current): "));
        let amount = answer!(self.amount("Enter new amount (leave blank to keep current): ", false));
        let category = answer!(self.text("Enter new category (leave blank to keep current): "));

        let index = match to_index(index) {
            Ok(index) => index,
            Err(raw) => return self.invalid("index", &raw),
        };
        let amount_cents = match amount {
            Ok(cents) => cents,
            Err(raw) => return self.invalid("amount", &raw),
        };
        let Some(index) = index else {
            return self.not_found();
        };

        let update = ExpenseUpdate {
            description: non_empty(description),
            amount_cents,
            category: non_empty(category),
        };

        match tracker.update(index, &update).map(|e| e.to_string()) {
            Ok(expense) => writeln!(self.writer, "Updated expense: {}", expense)?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete(&mut self, tracker: &mut ExpenseTracker) -> Result<Flow> {
        let index = answer!(self.integer("Enter expense index to delete: "));

        let index = match to_index(index) {
            Ok(Some(index)) => index,
            Ok(None) => return self.not_found(),
            Err(raw) => return self.invalid("index", &raw),
        };

        match tracker.delete(index) {
            Ok(removed) => writeln!(self.writer, "Deleted expense: {}", removed)?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn view(&mut self, tracker: &ExpenseTracker) -> Result<Flow> {
        for (index, expense) in tracker.list() {
            writeln!(self.writer, "{}: {}", index, expense)?;
        }
        Ok(Flow::Continue)
    }

    fn monthly(&mut self, tracker: &ExpenseTracker) -> Result<Flow> {
        let month = answer!(self.integer("Enter month (1-12): "));

        let month = match to_month(month) {
            Ok(month) => month,
            Err(raw) => return self.invalid("month", &raw),
        };

        writeln!(
            self.writer,
            "Total expenses for month {}: {}",
            month,
            format_cents(tracker.monthly_summary(month))
        )?;
        Ok(Flow::Continue)
    }

    fn budget(&mut self, tracker: &mut ExpenseTracker) -> Result<Flow> {
        let month = answer!(self.integer("Enter month (1-12): "));
        let amount = answer!(self.amount("Enter budget amount: ", true));

        let month = match to_month(month) {
            Ok(month) => month,
            Err(raw) => return self.invalid("month", &raw),
        };
        let amount_cents = match amount {
            Ok(Some(cents)) => cents,
            Ok(None) => return self.invalid("amount", ""),
            Err(raw) => return self.invalid("amount", &raw),
        };

        tracker.set_budget(month, amount_cents);
        writeln!(
            self.writer,
            "Budget set for month {}: {}",
            month,
            format_cents(amount_cents)
        )?;

        let check = tracker.check_budget(month);
        match check.status {
            BudgetStatus::Exceeded { overrun } => writeln!(
                self.writer,
                "Warning: You have exceeded your budget for month {} by {}",
                month,
                format_cents(overrun)
            )?,
            BudgetStatus::WithinBudget => {
                writeln!(self.writer, "You are within your budget for month {}.", month)?
            }
        }
        Ok(Flow::Continue)
    }

    fn export(&mut self, tracker: &ExpenseTracker) -> Result<Flow> {
        let path = answer!(self.text("Enter filename to export to (e.g., expenses.csv): "));
        let path = path.trim();

        match tracker.export_to_file(path) {
            Ok(count) => writeln!(
                self.writer,
                "Expenses exported to {} ({} rows)",
                path, count
            )?,
            Err(err) => self.report(err)?,
        }
        Ok(Flow::Continue)
    }

    fn text(&mut self, message: &str) -> Result<Option<String>> {
        self.prompt.text(message, &mut self.writer)
    }

    fn integer(&mut self, message: &str) -> Result<Option<Answer<i64>>> {
        self.prompt.integer(message, &mut self.writer)
    }

    fn amount(&mut self, message: &str, required: bool) -> Result<Option<Answer<Option<Cents>>>> {
        self.prompt.amount(message, required, &mut self.writer)
    }

    fn invalid(&mut self, field: &str, input: &str) -> Result<Flow> {
        writeln!(self.writer, "Invalid {}: {}", field, input.trim())?;
        Ok(Flow::Continue)
    }

    fn not_found(&mut self) -> Result<Flow> {
        writeln!(self.writer, "Expense not found.")?;
        Ok(Flow::Continue)
    }

    fn report(&mut self, err: AppError) -> Result<()> {
        match err {
            AppError::ExpenseNotFound { .. } => {
                self.not_found()?;
            }
            AppError::Io(_) | AppError::Csv(_) => {
                writeln!(self.writer, "Export failed: {}", err)?;
            }
        }
        Ok(())
    }
}

/// Map an index answer to a ledger position. `Ok(None)` is an integer that
/// can never be a position: negative, or too large to represent.
fn to_index(answer: Answer<i64>) -> Answer<Option<usize>> {
    match answer {
        Ok(value) => Ok(usize::try_from(value).ok()),
        Err(raw) if is_integer_text(&raw) => Ok(None),
        Err(raw) => Err(raw),
    }
}

fn to_month(answer: Answer<i64>) -> Answer<i32> {
    let value = answer?;
    i32::try_from(value).map_err(|_| value.to_string())
}

fn is_integer_text(raw: &str) -> bool {
    let digits = raw.trim();
    let digits = digits.strip_prefix('-').unwrap_or(digits);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() { None } else { Some(s) }
}
