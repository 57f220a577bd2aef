use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use crate::domain::{
    Budgets, Cents, Expense, ExpenseUpdate, Ledger, format_cents, monthly_total, overrun,
    total_amount,
};
use crate::io::Exporter;

use super::{AppError, BudgetCheck, BudgetStatus};

/// Owns every piece of runtime state: the expense ledger and the monthly
/// budgets. Created empty at startup and dropped at exit.
/// This is the primary interface for the command loop.
#[derive(Debug, Default)]
pub struct ExpenseTracker {
    ledger: Ledger,
    budgets: Budgets,
}

impl ExpenseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn budgets(&self) -> &Budgets {
        &self.budgets
    }

    // ========================
    // Expense operations
    // ========================

    /// Record an expense stamped with the current time.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        amount_cents: Cents,
        category: impl Into<String>,
    ) -> &Expense {
        self.add_at(description, amount_cents, category, Local::now())
    }

    /// Record an expense with an explicit timestamp.
    pub fn add_at(
        &mut self,
        description: impl Into<String>,
        amount_cents: Cents,
        category: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> &Expense {
        let expense = Expense::new(description, amount_cents, category, timestamp);
        let index = self.ledger.push(expense);
        debug!(index, amount = amount_cents, "added expense");
        &self.ledger.expenses()[index]
    }

    /// Replace the provided fields of the expense at `index`.
    pub fn update(&mut self, index: usize, update: &ExpenseUpdate) -> Result<&Expense, AppError> {
        let len = self.ledger.len();
        let Some(expense) = self.ledger.get_mut(index) else {
            warn!(index, len, "update of missing expense");
            return Err(AppError::ExpenseNotFound { index, len });
        };

        let changed = expense.apply(update);
        debug!(index, changed, "updated expense");
        Ok(&*expense)
    }

    /// Remove the expense at `index`. Later entries move down one position.
    pub fn delete(&mut self, index: usize) -> Result<Expense, AppError> {
        let len = self.ledger.len();
        match self.ledger.remove(index) {
            Some(removed) => {
                debug!(index, remaining = len - 1, "deleted expense");
                Ok(removed)
            }
            None => {
                warn!(index, len, "delete of missing expense");
                Err(AppError::ExpenseNotFound { index, len })
            }
        }
    }

    /// All expenses with their current index, in insertion order.
    pub fn list(&self) -> impl Iterator<Item = (usize, &Expense)> {
        self.ledger.iter()
    }

    // ========================
    // Summaries
    // ========================

    pub fn total_summary(&self) -> Cents {
        total_amount(self.ledger.expenses())
    }

    /// Total for calendar `month`, across all years.
    pub fn monthly_summary(&self, month: i32) -> Cents {
        monthly_total(self.ledger.expenses(), month)
    }

    // ========================
    // Budget operations
    // ========================

    pub fn set_budget(&mut self, month: i32, amount_cents: Cents) {
        let previous = self.budgets.set(month, amount_cents);
        debug!(month, amount = amount_cents, ?previous, "set budget");
    }

    /// Compare the month's spending against its budget. A month with no
    /// budget is always within budget.
    pub fn check_budget(&self, month: i32) -> BudgetCheck {
        let spent = self.monthly_summary(month);
        let budget = self.budgets.get(month);

        let status = match overrun(spent, budget) {
            Some(overrun) => {
                warn!(
                    month,
                    overrun = %format_cents(overrun),
                    "monthly budget exceeded"
                );
                BudgetStatus::Exceeded { overrun }
            }
            None => BudgetStatus::WithinBudget,
        };

        BudgetCheck {
            month,
            spent,
            budget,
            status,
        }
    }

    // ========================
    // Export
    // ========================

    /// Write every expense to `path` as CSV, replacing any existing file.
    /// Returns the number of data rows written.
    pub fn export_to_file(&self, path: impl AsRef<Path>) -> Result<usize, AppError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        let count = Exporter::new(&self.ledger).export_expenses_csv(BufWriter::new(file))?;
        info!(path = %path.display(), count, "exported expenses");
        Ok(count)
    }
}
