use chrono::{DateTime, Datelike, Local};

use super::{Cents, format_cents};

/// A single recorded expense.
///
/// Expenses carry no identifier of their own: they are addressed by their
/// position in the ledger, which changes when an earlier entry is deleted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub description: String,
    /// Amount in cents. The sign is not checked.
    pub amount_cents: Cents,
    pub category: String,
    /// Wall-clock time the expense was recorded
    pub timestamp: DateTime<Local>,
}

impl Expense {
    pub fn new(
        description: impl Into<String>,
        amount_cents: Cents,
        category: impl Into<String>,
        timestamp: DateTime<Local>,
    ) -> Self {
        Self {
            description: description.into(),
            amount_cents,
            category: category.into(),
            timestamp,
        }
    }

    /// Calendar month (1-12) of the timestamp, year ignored.
    pub fn month(&self) -> i32 {
        self.timestamp.month() as i32
    }

    /// Apply a partial edit. Returns true if any field changed.
    pub fn apply(&mut self, update: &ExpenseUpdate) -> bool {
        let mut changed = false;

        if let Some(description) = update.description.as_deref().filter(|d| !d.is_empty()) {
            self.description = description.to_string();
            changed = true;
        }
        // A zero amount counts as "not provided", same as blank text.
        if let Some(amount) = update.amount_cents.filter(|a| *a != 0) {
            self.amount_cents = amount;
            changed = true;
        }
        if let Some(category) = update.category.as_deref().filter(|c| !c.is_empty()) {
            self.category = category.to_string();
            changed = true;
        }

        changed
    }
}

impl std::fmt::Display for Expense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} | {} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.description,
            format_cents(self.amount_cents),
            self.category
        )
    }
}

/// Fields to replace on an existing expense. `None`, empty text and a zero
/// amount all leave the current value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount_cents: Option<Cents>,
    pub category: Option<String>,
}

impl ExpenseUpdate {
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_amount(mut self, amount_cents: Cents) -> Self {
        self.amount_cents = Some(amount_cents);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
