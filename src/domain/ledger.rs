use super::{Cents, Expense};

/// Ordered, in-memory sequence of expenses. Position is identity.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Append an expense and return its index.
    pub fn push(&mut self, expense: Expense) -> usize {
        self.expenses.push(expense);
        self.expenses.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Expense> {
        self.expenses.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Expense> {
        self.expenses.get_mut(index)
    }

    /// Remove the expense at `index`, shifting every later entry down by one.
    pub fn remove(&mut self, index: usize) -> Option<Expense> {
        if index < self.expenses.len() {
            Some(self.expenses.remove(index))
        } else {
            None
        }
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Expenses paired with their current position.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Expense)> {
        self.expenses.iter().enumerate()
    }
}

/// Sum of every amount. Zero for an empty slice.
pub fn total_amount(expenses: &[Expense]) -> Cents {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Sum of amounts whose timestamp falls in calendar `month`, in any year.
/// Months outside 1-12 simply match nothing.
pub fn monthly_total(expenses: &[Expense], month: i32) -> Cents {
    expenses
        .iter()
        .filter(|e| e.month() == month)
        .map(|e| e.amount_cents)
        .sum()
}
