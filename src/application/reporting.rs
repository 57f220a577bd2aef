use crate::domain::Cents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    WithinBudget,
    Exceeded { overrun: Cents },
}

/// Result of comparing one month's spending with its budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetCheck {
    pub month: i32,
    pub spent: Cents,
    /// `None` when no budget was set for the month
    pub budget: Option<Cents>,
    pub status: BudgetStatus,
}

impl BudgetCheck {
    pub fn is_exceeded(&self) -> bool {
        matches!(self.status, BudgetStatus::Exceeded { .. })
    }

    pub fn overrun(&self) -> Option<Cents> {
        match self.status {
            BudgetStatus::Exceeded { overrun } => Some(overrun),
            BudgetStatus::WithinBudget => None,
        }
    }
}
