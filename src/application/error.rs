use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Expense not found at index {index} (ledger has {len} entries)")]
    ExpenseNotFound { index: usize, len: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
