use std::io::Write;

use crate::application::AppError;
use crate::domain::{Ledger, format_cents};

/// Column names of the expense export, in order
pub const EXPORT_HEADER: [&str; 4] = ["Description", "Amount", "Category", "Date"];

/// Exporter for writing the ledger out as CSV
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    /// Write the header row and one row per expense in ledger order.
    /// Returns the number of expense rows written.
    pub fn export_expenses_csv<W: Write>(&self, writer: W) -> Result<usize, AppError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(EXPORT_HEADER)?;

        let mut count = 0;
        for (_, expense) in self.ledger.iter() {
            let amount = format_cents(expense.amount_cents);
            let date = expense.timestamp.to_rfc3339();
            csv_writer.write_record([
                expense.description.as_str(),
                amount.as_str(),
                expense.category.as_str(),
                date.as_str(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}
