mod common;

use anyhow::Result;
use common::{StandardExpenses, local_date};
use expense_ledger::application::AppError;
use expense_ledger::io::EXPORT_HEADER;
use expense_ledger::{ExpenseTracker, format_cents};
use serde::Deserialize;
use tempfile::TempDir;

#[derive(Debug, Deserialize)]
struct ExportedRow {
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Date")]
    date: String,
}

fn read_rows(path: &std::path::Path) -> Result<(Vec<String>, Vec<ExportedRow>)> {
    let mut reader = csv::Reader::from_path(path)?;
    let header = reader.headers()?.iter().map(String::from).collect();
    let rows = reader.deserialize().collect::<Result<Vec<ExportedRow>, _>>()?;
    Ok((header, rows))
}

#[test]
fn test_export_writes_header_and_rows_in_order() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("expenses.csv");
    let tracker = StandardExpenses::tracker();

    let count = tracker.export_to_file(&path)?;
    assert_eq!(count, 3);

    let (header, rows) = read_rows(&path)?;
    assert_eq!(header, EXPORT_HEADER);
    assert_eq!(rows.len(), tracker.ledger().len());

    for (row, (_, expense)) in rows.iter().zip(tracker.list()) {
        assert_eq!(row.description, expense.description);
        assert_eq!(row.amount, format_cents(expense.amount_cents));
        assert_eq!(row.category, expense.category);
        assert_eq!(row.date, expense.timestamp.to_rfc3339());
    }
    Ok(())
}

#[test]
fn test_export_empty_ledger() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("empty.csv");

    let count = ExpenseTracker::new().export_to_file(&path)?;

    assert_eq!(count, 0);
    assert_eq!(
        std::fs::read_to_string(&path)?,
        "Description,Amount,Category,Date\n"
    );
    Ok(())
}

#[test]
fn test_export_overwrites_existing_file() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("expenses.csv");
    std::fs::write(&path, "stale content\nthat is much longer than the export\n".repeat(50))?;

    let mut tracker = ExpenseTracker::new();
    tracker.add_at("Taxi", 1800, "transport", local_date("2024-02-01"));
    tracker.export_to_file(&path)?;

    let (_, rows) = read_rows(&path)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Taxi");
    Ok(())
}

#[test]
fn test_export_quotes_delimiters() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("quoted.csv");

    let mut tracker = ExpenseTracker::new();
    tracker.add_at("Bread, milk, \"organic\" eggs", 1234, "food", local_date("2024-01-05"));
    tracker.export_to_file(&path)?;

    let (_, rows) = read_rows(&path)?;
    assert_eq!(rows[0].description, "Bread, milk, \"organic\" eggs");
    assert_eq!(rows[0].amount, "12.34");
    Ok(())
}

#[test]
fn test_export_to_missing_directory_fails() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("no-such-dir").join("expenses.csv");

    let err = StandardExpenses::tracker().export_to_file(&path).unwrap_err();

    assert!(matches!(err, AppError::Io(_)));
    assert!(!path.exists());
    Ok(())
}
