// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate};
use expense_ledger::ExpenseTracker;
use expense_ledger::cli::Session;

/// Helper to build a local timestamp at noon on the given date
pub fn local_date(date_str: &str) -> DateTime<Local> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

/// Test fixture: a tracker with a few expenses spread over two months
pub struct StandardExpenses;

impl StandardExpenses {
    /// Groceries and rent in March, a concert in April (all 2024)
    pub fn tracker() -> ExpenseTracker {
        let mut tracker = ExpenseTracker::new();
        tracker.add_at("Groceries", 4550, "food", local_date("2024-03-02"));
        tracker.add_at("Rent", 90000, "housing", local_date("2024-03-05"));
        tracker.add_at("Concert", 6000, "entertainment", local_date("2024-04-12"));
        tracker
    }
}

/// Drive the command loop with `script` as input and return everything it printed
pub fn run_script(tracker: &mut ExpenseTracker, script: &str) -> String {
    let mut session = Session::new(script.as_bytes(), Vec::new());
    session.run(tracker).unwrap();
    String::from_utf8(session.into_writer()).unwrap()
}
