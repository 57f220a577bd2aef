mod common;

use anyhow::Result;
use common::{StandardExpenses, local_date};
use expense_ledger::ExpenseTracker;
use expense_ledger::application::BudgetStatus;

fn tracker_with_march_spending(amount: i64) -> ExpenseTracker {
    let mut tracker = ExpenseTracker::new();
    tracker.add_at("Spending", amount, "misc", local_date("2024-03-10"));
    tracker
}

#[test]
fn test_budget_exceeded_reports_overrun() -> Result<()> {
    let mut tracker = tracker_with_march_spending(15000);
    tracker.set_budget(3, 10000);

    let check = tracker.check_budget(3);

    assert_eq!(check.spent, 15000);
    assert_eq!(check.budget, Some(10000));
    assert_eq!(check.status, BudgetStatus::Exceeded { overrun: 5000 });
    assert!(check.is_exceeded());
    assert_eq!(check.overrun(), Some(5000));
    Ok(())
}

#[test]
fn test_budget_within_limit() -> Result<()> {
    let mut tracker = tracker_with_march_spending(8000);
    tracker.set_budget(3, 10000);

    let check = tracker.check_budget(3);

    assert_eq!(check.status, BudgetStatus::WithinBudget);
    assert_eq!(check.overrun(), None);
    Ok(())
}

#[test]
fn test_spending_equal_to_budget_is_within() -> Result<()> {
    let mut tracker = tracker_with_march_spending(10000);
    tracker.set_budget(3, 10000);

    assert!(!tracker.check_budget(3).is_exceeded());
    Ok(())
}

#[test]
fn test_no_budget_is_always_within() -> Result<()> {
    let tracker = tracker_with_march_spending(100000);

    let check = tracker.check_budget(3);

    assert_eq!(check.budget, None);
    assert_eq!(check.status, BudgetStatus::WithinBudget);
    Ok(())
}

#[test]
fn test_set_budget_overwrites_previous() -> Result<()> {
    let mut tracker = StandardExpenses::tracker();
    tracker.set_budget(4, 1000);
    assert!(tracker.check_budget(4).is_exceeded());

    tracker.set_budget(4, 10000);

    assert_eq!(tracker.budgets().get(4), Some(10000));
    assert!(!tracker.check_budget(4).is_exceeded());
    Ok(())
}

#[test]
fn test_budget_is_per_month() -> Result<()> {
    let mut tracker = StandardExpenses::tracker();
    tracker.set_budget(3, 50000);

    assert!(tracker.check_budget(3).is_exceeded());
    // April has spending but no budget of its own
    assert!(!tracker.check_budget(4).is_exceeded());
    Ok(())
}
