use std::collections::BTreeMap;

use super::Cents;

/// Monthly budget limits keyed by calendar month.
///
/// Months are not range-checked; a missing key means no budget is set.
#[derive(Debug, Clone, Default)]
pub struct Budgets {
    limits: BTreeMap<i32, Cents>,
}

impl Budgets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or overwrite the limit for `month`. Returns the previous limit.
    pub fn set(&mut self, month: i32, amount_cents: Cents) -> Option<Cents> {
        self.limits.insert(month, amount_cents)
    }

    pub fn get(&self, month: i32) -> Option<Cents> {
        self.limits.get(&month).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, Cents)> + '_ {
        self.limits.iter().map(|(m, a)| (*m, *a))
    }
}

/// Amount by which `spent` exceeds `limit`, if it does.
pub fn overrun(spent: Cents, limit: Option<Cents>) -> Option<Cents> {
    match limit {
        Some(limit) if spent > limit => Some(spent - limit),
        _ => None,
    }
}
