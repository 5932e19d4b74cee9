use log::warn;
use crate::expense_store::ExpenseRecord;

/// Where the spending total stands against the budget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStanding {
    Over { by: f64 },
    /// Also used when the total is exactly on budget, with nothing left.
    Remaining { left: f64 },
}

/// Sums the amounts of all records. Amounts that are not finite numbers are
/// skipped with a warning instead of poisoning the whole total.
pub fn total_of<'a>(records: impl IntoIterator<Item = &'a ExpenseRecord>) -> f64 {
    let mut total = 0.0;
    for (i, record) in records.into_iter().enumerate() {
        if record.amount.is_finite() {
            total += record.amount;
        } else {
            warn!("Expense {} has an invalid amount and is skipped in the total: {}", i + 1, record);
        }
    }
    total
}

pub fn compare(total: f64, budget: f64) -> BudgetStanding {
    if total > budget {
        BudgetStanding::Over { by: total - budget }
    } else {
        BudgetStanding::Remaining { left: budget - total }
    }
}
