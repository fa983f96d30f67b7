//! Spending summary over a set of expenses

use std::collections::HashMap;

use crate::models::{Amount, Expense};

/// Spending in one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
    pub count: usize,
}

/// Totals for a view of the collection
#[derive(Debug, Clone, PartialEq)]
pub struct SpendingSummary {
    pub total: Amount,
    pub count: usize,
    /// Largest category first
    pub by_category: Vec<CategoryTotal>,
    pub spending_limit: Amount,
    /// Percent of the limit used, capped at 100; 0 when no limit is set
    pub limit_progress: f64,
}

impl SpendingSummary {
    pub fn over_limit(&self) -> bool {
        self.spending_limit.is_positive() && self.total > self.spending_limit
    }
}

pub fn summarize(expenses: &[Expense], spending_limit: Amount) -> SpendingSummary {
    let mut groups: HashMap<&str, CategoryTotal> = HashMap::new();
    for expense in expenses {
        let entry = groups
            .entry(expense.category.as_str())
            .or_insert_with(|| CategoryTotal {
                category: expense.category.clone(),
                total: Amount::zero(),
                count: 0,
            });
        entry.total += expense.amount;
        entry.count += 1;
    }

    let mut by_category: Vec<_> = groups.into_values().collect();
    by_category.sort_by(|a, b| {
        b.total
            .value()
            .total_cmp(&a.total.value())
            .then_with(|| a.category.cmp(&b.category))
    });

    let total: Amount = expenses.iter().map(|e| e.amount).sum();
    let limit_progress = if spending_limit.is_positive() {
        (total.value() / spending_limit.value() * 100.0).min(100.0)
    } else {
        0.0
    };

    SpendingSummary {
        total,
        count: expenses.len(),
        by_category,
        spending_limit,
        limit_progress,
    }
}
