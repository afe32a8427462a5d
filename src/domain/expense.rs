use chrono::NaiveDate;

use super::Cents;

/// Expense ids are positional: after any mutation they run 1..=len in
/// list order, so deleting an entry renumbers everything after it.
pub type ExpenseId = u32;

/// Date format used on disk and in all user-facing output.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount_cents: Cents,
    pub category: String,
    pub date: NaiveDate,
}

impl Expense {
    pub fn new(
        id: ExpenseId,
        description: impl Into<String>,
        amount_cents: Cents,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount_cents,
            category: category.into(),
            date,
        }
    }
}
