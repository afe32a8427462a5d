use thiserror::Error;

use crate::domain::ExpenseId;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),

    #[error("Invalid date format: {0} (expected YYYY-MM-DD)")]
    InvalidDateFormat(String),

    #[error("Budget not set")]
    BudgetNotSet,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
