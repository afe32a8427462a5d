use std::path::Path;

use chrono::{Local, NaiveDate};

use crate::domain::{
    compare_budget, next_id, renumber, summarize, total_cents, BudgetStatus, Cents, Expense,
    ExpenseId, Summary,
};
use crate::storage::Store;

use super::AppError;

/// Field changes to apply to an existing expense.
/// `None` leaves the field as it is; id and category are not updatable.
#[derive(Debug, Clone, Default)]
pub struct ExpenseUpdate {
    pub description: Option<String>,
    pub amount_cents: Option<Cents>,
    pub date: Option<NaiveDate>,
}

impl ExpenseUpdate {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.amount_cents.is_none() && self.date.is_none()
    }
}

/// The expense ledger: the in-memory list of expenses plus the store that
/// persists it. This is the primary interface for any client (CLI, tests).
///
/// Every mutating operation rewrites the whole ledger file before the
/// in-memory state is replaced, so a failed write leaves both untouched.
#[derive(Debug)]
pub struct Ledger {
    store: Store,
    expenses: Vec<Expense>,
}

impl Ledger {
    /// Load the ledger from the given store.
    /// A missing ledger file is an empty ledger, not an error.
    pub fn open(store: Store) -> Result<Self, AppError> {
        let expenses = store.load_expenses()?;
        Ok(Self { store, expenses })
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// Persist `next` and make it the current state. On write failure the
    /// previous state stays in place, in memory and on disk.
    fn commit(&mut self, next: Vec<Expense>) -> Result<(), AppError> {
        self.store.save_expenses(&next)?;
        self.expenses = next;
        Ok(())
    }

    /// Record a new expense. The date defaults to today when omitted.
    /// Negative amounts are rejected before anything is changed.
    pub fn add(
        &mut self,
        description: impl Into<String>,
        amount_cents: Cents,
        category: impl Into<String>,
        date: Option<NaiveDate>,
    ) -> Result<Expense, AppError> {
        if amount_cents < 0 {
            return Err(AppError::InvalidAmount(
                "Amount cannot be negative.".to_string(),
            ));
        }

        let expense = Expense::new(
            next_id(&self.expenses),
            description,
            amount_cents,
            category,
            date.unwrap_or_else(today),
        );

        let mut next = self.expenses.clone();
        next.push(expense.clone());
        self.commit(next)?;
        Ok(expense)
    }

    /// Iterate expenses in stored order, optionally restricted to an exact
    /// category match. An empty result is a normal outcome.
    pub fn view<'a>(&'a self, category: Option<&'a str>) -> impl Iterator<Item = &'a Expense> + 'a {
        self.expenses
            .iter()
            .filter(move |expense| category.is_none_or(|cat| expense.category == cat))
    }

    /// Delete the expense with the given id and renumber the remainder so
    /// ids stay dense. Returns the removed expense with its original id.
    pub fn delete(&mut self, id: ExpenseId) -> Result<Expense, AppError> {
        let position = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(AppError::NotFound(id))?;

        let mut next = self.expenses.clone();
        let removed = next.remove(position);
        let next = renumber(next);
        self.commit(next)?;
        Ok(removed)
    }

    /// Apply field changes to the expense with the given id.
    /// Returns the updated expense.
    pub fn update(&mut self, id: ExpenseId, update: ExpenseUpdate) -> Result<Expense, AppError> {
        if let Some(amount) = update.amount_cents {
            if amount < 0 {
                return Err(AppError::InvalidAmount(
                    "Amount cannot be negative.".to_string(),
                ));
            }
        }

        let position = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(AppError::NotFound(id))?;

        let mut next = self.expenses.clone();
        let expense = &mut next[position];
        if let Some(description) = update.description {
            expense.description = description;
        }
        if let Some(amount) = update.amount_cents {
            expense.amount_cents = amount;
        }
        if let Some(date) = update.date {
            expense.date = date;
        }
        let updated = expense.clone();

        self.commit(next)?;
        Ok(updated)
    }

    /// Count and total of expenses matching an optional year/month period
    /// and an optional category.
    pub fn summary(&self, period: Option<(i32, u32)>, category: Option<&str>) -> Summary {
        summarize(&self.expenses, period, category)
    }

    pub fn set_budget(&self, budget_cents: Cents) -> Result<(), AppError> {
        self.store.save_budget(budget_cents)
    }

    pub fn budget(&self) -> Result<Option<Cents>, AppError> {
        self.store.load_budget()
    }

    /// Compare total spending against the configured budget.
    pub fn check_budget(&self) -> Result<BudgetStatus, AppError> {
        let budget_cents = self.store.load_budget()?.ok_or(AppError::BudgetNotSet)?;
        Ok(compare_budget(budget_cents, total_cents(&self.expenses)))
    }

    /// Write the ledger to `path` in the primary storage format.
    /// The primary ledger file is not touched and the exported file is
    /// never read back.
    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), AppError> {
        self.store.export_expenses(path, &self.expenses)
    }

    /// Remove all expenses and persist the empty ledger.
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.commit(Vec::new())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
