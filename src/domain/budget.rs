use super::Cents;

/// Spending compared against a configured budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetStatus {
    pub budget_cents: Cents,
    pub spent_cents: Cents,
    /// Signed difference: positive when spending exceeds the budget.
    pub delta_cents: Cents,
    pub over_budget: bool,
}

/// Compare total spending against a budget.
/// Spending exactly equal to the budget is not over budget.
pub fn compare_budget(budget_cents: Cents, spent_cents: Cents) -> BudgetStatus {
    BudgetStatus {
        budget_cents,
        spent_cents,
        delta_cents: spent_cents - budget_cents,
        over_budget: spent_cents > budget_cents,
    }
}
