use chrono::Datelike;

use super::{Cents, Expense, ExpenseId};

/// Id for the next expense appended to the list.
/// Ids are dense (1..=len), so the next one is always len + 1.
pub fn next_id(expenses: &[Expense]) -> ExpenseId {
    expenses.len() as ExpenseId + 1
}

/// Reassign ids so they run 1..=len in list order.
/// Called after a delete to close the gap the removed entry left.
pub fn renumber(mut expenses: Vec<Expense>) -> Vec<Expense> {
    for (index, expense) in expenses.iter_mut().enumerate() {
        expense.id = index as ExpenseId + 1;
    }
    expenses
}

/// Sum of all expense amounts.
pub fn total_cents(expenses: &[Expense]) -> Cents {
    expenses.iter().map(|e| e.amount_cents).sum()
}

/// Aggregate over expenses matching an optional year/month period and an
/// optional exact category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total_cents: Cents,
}

pub fn summarize(
    expenses: &[Expense],
    period: Option<(i32, u32)>,
    category: Option<&str>,
) -> Summary {
    let mut count = 0;
    let mut total = 0;

    for expense in expenses {
        if let Some((year, month)) = period {
            if expense.date.year() != year || expense.date.month() != month {
                continue;
            }
        }
        if let Some(cat) = category {
            if expense.category != cat {
                continue;
            }
        }
        count += 1;
        total += expense.amount_cents;
    }

    Summary {
        count,
        total_cents: total,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn make_expense(id: ExpenseId, amount: Cents, category: &str, date: &str) -> Expense {
        Expense::new(
            id,
            format!("expense {}", id),
            amount,
            category,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        )
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(next_id(&[]), 1);
    }

    #[test]
    fn test_next_id_sequential() {
        let expenses = vec![
            make_expense(1, 100, "food", "2024-01-01"),
            make_expense(2, 200, "food", "2024-01-02"),
        ];
        assert_eq!(next_id(&expenses), 3);
    }

    #[test]
    fn test_renumber_closes_gaps() {
        // Ids 1, 3, 4 after removing id 2
        let expenses = vec![
            make_expense(1, 100, "food", "2024-01-01"),
            make_expense(3, 300, "food", "2024-01-03"),
            make_expense(4, 400, "food", "2024-01-04"),
        ];
        let renumbered = renumber(expenses);

        let ids: Vec<ExpenseId> = renumbered.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // Order is preserved, only ids change
        assert_eq!(renumbered[1].amount_cents, 300);
        assert_eq!(renumbered[2].amount_cents, 400);
    }

    #[test]
    fn test_total_cents() {
        let expenses = vec![
            make_expense(1, 350, "food", "2024-01-01"),
            make_expense(2, 200, "transport", "2024-01-02"),
            make_expense(3, 1050, "food", "2024-02-01"),
        ];
        assert_eq!(total_cents(&expenses), 1600);
        assert_eq!(total_cents(&[]), 0);
    }

    #[test]
    fn test_summarize_all() {
        let expenses = vec![
            make_expense(1, 350, "food", "2024-01-01"),
            make_expense(2, 200, "transport", "2024-01-15"),
            make_expense(3, 1050, "food", "2024-02-01"),
        ];
        let summary = summarize(&expenses, None, None);
        assert_eq!(summary.count, 3);
        assert_eq!(summary.total_cents, 1600);
    }

    #[test]
    fn test_summarize_by_month() {
        let expenses = vec![
            make_expense(1, 350, "food", "2024-01-01"),
            make_expense(2, 200, "transport", "2024-01-15"),
            make_expense(3, 1050, "food", "2024-02-01"),
        ];
        let summary = summarize(&expenses, Some((2024, 1)), None);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_cents, 550);

        // Same month in a different year does not match
        let summary = summarize(&expenses, Some((2023, 1)), None);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_cents, 0);
    }

    #[test]
    fn test_summarize_by_category() {
        let expenses = vec![
            make_expense(1, 350, "food", "2024-01-01"),
            make_expense(2, 200, "transport", "2024-01-15"),
            make_expense(3, 1050, "food", "2024-02-01"),
        ];
        let summary = summarize(&expenses, None, Some("food"));
        assert_eq!(summary.count, 2);
        assert_eq!(summary.total_cents, 1400);

        // Category match is exact, not case-insensitive
        let summary = summarize(&expenses, None, Some("Food"));
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_summarize_by_month_and_category() {
        let expenses = vec![
            make_expense(1, 350, "food", "2024-01-01"),
            make_expense(2, 200, "transport", "2024-01-15"),
            make_expense(3, 1050, "food", "2024-02-01"),
        ];
        let summary = summarize(&expenses, Some((2024, 1)), Some("food"));
        assert_eq!(summary.count, 1);
        assert_eq!(summary.total_cents, 350);
    }

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[], Some((2024, 1)), Some("food"));
        assert_eq!(summary.count, 0);
        assert_eq!(summary.total_cents, 0);
    }
}
