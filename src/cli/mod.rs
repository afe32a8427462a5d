use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::application::{AppError, ExpenseUpdate, Ledger};
use crate::domain::{format_amount, parse_amount, Expense, ExpenseId, DATE_FORMAT};
use crate::storage::Store;

/// Outlay - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "outlay")]
#[command(about = "Track personal expenses from the command line")]
#[command(version)]
pub struct Cli {
    /// Ledger file path
    #[arg(short, long, default_value = "expenses.csv")]
    pub file: PathBuf,

    /// Budget file path
    #[arg(long, default_value = "budget.json")]
    pub budget_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new expense
    #[command(allow_negative_numbers = true)]
    Add {
        /// What the money was spent on
        description: String,

        /// Amount spent (e.g., "12.50" or "12")
        amount: String,

        /// Category label (e.g., "Food", "Transport")
        category: String,

        /// Date of the expense (YYYY-MM-DD, defaults to today)
        #[arg(value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// List expenses
    View {
        /// Only show expenses in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Delete an expense by id
    Delete {
        /// Expense id
        id: ExpenseId,
    },

    /// Change fields of an existing expense
    #[command(allow_negative_numbers = true)]
    Update {
        /// Expense id
        id: ExpenseId,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New amount (e.g., "12.50" or "12")
        #[arg(short, long)]
        amount: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        date: Option<NaiveDate>,
    },

    /// Show the number of expenses and the total amount spent
    Summary {
        /// Restrict to a year (requires --month)
        #[arg(long, requires = "month")]
        year: Option<i32>,

        /// Restrict to a month, 1-12 (requires --year)
        #[arg(long, requires = "year", value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Only count expenses in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Write all expenses to another file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Set the spending budget
    #[command(name = "set_budget", allow_negative_numbers = true)]
    SetBudget {
        /// Budget amount (e.g., "100.00" or "100")
        amount: String,
    },

    /// Compare total spending against the budget
    #[command(name = "check_budget")]
    CheckBudget,

    /// Delete all expenses
    Clear,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let store = Store::new(&self.file, &self.budget_file);
        let mut ledger = Ledger::open(store)?;

        match self.command {
            Commands::Add {
                description,
                amount,
                category,
                date,
            } => {
                let amount_cents = parse_amount(&amount)
                    .with_context(|| format!("Invalid amount '{}'. Use '12.50' or '12'", amount))?;

                match ledger.add(description, amount_cents, category, date) {
                    Ok(expense) => println!(
                        "Added expense: {}, Amount: {}, Category: {}, Date: {}",
                        expense.description,
                        format_amount(expense.amount_cents),
                        expense.category,
                        expense.date.format(DATE_FORMAT),
                    ),
                    Err(AppError::InvalidAmount(reason)) => println!("Error: {}", reason),
                    Err(err) => return Err(err.into()),
                }
            }

            Commands::View { category } => {
                if ledger.expenses().is_empty() {
                    println!("No expenses recorded.");
                } else {
                    let expenses: Vec<&Expense> = ledger.view(category.as_deref()).collect();
                    match (category.as_deref(), expenses.is_empty()) {
                        (Some(cat), true) => {
                            println!("No expenses found for category '{}'.", cat);
                        }
                        (Some(cat), false) => {
                            println!("Expenses for category '{}':", cat);
                            print_expense_table(&expenses);
                        }
                        (None, _) => print_expense_table(&expenses),
                    }
                }
            }

            Commands::Delete { id } => match ledger.delete(id) {
                Ok(expense) => println!("Deleted expense with id: {}", expense.id),
                Err(AppError::NotFound(id)) => println!("Expense with id '{}' not found.", id),
                Err(err) => return Err(err.into()),
            },

            Commands::Update {
                id,
                description,
                amount,
                date,
            } => {
                let amount_cents = amount
                    .as_deref()
                    .map(parse_amount)
                    .transpose()
                    .context("Invalid amount format. Use '12.50' or '12'")?;

                let update = ExpenseUpdate {
                    description,
                    amount_cents,
                    date,
                };
                if update.is_empty() {
                    anyhow::bail!("Nothing to update: pass --description, --amount, or --date");
                }

                match ledger.update(id, update) {
                    Ok(expense) => println!("Updated expense with ID {}", expense.id),
                    Err(AppError::NotFound(id)) => println!("Expense with ID '{}' not found.", id),
                    Err(AppError::InvalidAmount(reason)) => println!("Error: {}", reason),
                    Err(err) => return Err(err.into()),
                }
            }

            Commands::Summary {
                year,
                month,
                category,
            } => {
                let period = year.zip(month);
                let summary = ledger.summary(period, category.as_deref());

                let label = match period {
                    Some((year, month)) => format!("for {}-{:02}", year, month),
                    None => "for all time".to_string(),
                };
                println!("Summary {}:", label);
                if let Some(cat) = &category {
                    println!("Category: {}", cat);
                }
                println!("Total expenses: {}", summary.count);
                println!("Total amount spent: {}", format_amount(summary.total_cents));
            }

            Commands::Export { path } => {
                ledger.export_to(&path)?;
                println!("Expenses exported to {}", path.display());
            }

            Commands::SetBudget { amount } => {
                let budget_cents = parse_amount(&amount)
                    .with_context(|| format!("Invalid amount '{}'. Use '100.00' or '100'", amount))?;
                ledger.set_budget(budget_cents)?;
                println!("Budget set to: {}", format_amount(budget_cents));
            }

            Commands::CheckBudget => match ledger.check_budget() {
                Ok(status) => {
                    println!("Budget: {}", format_amount(status.budget_cents));
                    if status.over_budget {
                        println!(
                            "Total expenses: {}, over budget by {}",
                            format_amount(status.spent_cents),
                            format_amount(status.delta_cents)
                        );
                    } else {
                        println!(
                            "Total expenses: {}, under budget by {}",
                            format_amount(status.spent_cents),
                            format_amount(-status.delta_cents)
                        );
                    }
                }
                Err(AppError::BudgetNotSet) => println!("Budget not set."),
                Err(err) => return Err(err.into()),
            },

            Commands::Clear => {
                ledger.clear()?;
                println!("List of expenses cleared.");
            }
        }

        Ok(())
    }
}

fn print_expense_table(expenses: &[&Expense]) {
    println!(
        "{:<5} {:<30} {:>10} {:<15} {:<10}",
        "ID", "DESCRIPTION", "AMOUNT", "CATEGORY", "DATE"
    );
    println!("{}", "-".repeat(74));
    for expense in expenses {
        println!(
            "{:<5} {:<30} {:>10} {:<15} {:<10}",
            expense.id,
            truncate(&expense.description, 30),
            format_amount(expense.amount_cents),
            truncate(&expense.category, 15),
            expense.date.format(DATE_FORMAT).to_string(),
        );
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

fn parse_date_arg(input: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| format!("date must be in YYYY-MM-DD format, got '{}'", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text() {
        assert_eq!(truncate("Coffee", 30), "Coffee");
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "a very long description that will not fit";
        let truncated = truncate(text, 10);
        assert_eq!(truncated.chars().count(), 10);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn test_truncate_is_char_safe() {
        // Multi-byte characters must not be split mid-codepoint
        let text = "café au lait était délicieux";
        let truncated = truncate(text, 10);
        assert_eq!(truncated, "café au...");
    }

    #[test]
    fn test_parse_date_arg() {
        assert_eq!(
            parse_date_arg("2024-03-01"),
            Ok(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap())
        );
        assert!(parse_date_arg("01-03-2024").is_err());
        assert!(parse_date_arg("2024-13-01").is_err());
        assert!(parse_date_arg("tomorrow").is_err());
    }
}
