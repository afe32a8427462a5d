use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::AppError;
use crate::domain::{format_amount, parse_amount, Cents, Expense, ExpenseId, DATE_FORMAT};

/// Column order of the ledger file. The header row is written even for an
/// empty ledger so the file is always self-describing.
const LEDGER_HEADER: [&str; 5] = ["id", "description", "amount", "category", "date"];

/// On-disk form of an expense. Amount and date stay strings here so a
/// corrupt value maps to the right error instead of a generic parse failure.
#[derive(Debug, Serialize, Deserialize)]
struct ExpenseRow {
    id: ExpenseId,
    description: String,
    amount: String,
    category: String,
    date: String,
}

impl ExpenseRow {
    fn from_expense(expense: &Expense) -> Self {
        Self {
            id: expense.id,
            description: expense.description.clone(),
            amount: format_amount(expense.amount_cents),
            category: expense.category.clone(),
            date: expense.date.format(DATE_FORMAT).to_string(),
        }
    }

    fn into_expense(self) -> Result<Expense, AppError> {
        let amount_cents = parse_amount(&self.amount).map_err(|err| {
            AppError::Storage(anyhow::anyhow!(
                "invalid amount '{}' for expense {}: {}",
                self.amount,
                self.id,
                err
            ))
        })?;
        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT)
            .map_err(|_| AppError::InvalidDateFormat(self.date.clone()))?;

        Ok(Expense {
            id: self.id,
            description: self.description,
            amount_cents,
            category: self.category,
            date,
        })
    }
}

/// File-backed persistence for the ledger and the budget.
///
/// The ledger is a CSV file rewritten wholesale on every mutation; the
/// budget is a separate file holding one JSON number in decimal units.
/// Rewrites go through a temp file and an atomic rename, so a crash
/// mid-write never leaves a half-written file. Concurrent processes still
/// race (last writer wins); this tool assumes one invocation at a time.
#[derive(Debug)]
pub struct Store {
    ledger_path: PathBuf,
    budget_path: PathBuf,
}

impl Store {
    pub fn new(ledger_path: impl Into<PathBuf>, budget_path: impl Into<PathBuf>) -> Self {
        Self {
            ledger_path: ledger_path.into(),
            budget_path: budget_path.into(),
        }
    }

    /// Load all expenses. A missing ledger file is an empty ledger.
    pub fn load_expenses(&self) -> Result<Vec<Expense>, AppError> {
        if !self.ledger_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.ledger_path)
            .with_context(|| format!("Failed to open {}", self.ledger_path.display()))?;
        read_expenses(BufReader::new(file))
    }

    /// Rewrite the ledger file with the given expenses.
    pub fn save_expenses(&self, expenses: &[Expense]) -> Result<(), AppError> {
        write_file_atomic(&self.ledger_path, |writer| write_expenses(writer, expenses))
    }

    /// Write the given expenses to `path` in the primary storage format.
    pub fn export_expenses(
        &self,
        path: impl AsRef<Path>,
        expenses: &[Expense],
    ) -> Result<(), AppError> {
        write_file_atomic(path.as_ref(), |writer| write_expenses(writer, expenses))
    }

    /// Load the budget. A missing file, like a stored `null`, means unset.
    pub fn load_budget(&self) -> Result<Option<Cents>, AppError> {
        if !self.budget_path.exists() {
            return Ok(None);
        }

        let file = File::open(&self.budget_path)
            .with_context(|| format!("Failed to open {}", self.budget_path.display()))?;
        let amount: Option<f64> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse {}", self.budget_path.display()))?;
        Ok(amount.map(units_to_cents))
    }

    pub fn save_budget(&self, budget_cents: Cents) -> Result<(), AppError> {
        write_file_atomic(&self.budget_path, |writer| {
            serde_json::to_writer(writer, &cents_to_units(budget_cents))
                .context("Failed to write budget")?;
            Ok(())
        })
    }
}

fn read_expenses<R: Read>(reader: R) -> Result<Vec<Expense>, AppError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut expenses = Vec::new();
    for row in csv_reader.deserialize::<ExpenseRow>() {
        let row = row.context("Failed to parse ledger row")?;
        expenses.push(row.into_expense()?);
    }
    Ok(expenses)
}

fn write_expenses<W: Write>(writer: W, expenses: &[Expense]) -> Result<(), AppError> {
    // Header handling is manual so an empty ledger still gets one.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer
        .write_record(LEDGER_HEADER)
        .context("Failed to write ledger header")?;
    for expense in expenses {
        csv_writer
            .serialize(ExpenseRow::from_expense(expense))
            .context("Failed to write ledger row")?;
    }
    csv_writer.flush().context("Failed to flush ledger")?;
    Ok(())
}

/// The budget file stores decimal units, matching the amount strings in
/// the ledger file.
fn cents_to_units(cents: Cents) -> f64 {
    cents as f64 / 100.0
}

fn units_to_cents(units: f64) -> Cents {
    (units * 100.0).round() as Cents
}

/// Write a file via a temp file in the same directory plus an atomic
/// rename. Readers see either the old content or the new, never a torn
/// write. Parent directories are created on demand.
fn write_file_atomic<F>(path: &Path, write: F) -> Result<(), AppError>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<(), AppError>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let tmp_path = tmp_path_for(path);
    let result: Result<(), AppError> = (|| {
        let file = File::create(&tmp_path)
            .with_context(|| format!("Failed to create {}", tmp_path.display()))?;
        let mut writer = BufWriter::new(file);
        write(&mut writer)?;
        writer.flush().context("Failed to flush data")?;
        writer.get_ref().sync_all().context("Failed to sync data")?;
        fs::rename(&tmp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    result
}

/// Appends ".tmp" to the full file name, so "expenses.csv" becomes
/// "expenses.csv.tmp" rather than losing its extension.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}
