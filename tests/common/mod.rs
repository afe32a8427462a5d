// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use outlay::application::Ledger;
use outlay::storage::Store;
use tempfile::TempDir;

/// Helper to create a ledger backed by files in a fresh temp directory
pub fn test_ledger() -> Result<(Ledger, TempDir)> {
    let temp_dir = TempDir::new()?;
    let ledger = open_in(&temp_dir)?;
    Ok((ledger, temp_dir))
}

/// Open a ledger over the standard file names inside `dir`.
/// Opening the same directory again sees whatever was persisted before.
pub fn open_in(dir: &TempDir) -> Result<Ledger> {
    let store = Store::new(
        dir.path().join("expenses.csv"),
        dir.path().join("budget.json"),
    );
    Ok(Ledger::open(store)?)
}

/// Helper to parse a date string
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}
