use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;
use crate::error::PersistenceError;
use crate::expense_store::{ExpenseRecord, ExpenseStore};
use crate::validation::{self, DATE_FORMAT};

const HEADER: [&str; 5] = ["date", "category", "amount", "description", "monthly_budget_at_save"];

#[derive(Debug, Serialize)]
struct ExpenseRow<'a> {
    date: String,
    category: &'static str,
    amount: f64,
    description: &'a str,
    monthly_budget_at_save: f64,
}

#[derive(Debug, Deserialize)]
struct ExpenseRowRaw {
    date: String,
    category: String,
    amount: f64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    monthly_budget_at_save: Option<f64>,
}

impl ExpenseRowRaw {
    fn into_record(self) -> Result<(ExpenseRecord, Option<f64>), String> {
        let date = validation::parse_date(&self.date).map_err(|e| e.to_string())?;
        let category = validation::normalize_category(&self.category).map_err(|e| e.to_string())?;
        let amount = validation::check_amount(self.amount).map_err(|e| e.to_string())?;
        let budget = self
            .monthly_budget_at_save
            .map(validation::check_amount)
            .transpose()
            .map_err(|e| format!("monthly budget: {}", e))?;
        let record = ExpenseRecord {
            date,
            category,
            amount,
            description: self.description.unwrap_or_default(),
        };
        Ok((record, budget))
    }
}

/// A data row that could not be loaded. `row` counts data rows from 1, header excluded.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct LoadedExpenses {
    pub records: Vec<ExpenseRecord>,
    /// Budget from the last row carrying one, 0.0 if none did.
    pub budget: f64,
    pub skipped: Vec<SkippedRow>,
}

#[derive(Debug)]
pub enum LoadOutcome {
    NotFound,
    Loaded(LoadedExpenses),
}

/// Writes the header and one row per record, repeating the budget on every row.
pub fn save_expenses(path: &Path, store: &ExpenseStore, budget: f64) -> Result<(), PersistenceError> {
    let file = File::create(path).map_err(|source| PersistenceError::Io { path: path.to_path_buf(), source })?;
    let csv_error = |source| PersistenceError::Csv { path: path.to_path_buf(), source };

    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(HEADER).map_err(csv_error)?;
    for record in store.all() {
        writer
            .serialize(ExpenseRow {
                date: record.date.format(DATE_FORMAT).to_string(),
                category: record.category.as_str(),
                amount: record.amount,
                description: &record.description,
                monthly_budget_at_save: budget,
            })
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|source| PersistenceError::Io { path: path.to_path_buf(), source })?;

    info!("Saved {} expenses with budget {:.2} to {}", store.len(), budget, path.display());
    Ok(())
}

/// Loads expenses from a CSV file. Rows that fail to parse are skipped with a
/// warning; only file-level failures abort the load.
pub fn load_expenses(path: &Path) -> Result<LoadOutcome, PersistenceError> {
    if !path.exists() {
        info!("{} not found, starting with no expenses", path.display());
        return Ok(LoadOutcome::NotFound);
    }

    let file = File::open(path).map_err(|source| PersistenceError::Io { path: path.to_path_buf(), source })?;
    let csv_error = |source| PersistenceError::Csv { path: path.to_path_buf(), source };

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);
    let has_header = !reader.headers().map_err(csv_error)?.iter().all(str::is_empty);
    if !has_header {
        return Err(PersistenceError::MissingHeader { path: path.to_path_buf() });
    }

    let mut loaded = LoadedExpenses::default();
    for (i, result) in reader.deserialize::<ExpenseRowRaw>().enumerate() {
        let row = i + 1;
        let parsed = match result {
            Ok(raw) => raw.into_record(),
            Err(e) if e.is_io_error() => return Err(csv_error(e)),
            Err(e) => Err(e.to_string()),
        };
        match parsed {
            Ok((record, budget)) => {
                if let Some(budget) = budget {
                    loaded.budget = budget;
                }
                loaded.records.push(record);
            }
            Err(reason) => {
                warn!("Failed to parse row {} of {}: {}. Skipping corrupted row.", row, path.display(), reason);
                loaded.skipped.push(SkippedRow { row, reason });
            }
        }
    }

    info!("Loaded {} expenses and budget {:.2} from {}", loaded.records.len(), loaded.budget, path.display());
    Ok(LoadOutcome::Loaded(loaded))
}
