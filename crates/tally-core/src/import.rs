//! CSV and JSON input for batch classification and the ledger
//!
//! Category lists: `id,name,kind`
//! Transaction lists: `id,date,category_id,kind,amount` plus optional
//! `override_survival,override_choice,override_future,override_loss,override_reason`
//!
//! Columns are looked up by header name, so order does not matter. Rows with a
//! blank id are skipped; malformed values fail with the line number.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, TimeZone, Utc};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

use crate::classify::{CategoryInput, CategoryKind};
use crate::energy::EnergyDistribution;
use crate::error::{Error, Result};
use crate::ledger::LedgerTransaction;
use crate::models::{CategorySemantics, TransactionEnergyOverride};

const OVERRIDE_COLUMNS: [&str; 4] = [
    "override_survival",
    "override_choice",
    "override_future",
    "override_loss",
];

/// Header name to column index
struct Columns {
    headers: StringRecord,
}

impl Columns {
    fn new(headers: StringRecord) -> Self {
        Self { headers }
    }

    fn index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }

    fn require(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<&str> = names
            .iter()
            .copied()
            .filter(|n| self.index(n).is_none())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Import(format!(
                "Missing required columns: {}",
                missing.join(", ")
            )))
        }
    }

    /// Trimmed cell value, `None` when the column is absent or the cell empty
    fn get<'r>(&self, record: &'r StringRecord, name: &str) -> Option<&'r str> {
        self.index(name)
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parse a category list
pub fn parse_categories_csv<R: Read>(reader: R) -> Result<Vec<CategoryInput>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?.clone());
    columns.require(&["id", "name"])?;

    let mut categories = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);

        let Some(id) = columns.get(&record, "id") else {
            warn!("Skipping category on line {}: blank id", line);
            continue;
        };

        let name = columns
            .get(&record, "name")
            .unwrap_or_default()
            .to_string();

        let kind = match columns.get(&record, "kind") {
            Some(kind) => kind
                .parse::<CategoryKind>()
                .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?,
            None => CategoryKind::default(),
        };

        categories.push(CategoryInput {
            id: id.to_string(),
            name,
            kind,
        });
    }

    debug!("Parsed {} categories", categories.len());
    Ok(categories)
}

/// Parse a transaction list
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<LedgerTransaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?.clone());
    columns.require(&["id", "date", "kind", "amount"])?;

    let mut transactions = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let line = line_of(&record);

        let Some(id) = columns.get(&record, "id") else {
            warn!("Skipping transaction on line {}: blank id", line);
            continue;
        };

        let date_str = columns
            .get(&record, "date")
            .ok_or_else(|| Error::Import(format!("Line {}: missing date", line)))?;
        let date = parse_date(date_str).map_err(|e| at_line(line, e))?;

        let kind = columns
            .get(&record, "kind")
            .ok_or_else(|| Error::Import(format!("Line {}: missing kind", line)))?
            .parse::<CategoryKind>()
            .map_err(|e| Error::Import(format!("Line {}: {}", line, e)))?;

        let amount_str = columns
            .get(&record, "amount")
            .ok_or_else(|| Error::Import(format!("Line {}: missing amount", line)))?;
        let amount = parse_amount(amount_str).map_err(|e| at_line(line, e))?;

        let energy_override = parse_override(&columns, &record, date)
            .map_err(|e| at_line(line, e))?;

        transactions.push(LedgerTransaction {
            id: id.to_string(),
            date,
            category_id: columns.get(&record, "category_id").map(String::from),
            kind,
            amount,
            energy_override,
        });
    }

    debug!("Parsed {} transactions", transactions.len());
    Ok(transactions)
}

fn at_line(line: u64, err: Error) -> Error {
    match err {
        Error::Import(msg) => Error::Import(format!("Line {}: {}", line, msg)),
        other => Error::Import(format!("Line {}: {}", line, other)),
    }
}

/// Override columns, if any are filled in. Blank weights count as zero.
fn parse_override(
    columns: &Columns,
    record: &StringRecord,
    date: NaiveDate,
) -> Result<Option<TransactionEnergyOverride>> {
    let cells: Vec<Option<&str>> = OVERRIDE_COLUMNS
        .iter()
        .map(|name| columns.get(record, name))
        .collect();
    if cells.iter().all(Option::is_none) {
        return Ok(None);
    }

    let mut weights = [0.0_f64; 4];
    for (weight, cell) in weights.iter_mut().zip(&cells) {
        if let Some(value) = cell {
            *weight = value
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| Error::Import(format!("Unable to parse weight: {}", value)))?;
        }
    }
    let [survival, choice, future, loss] = weights;

    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::Import(format!("Invalid date: {}", date)))?;

    TransactionEnergyOverride::new(
        EnergyDistribution::new(survival, choice, future, loss),
        Utc.from_utc_datetime(&midnight),
        columns.get(record, "override_reason").map(String::from),
    )
    .map(Some)
}

/// Parse an ISO or day-first date
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2026-01-15
        "%d/%m/%Y", // 15/01/2026
        "%d-%m-%Y", // 15-01-2026
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount, accepting `R$`, parentheses for negatives, and a decimal
/// comma (`1.234,56`)
fn parse_amount(s: &str) -> Result<f64> {
    let mut cleaned: String = s
        .trim()
        .replace("R$", "")
        .replace(['$', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    if cleaned.contains(',') {
        cleaned = cleaned.replace('.', "").replace(',', ".");
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}

/// Read a semantics file (JSON object keyed by category id)
pub fn load_semantics(path: &Path) -> Result<HashMap<String, CategorySemantics>> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "Semantics file {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;
    let semantics: HashMap<String, CategorySemantics> = serde_json::from_str(&content)?;
    debug!("Loaded semantics for {} categories", semantics.len());
    Ok(semantics)
}

/// Write a semantics file with keys in sorted order
pub fn save_semantics(path: &Path, semantics: &HashMap<String, CategorySemantics>) -> Result<()> {
    let sorted: BTreeMap<&String, &CategorySemantics> = semantics.iter().collect();
    let json = serde_json::to_string_pretty(&sorted)?;
    fs::write(path, json)?;
    debug!("Saved semantics for {} categories", semantics.len());
    Ok(())
}
