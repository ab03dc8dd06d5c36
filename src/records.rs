// Transaction Records - CSV input model
// One read of the transaction source at startup; records are immutable after load

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single dated transaction as it appears in the source CSV.
///
/// The source file carries a header row with exactly these column names.
/// Amounts are signed: refunds and adjustments come in negative.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Transaction {
    /// Slash-delimited calendar date, `DD/MM/YYYY`
    #[serde(rename = "Date")]
    pub date: String,

    /// Free-text label for the transaction
    #[serde(rename = "Subject")]
    pub subject: String,

    /// Signed decimal amount
    #[serde(rename = "Amount")]
    pub amount: f64,
}

impl Transaction {
    /// Split the date field into validated `(day, month, year)` components.
    ///
    /// Returns `None` for anything that does not parse as a real calendar
    /// date. Callers treat that as "filter this record out", never as an
    /// error: the aggregation policy is to skip what it cannot place.
    pub fn date_parts(&self) -> Option<(u32, u32, i32)> {
        let mut parts = self.date.split('/');
        let day: u32 = parts.next()?.trim().parse().ok()?;
        let month: u32 = parts.next()?.trim().parse().ok()?;
        let year: i32 = parts.next()?.trim().parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day)?;
        Some((day, month, year))
    }
}

/// Load all transactions from a CSV file.
///
/// A missing or unreadable file is fatal here; the caller decides whether to
/// abort or regenerate the source. Individual rows that fail to deserialize
/// are also errors - the source is expected to be well-formed tabular data.
pub fn load_csv(csv_path: &Path) -> Result<Vec<Transaction>> {
    let mut rdr = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open transaction CSV {:?}", csv_path))?;

    let mut transactions = Vec::new();

    for result in rdr.deserialize() {
        let transaction: Transaction = result.context("Failed to deserialize transaction row")?;
        transactions.push(transaction);
    }

    Ok(transactions)
}
