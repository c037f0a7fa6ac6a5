//! CSV and JSON ledger reader
//!
//! CSV: two columns `address,amount`, optional header row, `#` comments and
//! blank lines ignored. JSON: an array of `{"address", "amount"}` objects
//! where `amount` is a string or an integer.

#![allow(clippy::result_large_err)]

use crate::errors::{io_error, ledger_row_error, unsupported_format, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// On-disk ledger encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerFormat {
    Csv,
    Json,
}

impl LedgerFormat {
    /// Infer the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("csv") => Ok(LedgerFormat::Csv),
            Some("json") => Ok(LedgerFormat::Json),
            _ => Err(unsupported_format(path)),
        }
    }
}

/// One unvalidated ledger row
///
/// `line` is the 1-based source line for CSV and the 1-based array position
/// for JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub line: usize,
    pub address: String,
    pub amount: String,
}

/// Read and split a ledger file
pub fn read_ledger(path: &Path) -> Result<Vec<LedgerRow>> {
    let format = LedgerFormat::from_path(path)?;
    let content = fs::read_to_string(path).map_err(|e| io_error("read_ledger", e))?;
    let rows = parse_ledger_str(&content, format)?;
    tracing::debug!(path = %path.display(), rows = rows.len(), "Read ledger file");
    Ok(rows)
}

pub fn parse_ledger_str(content: &str, format: LedgerFormat) -> Result<Vec<LedgerRow>> {
    match format {
        LedgerFormat::Csv => parse_csv(content),
        LedgerFormat::Json => parse_json(content),
    }
}

fn unquote(field: &str) -> &str {
    let f = field.trim();
    f.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(f)
}

fn is_header(address: &str, amount: &str) -> bool {
    let a = address.to_ascii_lowercase();
    (a == "address" || a == "identity") && amount.eq_ignore_ascii_case("amount")
}

fn parse_csv(content: &str) -> Result<Vec<LedgerRow>> {
    let mut rows = Vec::new();
    let mut seen_data = false;

    for (idx, raw) in content.lines().enumerate() {
        let line = idx + 1;
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = text.split(',').map(unquote).collect();
        if fields.len() != 2 {
            return Err(ledger_row_error(
                line,
                &format!("expected 2 columns (address,amount), found {}", fields.len()),
            ));
        }
        let (address, amount) = (fields[0], fields[1]);

        if !seen_data && is_header(address, amount) {
            seen_data = true;
            continue;
        }
        seen_data = true;

        if address.is_empty() {
            return Err(ledger_row_error(line, "empty address"));
        }
        if amount.is_empty() {
            return Err(ledger_row_error(line, "empty amount"));
        }
        rows.push(LedgerRow {
            line,
            address: address.to_string(),
            amount: amount.to_string(),
        });
    }

    Ok(rows)
}

#[derive(Deserialize)]
struct JsonRow {
    address: String,
    amount: serde_json::Value,
}

fn parse_json(content: &str) -> Result<Vec<LedgerRow>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)
        .map_err(|e| ledger_row_error(e.line(), &format!("ledger is not a JSON array: {}", e)))?;

    values
        .into_iter()
        .enumerate()
        .map(|(idx, value)| {
            let line = idx + 1;
            let row: JsonRow = serde_json::from_value(value)
                .map_err(|e| ledger_row_error(line, &format!("malformed row: {}", e)))?;
            let amount = match row.amount {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                other => {
                    return Err(ledger_row_error(
                        line,
                        &format!("amount must be a string or integer, found {}", other),
                    ))
                }
            };
            Ok(LedgerRow {
                line,
                address: row.address,
                amount,
            })
        })
        .collect()
}
