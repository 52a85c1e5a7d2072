//! CSV import of pending transactions
//!
//! Expected layout is the French bank export the review screen works from:
//! semicolon-separated, decimal comma, day-first dates. Columns are found by
//! header name so their order does not matter.

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::io::Read;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Options for reading a pending-transactions CSV
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field separator
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

/// Column positions resolved from the header row
struct Columns {
    id: Option<usize>,
    label: usize,
    amount: usize,
    date: usize,
    ungrouped: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let h = h.trim().trim_start_matches('\u{feff}').to_lowercase();
                names.contains(&h.as_str())
            })
        };
        let require = |name: &str, aliases: &[&str]| {
            find(aliases).ok_or_else(|| Error::Import(format!("Missing column: {}", name)))
        };

        Ok(Self {
            id: find(&["id"]),
            label: require("label", &["label", "libelle", "libellé"])?,
            amount: require("amount", &["amount", "montant"])?,
            date: require("date", &["date", "dateop"])?,
            ungrouped: find(&["is_manually_ungrouped"]),
        })
    }
}

/// Parse pending transactions from CSV data.
///
/// Rows whose date cannot be parsed are skipped. Ids default to the 1-based
/// row number when the file has no `id` column.
pub fn parse_pending_csv<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(options.delimiter)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let row_number = index as i64 + 1;

        let id = match columns.id.and_then(|col| record.get(col)) {
            Some(raw) if !raw.trim().is_empty() => raw
                .trim()
                .parse::<i64>()
                .map_err(|_| Error::Import(format!("Row {}: invalid id: {}", row_number, raw)))?,
            _ => row_number,
        };

        let label = record.get(columns.label).unwrap_or("").to_string();

        let date_str = record.get(columns.date).unwrap_or("");
        let Some(date) = parse_date(date_str) else {
            warn!("Skipping row {}: unable to parse date {:?}", row_number, date_str);
            continue;
        };

        let amount_str = record
            .get(columns.amount)
            .ok_or_else(|| Error::Import(format!("Row {}: missing amount", row_number)))?;
        let amount = parse_amount(amount_str)?;

        let is_manually_ungrouped = columns
            .ungrouped
            .and_then(|col| record.get(col))
            .map(parse_flag)
            .unwrap_or(false);

        transactions.push(Transaction {
            id,
            label,
            amount,
            date,
            is_manually_ungrouped,
        });
    }

    debug!("Parsed {} pending transactions", transactions.len());
    Ok(transactions)
}

/// Parse a day-first or ISO date
fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    // Two-digit years first: %Y would read "24" as year 24
    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%d/%m/%y", // 15/01/24
        "%d/%m/%Y", // 15/01/2024
        "%d-%m-%Y", // 15-01-2024
    ];

    formats
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse an amount with decimal comma, space thousands separators and currency sign
fn parse_amount(s: &str) -> Result<f64> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}' | '€'))
        .map(|c| match c {
            ',' => '.',
            '\u{2212}' => '-',
            other => other,
        })
        .collect();

    cleaned
        .parse::<f64>()
        .map_err(|_| Error::Import(format!("Unable to parse amount: {}", s)))
}

fn parse_flag(s: &str) -> bool {
    matches!(
        s.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "oui"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_full_export() {
        let csv = "id;label;amount;date;is_manually_ungrouped\n\
                   1;CARREFOUR CB*6759;-50,00;2024-01-15;0\n\
                   2;CHQ 12345;-100,00;16/01/2024;1\n";
        let txs = parse_pending_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, 1);
        assert_eq!(txs[0].label, "CARREFOUR CB*6759");
        assert_eq!(txs[0].amount, -50.0);
        assert_eq!(txs[0].date, date("2024-01-15"));
        assert!(!txs[0].is_manually_ungrouped);
        assert_eq!(txs[1].date, date("2024-01-16"));
        assert!(txs[1].is_manually_ungrouped);
    }

    #[test]
    fn test_optional_columns_and_row_ids() {
        let csv = "dateOp;label;amount\n\
                   2024-02-01;EDF;-80,5\n\
                   2024-02-02;SALAIRE;2 500,00 €\n";
        let txs = parse_pending_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();

        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].id, 1);
        assert_eq!(txs[1].id, 2);
        assert_eq!(txs[0].amount, -80.5);
        assert_eq!(txs[1].amount, 2500.0);
        assert!(txs.iter().all(|t| !t.is_manually_ungrouped));
    }

    #[test]
    fn test_comma_delimiter_and_bom() {
        let csv = "\u{feff}Label,Amount,Date\nSNCF,-42.10,2024-03-03\n";
        let options = CsvOptions { delimiter: b',' };
        let txs = parse_pending_csv(csv.as_bytes(), &options).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].label, "SNCF");
        assert_eq!(txs[0].amount, -42.10);
    }

    #[test]
    fn test_bad_dates_are_skipped() {
        let csv = "label;amount;date\nA;-1,00;not a date\nB;-2,00;2024-01-01\n";
        let txs = parse_pending_csv(csv.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].label, "B");
        assert_eq!(txs[0].id, 2);
    }

    #[test]
    fn test_missing_required_column() {
        let csv = "label;date\nA;2024-01-01\n";
        let err = parse_pending_csv(csv.as_bytes(), &CsvOptions::default()).unwrap_err();
        assert!(err.to_string().contains("Missing column: amount"));
    }

    #[test]
    fn test_invalid_amount_is_an_error() {
        let csv = "label;amount;date\nA;abc;2024-01-01\n";
        assert!(parse_pending_csv(csv.as_bytes(), &CsvOptions::default()).is_err());
    }

    #[test]
    fn test_invalid_id_is_an_error() {
        let csv = "id;label;amount;date\nx;A;-1;2024-01-01\n";
        assert!(parse_pending_csv(csv.as_bytes(), &CsvOptions::default()).is_err());
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2024-01-15"), Some(date("2024-01-15")));
        assert_eq!(parse_date("15/01/2024"), Some(date("2024-01-15")));
        assert_eq!(parse_date("15/01/24"), Some(date("2024-01-15")));
        assert_eq!(parse_date("15-01-2024"), Some(date("2024-01-15")));
        assert_eq!(parse_date("01/15/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("-1 234,56").unwrap(), -1234.56);
        assert_eq!(parse_amount("12,00 €").unwrap(), 12.0);
        assert_eq!(parse_amount("\u{2212}7,5").unwrap(), -7.5);
        assert_eq!(parse_amount(" 3.25 ").unwrap(), 3.25);
        assert!(parse_amount("").is_err());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" oui "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}
