use std::io::Read;

use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::{
    parse_cents, PaymentMethod, Transaction, TransactionStatus, TransactionType,
};

/// Expected CSV header:
/// `id,type,amount,description,reference,payment_method,status,date,recorded_by`
const COLUMNS: usize = 9;

/// Result of reading a transactions CSV. Bad rows are reported, not fatal.
#[derive(Debug, Clone)]
pub struct CsvImport {
    pub transactions: Vec<Transaction>,
    pub errors: Vec<ImportError>,
}

/// A row that could not be read.
#[derive(Debug, Clone)]
pub struct ImportError {
    pub line: usize,
    pub field: Option<String>,
    pub error: String,
}

/// Read transactions from CSV. Malformed rows are skipped and recorded in
/// `errors`. An unknown type string is not an error; it becomes a neutral
/// `Other` type.
pub fn read_transactions_csv<R: Read>(reader: R) -> Result<CsvImport> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut transactions = Vec::new();
    let mut errors = Vec::new();

    for (line_num, result) in csv_reader.records().enumerate() {
        let line = line_num + 2; // header + 0-indexing

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                errors.push(ImportError {
                    line,
                    field: None,
                    error: format!("CSV parse error: {}", e),
                });
                continue;
            }
        };

        if record.len() < COLUMNS {
            errors.push(ImportError {
                line,
                field: None,
                error: format!("Expected {} columns, got {}", COLUMNS, record.len()),
            });
            continue;
        }

        let amount = match parse_cents(record.get(2).unwrap_or("")) {
            Ok(a) => a,
            Err(e) => {
                errors.push(ImportError {
                    line,
                    field: Some("amount".to_string()),
                    error: format!("Invalid amount: {}", e),
                });
                continue;
            }
        };

        let payment_method = match PaymentMethod::from_str(record.get(5).unwrap_or("")) {
            Some(m) => m,
            None => {
                errors.push(ImportError {
                    line,
                    field: Some("payment_method".to_string()),
                    error: format!("Unknown payment method: {}", record.get(5).unwrap_or("")),
                });
                continue;
            }
        };

        let status = match TransactionStatus::from_str(record.get(6).unwrap_or("")) {
            Some(s) => s,
            None => {
                errors.push(ImportError {
                    line,
                    field: Some("status".to_string()),
                    error: format!("Unknown status: {}", record.get(6).unwrap_or("")),
                });
                continue;
            }
        };

        let date = match parse_timestamp(record.get(7).unwrap_or("")) {
            Ok(d) => d,
            Err(e) => {
                errors.push(ImportError {
                    line,
                    field: Some("date".to_string()),
                    error: format!("Invalid date: {}", e),
                });
                continue;
            }
        };

        let reference = record.get(4).and_then(|s| {
            if s.is_empty() {
                None
            } else {
                Some(s.to_string())
            }
        });

        transactions.push(Transaction {
            id: record.get(0).unwrap_or("").to_string(),
            kind: TransactionType::parse(record.get(1).unwrap_or("")),
            amount,
            description: record.get(3).unwrap_or("").to_string(),
            reference,
            payment_method,
            status,
            date,
            recorded_by: record.get(8).unwrap_or("").to_string(),
        });
    }

    Ok(CsvImport {
        transactions,
        errors,
    })
}

/// Accept RFC 3339 timestamps or bare YYYY-MM-DD dates.
fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        if let Some(dt) = date.and_hms_opt(0, 0, 0) {
            return Ok(dt.and_utc());
        }
    }

    anyhow::bail!("Invalid timestamp format: {}", s)
}
