use std::io::Write;

use anyhow::Result;

use crate::domain::{
    format_cents, MonthlyTrend, RecordRow, Transaction, TransactionStats,
};

/// Write transactions as CSV with the same columns the importer reads.
pub fn write_transactions_csv<W: Write>(writer: W, transactions: &[Transaction]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record([
        "id",
        "type",
        "amount",
        "description",
        "reference",
        "payment_method",
        "status",
        "date",
        "recorded_by",
    ])?;

    for tx in transactions {
        let amount = format_cents(tx.amount);
        let date = tx.date.to_rfc3339();
        csv_writer.write_record([
            tx.id.as_str(),
            tx.kind.as_str(),
            amount.as_str(),
            tx.description.as_str(),
            tx.reference.as_deref().unwrap_or(""),
            tx.payment_method.as_str(),
            tx.status.as_str(),
            date.as_str(),
            tx.recorded_by.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Write the monthly trend as pretty JSON.
pub fn write_trend_json<W: Write>(writer: W, trend: &MonthlyTrend) -> Result<()> {
    serde_json::to_writer_pretty(writer, trend)?;
    Ok(())
}

/// Write ledger statistics as pretty JSON.
pub fn write_stats_json<W: Write>(writer: W, stats: &TransactionStats) -> Result<()> {
    serde_json::to_writer_pretty(writer, stats)?;
    Ok(())
}

/// Write the records table, tokens included, as pretty JSON.
pub fn write_records_json<W: Write>(writer: W, rows: &[RecordRow]) -> Result<()> {
    serde_json::to_writer_pretty(writer, rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        aggregate_monthly, compute_stats, PaymentMethod, TransactionStatus, TransactionType,
    };
    use crate::io::read_transactions_csv;
    use chrono::Utc;

    fn sample() -> Vec<Transaction> {
        vec![Transaction {
            id: "tx-1".to_string(),
            kind: TransactionType::Revenue,
            amount: 25000,
            description: "Daily rental".to_string(),
            reference: Some("BK-1".to_string()),
            payment_method: PaymentMethod::MobileMoney,
            status: TransactionStatus::Completed,
            date: Utc::now(),
            recorded_by: "staff-1".to_string(),
        }]
    }

    #[test]
    fn test_csv_export_reads_back() {
        let transactions = sample();
        let mut buf = Vec::new();
        write_transactions_csv(&mut buf, &transactions).unwrap();

        let import = read_transactions_csv(buf.as_slice()).unwrap();
        assert!(import.errors.is_empty());
        assert_eq!(import.transactions.len(), 1);
        assert_eq!(import.transactions[0].id, "tx-1");
        assert_eq!(import.transactions[0].amount, 25000);
        assert_eq!(
            import.transactions[0].payment_method,
            PaymentMethod::MobileMoney
        );
    }

    #[test]
    fn test_trend_json_shape() {
        let trend = aggregate_monthly(&sample());
        let mut buf = Vec::new();
        write_trend_json(&mut buf, &trend).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["labels"].as_array().unwrap().len(), 1);
        assert_eq!(json["revenue"][0], 25000);
    }

    #[test]
    fn test_stats_json_counts_keyed_by_type() {
        let stats = compute_stats(&sample());
        let mut buf = Vec::new();
        write_stats_json(&mut buf, &stats).unwrap();

        let json: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["total_revenue"], 25000);
        assert_eq!(json["counts_by_type"]["revenue"], 1);
    }
}
