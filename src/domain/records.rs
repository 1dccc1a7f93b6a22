use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Cents, Transaction, TransactionId, TransactionStatus, TransactionType};

/// Icon token for a record row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecordIcon {
    Cycle,
    CashOut,
    Cart,
    Money,
    Office,
    Megaphone,
    Pin,
}

impl RecordIcon {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordIcon::Cycle => "cycle",
            RecordIcon::CashOut => "cash-out",
            RecordIcon::Cart => "cart",
            RecordIcon::Money => "money",
            RecordIcon::Office => "office",
            RecordIcon::Megaphone => "megaphone",
            RecordIcon::Pin => "pin",
        }
    }
}

impl std::fmt::Display for RecordIcon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Color token consumed by table renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Accent {
    Blue,
    Red,
    Purple,
    Yellow,
    Green,
    Gray,
    NeutralGray,
}

impl Accent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accent::Blue => "blue",
            Accent::Red => "red",
            Accent::Purple => "purple",
            Accent::Yellow => "yellow",
            Accent::Green => "green",
            Accent::Gray => "gray",
            Accent::NeutralGray => "neutral-gray",
        }
    }
}

impl std::fmt::Display for Accent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transactions outside the revenue/maintenance/insurance buckets, newest
/// first. The sort is stable: records on the same date keep their input order.
pub fn select_other_records(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut records: Vec<&Transaction> = transactions
        .iter()
        .filter(|tx| {
            !matches!(
                tx.kind,
                TransactionType::Revenue | TransactionType::Maintenance | TransactionType::Insurance
            )
        })
        .collect();
    records.sort_by(|a, b| b.date.cmp(&a.date));
    records
}

pub fn icon_for(kind: &TransactionType) -> RecordIcon {
    match kind {
        TransactionType::Refund => RecordIcon::Cycle,
        TransactionType::Expense => RecordIcon::CashOut,
        TransactionType::Purchase => RecordIcon::Cart,
        TransactionType::Salary => RecordIcon::Money,
        TransactionType::OfficeExpense => RecordIcon::Office,
        TransactionType::Marketing => RecordIcon::Megaphone,
        _ => RecordIcon::Pin,
    }
}

pub fn type_accent(kind: &TransactionType) -> Accent {
    match kind {
        TransactionType::Refund => Accent::Blue,
        TransactionType::Expense => Accent::Red,
        TransactionType::Purchase => Accent::Purple,
        TransactionType::Salary => Accent::Yellow,
        _ => Accent::NeutralGray,
    }
}

/// Color for the amount column. Known outflow types are always red; refunds
/// blue; anything else colors by the stored sign.
pub fn amount_accent(kind: &TransactionType, amount: Cents) -> Accent {
    match kind {
        TransactionType::Refund => Accent::Blue,
        TransactionType::Expense
        | TransactionType::Purchase
        | TransactionType::Salary
        | TransactionType::OfficeExpense
        | TransactionType::Marketing => Accent::Red,
        _ => {
            if amount >= 0 {
                Accent::Green
            } else {
                Accent::Red
            }
        }
    }
}

pub fn status_accent(status: TransactionStatus) -> Accent {
    match status {
        TransactionStatus::Completed => Accent::Green,
        TransactionStatus::Pending => Accent::Yellow,
        TransactionStatus::Failed => Accent::Red,
    }
}

/// "office_expense" -> "Office Expense"
pub fn type_label(kind: &TransactionType) -> String {
    kind.as_str()
        .split('_')
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// One row of the "other records" table, carrying the derived display tokens
/// alongside the record fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    pub id: TransactionId,
    pub label: String,
    pub description: String,
    pub amount: Cents,
    pub date: DateTime<Utc>,
    pub status: TransactionStatus,
    pub icon: RecordIcon,
    pub type_accent: Accent,
    pub amount_accent: Accent,
    pub status_accent: Accent,
}

impl RecordRow {
    pub fn from_transaction(tx: &Transaction) -> Self {
        Self {
            id: tx.id.clone(),
            label: type_label(&tx.kind),
            description: tx.description.clone(),
            amount: tx.amount,
            date: tx.date,
            status: tx.status,
            icon: icon_for(&tx.kind),
            type_accent: type_accent(&tx.kind),
            amount_accent: amount_accent(&tx.kind, tx.amount),
            status_accent: status_accent(tx.status),
        }
    }
}

/// Filtered, sorted rows with their tokens: the table's full input.
pub fn record_rows(transactions: &[Transaction]) -> Vec<RecordRow> {
    select_other_records(transactions)
        .into_iter()
        .map(RecordRow::from_transaction)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PaymentMethod;

    fn tx(id: &str, kind: TransactionType, amount: Cents, date: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            kind,
            amount,
            description: String::new(),
            reference: None,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            date: DateTime::parse_from_rfc3339(date).unwrap().with_timezone(&Utc),
            recorded_by: String::new(),
        }
    }

    #[test]
    fn test_selection_excludes_operational_buckets() {
        let txs = vec![
            tx("a", TransactionType::Revenue, 100, "2024-02-01T00:00:00Z"),
            tx("b", TransactionType::Refund, 20, "2024-02-02T00:00:00Z"),
            tx("c", TransactionType::Maintenance, 30, "2024-02-03T00:00:00Z"),
            tx("d", TransactionType::Insurance, 40, "2024-02-04T00:00:00Z"),
            tx("e", TransactionType::Salary, 50, "2024-02-05T00:00:00Z"),
        ];
        let records = select_other_records(&txs);
        let ids: Vec<&str> = records.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["e", "b"]);
    }

    #[test]
    fn test_selection_sorts_newest_first_stable() {
        let txs = vec![
            tx("old", TransactionType::Purchase, 10, "2024-01-01T00:00:00Z"),
            tx("tie1", TransactionType::Salary, 20, "2024-03-01T00:00:00Z"),
            tx("tie2", TransactionType::Refund, 30, "2024-03-01T00:00:00Z"),
            tx("new", TransactionType::Expense, 40, "2024-06-01T00:00:00Z"),
        ];
        let ids: Vec<&str> = select_other_records(&txs)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        // Ties keep their original relative order.
        assert_eq!(ids, vec!["new", "tie1", "tie2", "old"]);
    }

    #[test]
    fn test_icon_table() {
        assert_eq!(icon_for(&TransactionType::Refund), RecordIcon::Cycle);
        assert_eq!(icon_for(&TransactionType::Expense), RecordIcon::CashOut);
        assert_eq!(icon_for(&TransactionType::Purchase), RecordIcon::Cart);
        assert_eq!(icon_for(&TransactionType::Salary), RecordIcon::Money);
        assert_eq!(icon_for(&TransactionType::OfficeExpense), RecordIcon::Office);
        assert_eq!(icon_for(&TransactionType::Marketing), RecordIcon::Megaphone);
        assert_eq!(
            icon_for(&TransactionType::Other("toll".to_string())),
            RecordIcon::Pin
        );
    }

    #[test]
    fn test_type_accent_table() {
        assert_eq!(type_accent(&TransactionType::Refund), Accent::Blue);
        assert_eq!(type_accent(&TransactionType::Expense), Accent::Red);
        assert_eq!(type_accent(&TransactionType::Purchase), Accent::Purple);
        assert_eq!(type_accent(&TransactionType::Salary), Accent::Yellow);
        assert_eq!(
            type_accent(&TransactionType::Other("toll".to_string())),
            Accent::NeutralGray
        );
    }

    #[test]
    fn test_amount_accent_table() {
        assert_eq!(amount_accent(&TransactionType::Refund, 100), Accent::Blue);
        for kind in [
            TransactionType::Expense,
            TransactionType::Purchase,
            TransactionType::Salary,
            TransactionType::OfficeExpense,
            TransactionType::Marketing,
        ] {
            assert_eq!(amount_accent(&kind, 100), Accent::Red);
        }
        let other = TransactionType::Other("deposit".to_string());
        assert_eq!(amount_accent(&other, 100), Accent::Green);
        assert_eq!(amount_accent(&other, 0), Accent::Green);
        assert_eq!(amount_accent(&other, -100), Accent::Red);
    }

    #[test]
    fn test_status_accent_table() {
        assert_eq!(status_accent(TransactionStatus::Completed), Accent::Green);
        assert_eq!(status_accent(TransactionStatus::Pending), Accent::Yellow);
        assert_eq!(status_accent(TransactionStatus::Failed), Accent::Red);
    }

    #[test]
    fn test_type_label_formatting() {
        assert_eq!(type_label(&TransactionType::OfficeExpense), "Office Expense");
        assert_eq!(type_label(&TransactionType::Refund), "Refund");
        assert_eq!(
            type_label(&TransactionType::Other("fuel_surcharge".to_string())),
            "Fuel Surcharge"
        );
    }

    #[test]
    fn test_record_row_tokens_serialize_as_strings() {
        let record = tx("r1", TransactionType::Purchase, -900, "2024-02-01T00:00:00Z");
        let row = RecordRow::from_transaction(&record);
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["icon"], "cart");
        assert_eq!(json["typeAccent"], "purple");
        assert_eq!(json["amountAccent"], "red");
        assert_eq!(json["statusAccent"], "green");
        assert_eq!(json["label"], "Purchase");
    }
}
