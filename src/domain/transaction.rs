use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

/// Opaque transaction identifier assigned by the ledger service.
pub type TransactionId = String;

/// Transaction type as recorded by staff. The set is open: anything the known
/// variants don't cover is carried verbatim in `Other` and treated as neutral
/// by the classifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Revenue,
    Expense,
    Refund,
    Maintenance,
    Insurance,
    Purchase,
    Salary,
    OfficeExpense,
    Marketing,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Revenue => "revenue",
            TransactionType::Expense => "expense",
            TransactionType::Refund => "refund",
            TransactionType::Maintenance => "maintenance",
            TransactionType::Insurance => "insurance",
            TransactionType::Purchase => "purchase",
            TransactionType::Salary => "salary",
            TransactionType::OfficeExpense => "office_expense",
            TransactionType::Marketing => "marketing",
            TransactionType::Other(s) => s,
        }
    }

    /// Total: unrecognized strings land in `Other` rather than failing.
    pub fn parse(s: &str) -> Self {
        match s {
            "revenue" => TransactionType::Revenue,
            "expense" => TransactionType::Expense,
            "refund" => TransactionType::Refund,
            "maintenance" => TransactionType::Maintenance,
            "insurance" => TransactionType::Insurance,
            "purchase" => TransactionType::Purchase,
            "salary" => TransactionType::Salary,
            "office_expense" => TransactionType::OfficeExpense,
            "marketing" => TransactionType::Marketing,
            other => TransactionType::Other(other.to_string()),
        }
    }
}

impl From<String> for TransactionType {
    fn from(s: String) -> Self {
        TransactionType::parse(&s)
    }
}

impl From<TransactionType> for String {
    fn from(kind: TransactionType) -> Self {
        kind.as_str().to_string()
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How the money moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    MobileMoney,
    BankTransfer,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::MobileMoney => "mobile_money",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Card => "card",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "cash" => Some(PaymentMethod::Cash),
            "mobile_money" => Some(PaymentMethod::MobileMoney),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            "card" => Some(PaymentMethod::Card),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Settlement status of a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TransactionStatus::Pending),
            "completed" => Some(TransactionStatus::Completed),
            "failed" => Some(TransactionStatus::Failed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single financial record in the rental ledger.
///
/// `id` and `date` are assigned by the ledger service; local code never mints
/// them. The stored amount sign is informational: financial direction derives
/// from `kind` alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Amount in signed cents
    pub amount: Cents,
    pub description: String,
    /// Free-text pointer to a booking, invoice, etc. Not an enforced key.
    pub reference: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub date: DateTime<Utc>,
    /// Staff member who recorded the entry
    pub recorded_by: String,
}

/// Payload for submitting a new transaction. The service assigns id and date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Cents,
    pub description: String,
    pub reference: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: TransactionStatus,
    pub recorded_by: String,
}

impl TransactionDraft {
    pub fn new(kind: TransactionType, amount: Cents, description: impl Into<String>) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            reference: None,
            payment_method: PaymentMethod::Cash,
            status: TransactionStatus::Completed,
            recorded_by: String::new(),
        }
    }

    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = method;
        self
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_recorded_by(mut self, staff: impl Into<String>) -> Self {
        self.recorded_by = staff.into();
        self
    }

    /// Attach the service-assigned id and date, producing the persisted record.
    pub fn into_transaction(self, id: TransactionId, date: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            description: self.description,
            reference: self.reference,
            payment_method: self.payment_method,
            status: self.status,
            date,
            recorded_by: self.recorded_by,
        }
    }
}
