// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fleetledger::domain::{
    Cents, DailySummary, PaymentMethod, PeriodStats, ReportingPeriod, Transaction,
    TransactionDraft, TransactionStatus, TransactionType,
};
use fleetledger::remote::{RemoteError, RemoteLedger};

/// Helper to parse a date string into DateTime<Utc>
pub fn parse_date(date_str: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
}

/// Build a completed cash transaction for fixtures.
pub fn make_tx(id: &str, kind: TransactionType, amount: Cents, date: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        kind,
        amount,
        description: format!("fixture {id}"),
        reference: None,
        payment_method: PaymentMethod::Cash,
        status: TransactionStatus::Completed,
        date: parse_date(date),
        recorded_by: "staff-1".to_string(),
    }
}

/// Remote ledger that rejects everything. With a message it behaves like a
/// service-side rejection; without one, like a transport failure.
pub struct FailingLedger {
    pub message: Option<String>,
}

impl FailingLedger {
    pub fn rejecting(message: &str) -> Self {
        Self {
            message: Some(message.to_string()),
        }
    }

    pub fn unreachable() -> Self {
        Self { message: None }
    }

    fn error(&self) -> RemoteError {
        match &self.message {
            Some(message) => RemoteError::Rejected(message.clone()),
            None => RemoteError::Transport(anyhow::anyhow!("connection reset")),
        }
    }
}

#[async_trait]
impl RemoteLedger for FailingLedger {
    async fn submit(&self, _draft: &TransactionDraft) -> Result<Transaction, RemoteError> {
        Err(self.error())
    }

    async fn fetch_stats(&self, _period: ReportingPeriod) -> Result<PeriodStats, RemoteError> {
        Err(self.error())
    }

    async fn fetch_daily_summaries(
        &self,
        _period: ReportingPeriod,
    ) -> Result<Vec<DailySummary>, RemoteError> {
        Err(self.error())
    }
}
