mod http;
mod memory;

pub use http::*;
pub use memory::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{DailySummary, PeriodStats, ReportingPeriod, Transaction, TransactionDraft};

/// The remote ledger service. Transport and encoding belong to the
/// implementation; callers see transactions in and statistics out.
#[async_trait]
pub trait RemoteLedger: Send + Sync {
    /// Persist a draft. The service assigns the id and date and returns the
    /// confirmed record.
    async fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, RemoteError>;

    /// Headline statistics for the given reporting window.
    async fn fetch_stats(&self, period: ReportingPeriod) -> Result<PeriodStats, RemoteError>;

    /// Per-day rollups for the given reporting window.
    async fn fetch_daily_summaries(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<DailySummary>, RemoteError>;
}

/// Failure talking to the ledger service.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The service rejected the request and said why.
    #[error("{0}")]
    Rejected(String),

    /// The request never completed or the reply was unusable.
    #[error("transport: {0}")]
    Transport(#[from] anyhow::Error),
}

impl RemoteError {
    /// The server-supplied message, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RemoteError::Rejected(message) => Some(message),
            RemoteError::Transport(_) => None,
        }
    }
}
