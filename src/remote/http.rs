use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{DailySummary, PeriodStats, ReportingPeriod, Transaction, TransactionDraft};

use super::{RemoteError, RemoteLedger};

/// JSON-over-HTTP implementation of [`RemoteLedger`].
///
/// Endpoints, relative to the base url:
/// - `POST /api/transactions`: submit a draft, returns the persisted record
/// - `GET  /api/reports/stats?start=..&end=..`: period statistics
/// - `GET  /api/reports/daily?start=..&end=..`: per-day summaries
#[derive(Clone)]
pub struct HttpLedgerClient {
    http: reqwest::Client,
    base_url: String,
}

/// Failure body the service may send; the message is optional and its absence
/// must not break the caller.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

impl HttpLedgerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RemoteError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fleetledger/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to an error, preferring the service's own
    /// message when the body carries one.
    async fn error_from(response: reqwest::Response) -> RemoteError {
        let status = response.status();
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);
        match message {
            Some(message) => RemoteError::Rejected(message),
            None => RemoteError::Transport(anyhow::anyhow!("ledger service returned {status}")),
        }
    }
}

#[async_trait]
impl RemoteLedger for HttpLedgerClient {
    async fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, RemoteError> {
        let response = self
            .http
            .post(self.url("/api/transactions"))
            .json(draft)
            .send()
            .await
            .context("Failed to reach ledger service")?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let transaction = response
            .json::<Transaction>()
            .await
            .context("Failed to decode submitted transaction")?;
        Ok(transaction)
    }

    async fn fetch_stats(&self, period: ReportingPeriod) -> Result<PeriodStats, RemoteError> {
        let response = self
            .http
            .get(self.url("/api/reports/stats"))
            .query(&[
                ("start", period.start.to_string()),
                ("end", period.end.to_string()),
            ])
            .send()
            .await
            .context("Failed to reach ledger service")?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let stats = response
            .json::<PeriodStats>()
            .await
            .context("Failed to decode period statistics")?;
        Ok(stats)
    }

    async fn fetch_daily_summaries(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<DailySummary>, RemoteError> {
        let response = self
            .http
            .get(self.url("/api/reports/daily"))
            .query(&[
                ("start", period.start.to_string()),
                ("end", period.end.to_string()),
            ])
            .send()
            .await
            .context("Failed to reach ledger service")?;

        if !response.status().is_success() {
            return Err(Self::error_from(response).await);
        }
        let summaries = response
            .json::<Vec<DailySummary>>()
            .await
            .context("Failed to decode daily summaries")?;
        Ok(summaries)
    }
}
