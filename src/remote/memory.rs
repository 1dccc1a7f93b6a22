use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::{
    compute_stats, DailySummary, PeriodStats, ReportingPeriod, Transaction, TransactionDraft,
    TransactionStatus, TransactionType,
};

use super::{RemoteError, RemoteLedger};

/// In-process ledger service for local runs and tests.
///
/// Assigns uuid-v4 ids and the current timestamp on submit, and derives
/// statistics and daily summaries from the transactions it holds.
#[derive(Debug, Clone, Default)]
pub struct MemoryLedger {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the service with existing records.
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
        }
    }

    /// Snapshot of everything held.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.read().unwrap().clone()
    }

    fn in_period(&self, period: ReportingPeriod) -> Vec<Transaction> {
        self.transactions
            .read()
            .unwrap()
            .iter()
            .filter(|tx| period.contains(tx.date.date_naive()))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl RemoteLedger for MemoryLedger {
    async fn submit(&self, draft: &TransactionDraft) -> Result<Transaction, RemoteError> {
        let transaction = draft
            .clone()
            .into_transaction(Uuid::new_v4().to_string(), Utc::now());
        self.transactions
            .write()
            .unwrap()
            .push(transaction.clone());
        Ok(transaction)
    }

    async fn fetch_stats(&self, period: ReportingPeriod) -> Result<PeriodStats, RemoteError> {
        let in_period = self.in_period(period);
        let stats = compute_stats(&in_period);
        let outstanding = in_period
            .iter()
            .filter(|tx| tx.status == TransactionStatus::Pending)
            .map(|tx| tx.amount.abs())
            .sum();

        Ok(PeriodStats {
            total_revenue: stats.total_revenue,
            total_expenses: stats.total_expenses,
            net_profit: stats.net_profit,
            outstanding_payments: outstanding,
        })
    }

    async fn fetch_daily_summaries(
        &self,
        period: ReportingPeriod,
    ) -> Result<Vec<DailySummary>, RemoteError> {
        let mut days: BTreeMap<NaiveDate, DailySummary> = BTreeMap::new();

        for tx in self.in_period(period) {
            let day = tx.date.date_naive();
            let summary = days.entry(day).or_insert_with(|| DailySummary {
                date: day,
                total_revenue: 0,
                total_expenses: 0,
                net_income: 0,
                bookings_count: 0,
                refunds_count: 0,
            });
            match tx.kind {
                TransactionType::Revenue => {
                    summary.total_revenue += tx.amount;
                    summary.bookings_count += 1;
                }
                TransactionType::Expense
                | TransactionType::Maintenance
                | TransactionType::Insurance => {
                    summary.total_expenses += tx.amount.abs();
                }
                TransactionType::Refund => {
                    summary.refunds_count += 1;
                }
                _ => {}
            }
            summary.net_income = summary.total_revenue - summary.total_expenses;
        }

        Ok(days.into_values().collect())
    }
}
