use crate::domain::{
    DailySummary, PeriodStats, ReportingPeriod, Transaction, TransactionDraft,
};
use crate::remote::RemoteLedger;

use super::AppError;

/// Fallback messages for rejections that carry no server message.
const SUBMIT_FALLBACK: &str = "Failed to record transaction";
const STATS_FALLBACK: &str = "Failed to load financial stats";
const SUMMARIES_FALLBACK: &str = "Failed to load daily summaries";

/// Three-state outcome of one remote round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum Lifecycle<T> {
    Pending,
    Fulfilled(T),
    /// Optional server-supplied message; `None` falls back to a generic one.
    Rejected(Option<String>),
}

/// Events driving the ledger state machine. Async outcomes re-enter through
/// the same entrypoint as user commands.
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEvent {
    Submit(Lifecycle<Transaction>),
    FetchStats(Lifecycle<PeriodStats>),
    FetchSummaries(Lifecycle<Vec<DailySummary>>),
    SetPeriod(ReportingPeriod),
    Clear,
}

/// In-memory ledger state.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerState {
    /// Newest first. Mutated only by a fulfilled submit (prepend) or `Clear`.
    pub transactions: Vec<Transaction>,
    pub daily_summaries: Vec<DailySummary>,
    pub selected_period: ReportingPeriod,
    pub loading: bool,
    pub error: Option<String>,
    /// Mutated only by a fulfilled stats fetch, which replaces it wholesale.
    pub stats: PeriodStats,
}

impl LedgerState {
    pub fn new(period: ReportingPeriod) -> Self {
        Self {
            transactions: Vec::new(),
            daily_summaries: Vec::new(),
            selected_period: period,
            loading: false,
            error: None,
            stats: PeriodStats::default(),
        }
    }
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::new(ReportingPeriod::current())
    }
}

/// Apply one event to the state. Every ledger state change goes through here.
pub fn apply(state: &mut LedgerState, event: LedgerEvent) {
    match event {
        LedgerEvent::Submit(Lifecycle::Pending)
        | LedgerEvent::FetchStats(Lifecycle::Pending)
        | LedgerEvent::FetchSummaries(Lifecycle::Pending) => {
            state.loading = true;
            state.error = None;
        }
        LedgerEvent::Submit(Lifecycle::Fulfilled(transaction)) => {
            state.transactions.insert(0, transaction);
            state.loading = false;
        }
        LedgerEvent::FetchStats(Lifecycle::Fulfilled(stats)) => {
            state.stats = stats;
            state.loading = false;
        }
        LedgerEvent::FetchSummaries(Lifecycle::Fulfilled(summaries)) => {
            state.daily_summaries = summaries;
            state.loading = false;
        }
        LedgerEvent::Submit(Lifecycle::Rejected(message)) => {
            reject(state, message, SUBMIT_FALLBACK);
        }
        LedgerEvent::FetchStats(Lifecycle::Rejected(message)) => {
            reject(state, message, STATS_FALLBACK);
        }
        LedgerEvent::FetchSummaries(Lifecycle::Rejected(message)) => {
            reject(state, message, SUMMARIES_FALLBACK);
        }
        LedgerEvent::SetPeriod(period) => {
            state.selected_period = period;
        }
        LedgerEvent::Clear => {
            state.transactions.clear();
            state.error = None;
        }
    }
}

fn reject(state: &mut LedgerState, message: Option<String>, fallback: &str) {
    state.loading = false;
    state.error = Some(resolve_message(message, fallback));
}

fn resolve_message(message: Option<String>, fallback: &str) -> String {
    message.unwrap_or_else(|| fallback.to_string())
}

/// Async facade over the state machine: one remote dispatch per call, with
/// the outcome fed back through [`apply`] and also returned to the caller.
///
/// Dispatches are not coalesced, queued or capped; nothing retries, times out
/// or cancels. A request that never completes leaves `loading` latched true.
pub struct LedgerStore<C> {
    state: LedgerState,
    client: C,
}

impl<C: RemoteLedger> LedgerStore<C> {
    pub fn new(client: C) -> Self {
        Self {
            state: LedgerState::default(),
            client,
        }
    }

    pub fn with_state(client: C, state: LedgerState) -> Self {
        Self { state, client }
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Submit a draft. On fulfillment the service-confirmed record (with its
    /// assigned id and date) is prepended to the local sequence; there is no
    /// optimistic insert. A rejection leaves the sequence untouched and lands
    /// its message in `state.error`.
    pub async fn submit(&mut self, draft: TransactionDraft) -> Result<Transaction, AppError> {
        apply(&mut self.state, LedgerEvent::Submit(Lifecycle::Pending));
        match self.client.submit(&draft).await {
            Ok(transaction) => {
                apply(
                    &mut self.state,
                    LedgerEvent::Submit(Lifecycle::Fulfilled(transaction.clone())),
                );
                Ok(transaction)
            }
            Err(err) => {
                let message = err.server_message().map(str::to_string);
                apply(
                    &mut self.state,
                    LedgerEvent::Submit(Lifecycle::Rejected(message.clone())),
                );
                Err(AppError::Remote(resolve_message(message, SUBMIT_FALLBACK)))
            }
        }
    }

    /// Fetch statistics for the selected period, replacing `state.stats`
    /// wholesale on fulfillment.
    pub async fn refresh_stats(&mut self) -> Result<PeriodStats, AppError> {
        let period = self.state.selected_period;
        apply(&mut self.state, LedgerEvent::FetchStats(Lifecycle::Pending));
        match self.client.fetch_stats(period).await {
            Ok(stats) => {
                apply(
                    &mut self.state,
                    LedgerEvent::FetchStats(Lifecycle::Fulfilled(stats)),
                );
                Ok(stats)
            }
            Err(err) => {
                let message = err.server_message().map(str::to_string);
                apply(
                    &mut self.state,
                    LedgerEvent::FetchStats(Lifecycle::Rejected(message.clone())),
                );
                Err(AppError::Remote(resolve_message(message, STATS_FALLBACK)))
            }
        }
    }

    /// Fetch per-day summaries for the selected period.
    pub async fn refresh_daily_summaries(&mut self) -> Result<Vec<DailySummary>, AppError> {
        let period = self.state.selected_period;
        apply(
            &mut self.state,
            LedgerEvent::FetchSummaries(Lifecycle::Pending),
        );
        match self.client.fetch_daily_summaries(period).await {
            Ok(summaries) => {
                apply(
                    &mut self.state,
                    LedgerEvent::FetchSummaries(Lifecycle::Fulfilled(summaries.clone())),
                );
                Ok(summaries)
            }
            Err(err) => {
                let message = err.server_message().map(str::to_string);
                apply(
                    &mut self.state,
                    LedgerEvent::FetchSummaries(Lifecycle::Rejected(message.clone())),
                );
                Err(AppError::Remote(resolve_message(
                    message,
                    SUMMARIES_FALLBACK,
                )))
            }
        }
    }

    pub fn set_period(&mut self, period: ReportingPeriod) {
        apply(&mut self.state, LedgerEvent::SetPeriod(period));
    }

    pub fn clear(&mut self) {
        apply(&mut self.state, LedgerEvent::Clear);
    }
}
