use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Cents;

/// Inclusive calendar-date window driving which remote statistics are fetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportingPeriod {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The 30 days ending on `today`, the default window.
    pub fn trailing_30_days(today: NaiveDate) -> Self {
        Self {
            start: today - Duration::days(30),
            end: today,
        }
    }

    /// Default window anchored at the current date.
    pub fn current() -> Self {
        Self::trailing_30_days(Utc::now().date_naive())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Headline statistics for a reporting period, produced by the ledger service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodStats {
    pub total_revenue: Cents,
    pub total_expenses: Cents,
    pub net_profit: Cents,
    pub outstanding_payments: Cents,
}

/// Per-day rollup produced by the ledger service; consumed opaquely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: NaiveDate,
    pub total_revenue: Cents,
    pub total_expenses: Cents,
    pub net_income: Cents,
    pub bookings_count: u32,
    pub refunds_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_trailing_window_bounds() {
        let period = ReportingPeriod::trailing_30_days(date("2024-03-31"));
        assert_eq!(period.start, date("2024-03-01"));
        assert_eq!(period.end, date("2024-03-31"));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let period = ReportingPeriod::new(date("2024-03-01"), date("2024-03-31"));
        assert!(period.contains(date("2024-03-01")));
        assert!(period.contains(date("2024-03-31")));
        assert!(!period.contains(date("2024-04-01")));
    }

    #[test]
    fn test_period_stats_wire_names() {
        let stats = PeriodStats {
            total_revenue: 100,
            total_expenses: 40,
            net_profit: 60,
            outstanding_payments: 0,
        };
        let json = serde_json::to_value(stats).unwrap();
        assert_eq!(json["totalRevenue"], 100);
        assert_eq!(json["outstandingPayments"], 0);
    }
}
