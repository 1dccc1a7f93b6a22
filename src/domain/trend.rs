use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;

use super::{Cents, Transaction, TransactionType};

/// Months shown in the trend window. The window holds the last populated
/// months, not the last calendar months; gaps are not filled in.
const TREND_WINDOW_MONTHS: usize = 6;

/// Index-aligned monthly series for the revenue/expense trend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyTrend {
    pub labels: Vec<String>,
    pub revenue: Vec<Cents>,
    pub expenses: Vec<Cents>,
    pub net_profit: Vec<Cents>,
}

impl MonthlyTrend {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

/// Bucket transactions into calendar months and derive the trend series.
///
/// Revenue sums the stored signed amount; the expense bucket (expense,
/// maintenance, insurance) sums absolute amounts. Every other type is left
/// out of the series. Empty input yields an all-empty trend.
pub fn aggregate_monthly(transactions: &[Transaction]) -> MonthlyTrend {
    let mut revenue: BTreeMap<String, Cents> = BTreeMap::new();
    let mut expenses: BTreeMap<String, Cents> = BTreeMap::new();

    for tx in transactions {
        match tx.kind {
            TransactionType::Revenue => {
                *revenue.entry(month_key(tx.date)).or_insert(0) += tx.amount;
            }
            TransactionType::Expense | TransactionType::Maintenance | TransactionType::Insurance => {
                *expenses.entry(month_key(tx.date)).or_insert(0) += tx.amount.abs();
            }
            _ => {}
        }
    }

    // Union of populated month keys, ascending lexicographically, which for
    // zero-padded "YYYY-MM" keys is chronological order.
    let mut keys: Vec<&String> = revenue.keys().chain(expenses.keys()).collect();
    keys.sort();
    keys.dedup();
    let start = keys.len().saturating_sub(TREND_WINDOW_MONTHS);

    let mut trend = MonthlyTrend::default();
    for key in &keys[start..] {
        let rev = revenue.get(*key).copied().unwrap_or(0);
        let exp = expenses.get(*key).copied().unwrap_or(0);
        trend.labels.push(month_label(key));
        trend.revenue.push(rev);
        trend.expenses.push(exp);
        trend.net_profit.push(rev - exp);
    }
    trend
}

/// Zero-padded year-month of the UTC timestamp, e.g. "2024-03".
fn month_key(date: DateTime<Utc>) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// "2024-03" -> "Mar 2024". Keys that don't parse fall back to themselves.
fn month_label(key: &str) -> String {
    const MONTHS: [&str; 12] = [
        "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
    ];
    let Some((year, month)) = key.split_once('-') else {
        return key.to_string();
    };
    match month.parse::<usize>() {
        Ok(m) if (1..=12).contains(&m) => format!("{} {}", MONTHS[m - 1], year),
        _ => key.to_string(),
    }
}
