use std::collections::BTreeMap;

use serde::Serialize;

use super::{CENTS_PER_UNIT, Cents, Transaction, TransactionType};

/// Whole-ledger totals and derived figures.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionStats {
    pub total_revenue: Cents,
    pub total_expenses: Cents,
    pub total_refunds: Cents,
    pub net_profit: Cents,
    /// Whole-currency-unit average (a multiple of 100 cents); 0 when there is
    /// no revenue.
    pub avg_revenue: Cents,
    /// Whole-currency-unit average over the expense bucket; 0 when empty.
    pub avg_expense: Cents,
    pub counts_by_type: BTreeMap<TransactionType, usize>,
}

impl TransactionStats {
    pub fn count(&self, kind: &TransactionType) -> usize {
        self.counts_by_type.get(kind).copied().unwrap_or(0)
    }
}

/// Compute totals, averages and per-type counts over the full transaction set.
///
/// Revenue sums stored signed amounts; expenses (expense, maintenance,
/// insurance) and refunds sum absolute amounts. Refunds reduce profit
/// regardless of their stored sign. Division by zero is defined as zero.
pub fn compute_stats(transactions: &[Transaction]) -> TransactionStats {
    let mut stats = TransactionStats::default();
    // These counts are always reported, even at zero.
    for kind in [
        TransactionType::Revenue,
        TransactionType::Maintenance,
        TransactionType::Insurance,
        TransactionType::Refund,
    ] {
        stats.counts_by_type.insert(kind, 0);
    }

    let mut revenue_count = 0usize;
    let mut expense_count = 0usize;

    for tx in transactions {
        *stats.counts_by_type.entry(tx.kind.clone()).or_insert(0) += 1;
        match tx.kind {
            TransactionType::Revenue => {
                stats.total_revenue += tx.amount;
                revenue_count += 1;
            }
            TransactionType::Expense | TransactionType::Maintenance | TransactionType::Insurance => {
                stats.total_expenses += tx.amount.abs();
                expense_count += 1;
            }
            TransactionType::Refund => {
                stats.total_refunds += tx.amount.abs();
            }
            _ => {}
        }
    }

    stats.net_profit = stats.total_revenue - stats.total_expenses - stats.total_refunds;
    stats.avg_revenue = average_whole_units(stats.total_revenue, revenue_count);
    stats.avg_expense = average_whole_units(stats.total_expenses, expense_count);
    stats
}

/// Mean of `total` over `count`, rounded to the nearest whole currency unit
/// (half away from zero). Zero when `count` is zero.
fn average_whole_units(total: Cents, count: usize) -> Cents {
    if count == 0 {
        return 0;
    }
    let units = total as f64 / count as f64 / CENTS_PER_UNIT as f64;
    units.round() as Cents * CENTS_PER_UNIT
}
