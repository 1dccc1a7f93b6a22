mod common;

use common::make_tx;
use fleetledger::domain::{
    aggregate_monthly, classify, compute_stats, select_other_records, Direction, TransactionType,
};

#[test]
fn test_classifier_total_over_all_types() {
    let kinds = [
        TransactionType::Revenue,
        TransactionType::Expense,
        TransactionType::Refund,
        TransactionType::Maintenance,
        TransactionType::Insurance,
        TransactionType::Purchase,
        TransactionType::Salary,
        TransactionType::OfficeExpense,
        TransactionType::Marketing,
        TransactionType::Other("anything_at_all".to_string()),
        TransactionType::Other(String::new()),
    ];
    for kind in kinds {
        let c = classify(&kind);
        assert!(matches!(
            c.direction,
            Direction::Inflow | Direction::Outflow | Direction::Neutral
        ));
    }
}

#[test]
fn test_empty_ledger_reports() {
    let trend = aggregate_monthly(&[]);
    assert!(trend.labels.is_empty());
    assert!(trend.revenue.is_empty());
    assert!(trend.expenses.is_empty());
    assert!(trend.net_profit.is_empty());

    let stats = compute_stats(&[]);
    assert_eq!(stats.total_revenue, 0);
    assert_eq!(stats.total_expenses, 0);
    assert_eq!(stats.total_refunds, 0);
    assert_eq!(stats.net_profit, 0);
    assert_eq!(stats.avg_revenue, 0);
    assert_eq!(stats.avg_expense, 0);
}

#[test]
fn test_quarter_trend_example() {
    let txs = vec![
        make_tx("a", TransactionType::Revenue, 100, "2024-01-10"),
        make_tx("b", TransactionType::Expense, 40, "2024-02-14"),
        make_tx("c", TransactionType::Revenue, 60, "2024-03-21"),
    ];
    let trend = aggregate_monthly(&txs);

    assert_eq!(trend.labels, vec!["Jan 2024", "Feb 2024", "Mar 2024"]);
    assert_eq!(trend.revenue, vec![100, 0, 60]);
    assert_eq!(trend.expenses, vec![0, 40, 0]);
    assert_eq!(trend.net_profit, vec![100, -40, 60]);
}

#[test]
fn test_refund_reduces_profit() {
    let txs = vec![
        make_tx("a", TransactionType::Revenue, 100, "2024-01-10"),
        make_tx("b", TransactionType::Refund, -20, "2024-01-12"),
    ];
    let stats = compute_stats(&txs);
    assert_eq!(stats.total_revenue, 100);
    assert_eq!(stats.total_refunds, 20);
    assert_eq!(stats.net_profit, 80);
    assert_eq!(stats.avg_revenue, 100);
}

#[test]
fn test_other_records_excludes_operational_and_orders_by_date() {
    let txs = vec![
        make_tx("rev", TransactionType::Revenue, 100, "2024-04-01"),
        make_tx("ref", TransactionType::Refund, 20, "2024-04-02"),
        make_tx("mnt", TransactionType::Maintenance, 30, "2024-04-03"),
        make_tx("ins", TransactionType::Insurance, 40, "2024-04-04"),
        make_tx("sal", TransactionType::Salary, 50, "2024-04-05"),
        make_tx("oth", TransactionType::Other("toll".to_string()), 5, "2024-04-06"),
    ];
    let records = select_other_records(&txs);

    for tx in &records {
        assert!(!matches!(
            tx.kind,
            TransactionType::Revenue | TransactionType::Maintenance | TransactionType::Insurance
        ));
    }
    // Non-increasing by date
    for pair in records.windows(2) {
        assert!(pair[0].date >= pair[1].date);
    }
    assert_eq!(records.len(), 3);
}

#[test]
fn test_trend_and_stats_disagree_on_refunds() {
    // Refunds are out of the trend series but still reduce overall profit.
    let txs = vec![
        make_tx("a", TransactionType::Revenue, 1000, "2024-05-01"),
        make_tx("b", TransactionType::Refund, 300, "2024-05-02"),
    ];

    let trend = aggregate_monthly(&txs);
    assert_eq!(trend.net_profit, vec![1000]);

    let stats = compute_stats(&txs);
    assert_eq!(stats.net_profit, 700);
}
