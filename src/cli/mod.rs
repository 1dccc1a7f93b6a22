use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::application::{AppError, LedgerStore};
use crate::domain::{
    aggregate_monthly, classify, compute_stats, format_cents, parse_cents, record_rows,
    select_other_records, type_label, PaymentMethod, ReportingPeriod, Transaction,
    TransactionDraft, TransactionStatus, TransactionType,
};
use crate::io::{
    read_transactions_csv, write_records_json, write_stats_json, write_transactions_csv,
    write_trend_json,
};
use crate::remote::HttpLedgerClient;

/// Fleetledger - financial reports for a vehicle-rental fleet
#[derive(Parser)]
#[command(name = "fleetledger")]
#[command(about = "Classify, aggregate and report rental-business transactions")]
#[command(version)]
pub struct Cli {
    /// Transactions CSV file used by the local report commands
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: String,

    /// Ledger service base URL used by submit/fetch
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub api_base: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Monthly revenue/expense trend over the last six populated months
    Trend,

    /// Totals, averages and net profit over the whole file
    Stats,

    /// Non-operational records (refunds, purchases, salaries, ...), newest first
    Records {
        /// Maximum number of rows to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Submit a transaction to the ledger service
    Submit {
        /// Amount, e.g. "120.00" (sign is kept as given)
        amount: String,

        /// Transaction type: revenue, expense, refund, maintenance, ...
        #[arg(short = 't', long = "type")]
        kind: String,

        /// Description of the transaction
        #[arg(short, long)]
        description: String,

        /// Payment method: cash, mobile_money, bank_transfer, card
        #[arg(long, default_value = "cash")]
        method: String,

        /// Status: pending, completed, failed
        #[arg(long, default_value = "completed")]
        status: String,

        /// Free-text reference (booking id, invoice number, ...)
        #[arg(long)]
        reference: Option<String>,

        /// Staff id recording the entry
        #[arg(long, default_value = "")]
        recorded_by: String,
    },

    /// Fetch period statistics from the ledger service
    Fetch {
        /// Period start (YYYY-MM-DD, default 30 days ago)
        #[arg(long)]
        from: Option<String>,

        /// Period end (YYYY-MM-DD, default today)
        #[arg(long)]
        to: Option<String>,

        /// Also fetch per-day summaries
        #[arg(long)]
        daily: bool,
    },

    /// Export a report: trend, stats, records, transactions
    Export {
        /// What to export: trend, stats, records, transactions
        export_type: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Trend => {
                let transactions = load_transactions(&self.input)?;
                print_trend(&transactions);
            }
            Commands::Stats => {
                let transactions = load_transactions(&self.input)?;
                print_stats(&transactions);
            }
            Commands::Records { limit } => {
                let transactions = load_transactions(&self.input)?;
                print_records(&transactions, limit);
            }
            Commands::Submit {
                amount,
                kind,
                description,
                method,
                status,
                reference,
                recorded_by,
            } => {
                let amount =
                    parse_cents(&amount).map_err(|_| AppError::InvalidAmount(amount.clone()))?;
                let method = PaymentMethod::from_str(&method)
                    .ok_or_else(|| AppError::UnknownPaymentMethod(method.clone()))?;
                let status = TransactionStatus::from_str(&status)
                    .ok_or_else(|| AppError::UnknownStatus(status.clone()))?;

                let mut draft = TransactionDraft::new(TransactionType::parse(&kind), amount, description)
                    .with_payment_method(method)
                    .with_status(status)
                    .with_recorded_by(recorded_by);
                if let Some(reference) = reference {
                    draft = draft.with_reference(reference);
                }

                let client = HttpLedgerClient::new(&self.api_base)?;
                let mut store = LedgerStore::new(client);
                let tx = store.submit(draft).await?;
                println!("Recorded {} ({})", tx.id, format_cents(tx.amount));
            }
            Commands::Fetch { from, to, daily } => {
                let mut period = ReportingPeriod::current();
                if let Some(from) = from {
                    period.start = parse_day(&from)?;
                }
                if let Some(to) = to {
                    period.end = parse_day(&to)?;
                }

                let client = HttpLedgerClient::new(&self.api_base)?;
                let mut store = LedgerStore::new(client);
                store.set_period(period);

                let stats = store.refresh_stats().await?;
                println!("Period {} .. {}", period.start, period.end);
                println!("  Revenue:     {:>12}", format_cents(stats.total_revenue));
                println!("  Expenses:    {:>12}", format_cents(stats.total_expenses));
                println!("  Net profit:  {:>12}", format_cents(stats.net_profit));
                println!(
                    "  Outstanding: {:>12}",
                    format_cents(stats.outstanding_payments)
                );

                if daily {
                    let summaries = store.refresh_daily_summaries().await?;
                    println!();
                    println!(
                        "{:<12} {:>12} {:>12} {:>12} {:>9} {:>8}",
                        "Date", "Revenue", "Expenses", "Net", "Bookings", "Refunds"
                    );
                    for s in summaries {
                        println!(
                            "{:<12} {:>12} {:>12} {:>12} {:>9} {:>8}",
                            s.date.to_string(),
                            format_cents(s.total_revenue),
                            format_cents(s.total_expenses),
                            format_cents(s.net_income),
                            s.bookings_count,
                            s.refunds_count
                        );
                    }
                }
            }
            Commands::Export {
                export_type,
                output,
            } => {
                let transactions = load_transactions(&self.input)?;
                let mut writer = open_output(output.as_deref())?;
                match export_type.as_str() {
                    "trend" => write_trend_json(&mut writer, &aggregate_monthly(&transactions))?,
                    "stats" => write_stats_json(&mut writer, &compute_stats(&transactions))?,
                    "records" => write_records_json(&mut writer, &record_rows(&transactions))?,
                    "transactions" => write_transactions_csv(&mut writer, &transactions)?,
                    other => anyhow::bail!(
                        "Unknown export type: {other} (expected trend, stats, records or transactions)"
                    ),
                }
                writer.flush()?;
            }
        }
        Ok(())
    }
}

fn load_transactions(path: &str) -> Result<Vec<Transaction>> {
    let file = File::open(path).with_context(|| format!("Failed to open {path}"))?;
    let import = read_transactions_csv(file)?;
    for err in &import.errors {
        match &err.field {
            Some(field) => eprintln!("line {} [{}]: {}", err.line, field, err.error),
            None => eprintln!("line {}: {}", err.line, err.error),
        }
    }
    Ok(import.transactions)
}

fn open_output(path: Option<&str>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create {path}"))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

fn print_trend(transactions: &[Transaction]) {
    let trend = aggregate_monthly(transactions);
    if trend.is_empty() {
        println!("No revenue or expense transactions to chart.");
        return;
    }

    println!(
        "{:<10} {:>12} {:>12} {:>12}",
        "Month", "Revenue", "Expenses", "Net"
    );
    for i in 0..trend.len() {
        println!(
            "{:<10} {:>12} {:>12} {:>12}",
            trend.labels[i],
            format_cents(trend.revenue[i]),
            format_cents(trend.expenses[i]),
            format_cents(trend.net_profit[i])
        );
    }
}

fn print_stats(transactions: &[Transaction]) {
    let stats = compute_stats(transactions);
    println!("Revenue:      {:>12}", format_cents(stats.total_revenue));
    println!("Expenses:     {:>12}", format_cents(stats.total_expenses));
    println!("Refunds:      {:>12}", format_cents(stats.total_refunds));
    println!("Net profit:   {:>12}", format_cents(stats.net_profit));
    println!("Avg revenue:  {:>12}", format_cents(stats.avg_revenue));
    println!("Avg expense:  {:>12}", format_cents(stats.avg_expense));
    println!();
    println!("Counts by type:");
    for (kind, count) in &stats.counts_by_type {
        println!("  {:<16} {}", kind.to_string(), count);
    }
}

fn print_records(transactions: &[Transaction], limit: Option<usize>) {
    let records = select_other_records(transactions);
    if records.is_empty() {
        println!("No records outside the operational buckets.");
        return;
    }

    println!(
        "{:<12} {:<18} {:>12} {:<10} {:<28}",
        "Date", "Type", "Amount", "Status", "Description"
    );
    for tx in records.iter().take(limit.unwrap_or(usize::MAX)) {
        // Display the amount with the classifier's sign convention.
        let signed = classify(&tx.kind).sign.apply(tx.amount);
        println!(
            "{:<12} {:<18} {:>12} {:<10} {:<28}",
            tx.date.date_naive().to_string(),
            type_label(&tx.kind),
            format_cents(signed),
            tx.status.to_string(),
            tx.description
        );
    }
}
