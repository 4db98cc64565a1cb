// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{Aggregation, aggregate_records};
use crate::config::Config;
use crate::error::StoreError;
use crate::models::Transaction;
use crate::period::{DateRange, PeriodKind, period_label, resolve};
use crate::store::{SqliteStore, TransactionQuery, TransactionStore, fetch_transactions};
use crate::terbilang::terbilang_rupiah;
use crate::utils::{date_or_today, fmt_rupiah, maybe_print_json, period_arg, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::{debug, warn};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("summary", sub)) = m.subcommand() {
        summary(conn, cfg, sub)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub event: String,
    pub reference: NaiveDate,
    /// `None` when the period is `all`.
    pub range: Option<DateRange>,
    pub label: String,
    #[serde(flatten)]
    pub aggregation: Aggregation,
    /// Empty when the balance is too large to spell.
    pub balance_words: String,
    pub transactions: Vec<Transaction>,
}

/// Fetch the owner's records for the selected period and aggregate them,
/// bucketed by the same period kind.
pub fn build_report<S: TransactionStore + ?Sized>(
    store: &S,
    owner: &str,
    event: &str,
    reference: NaiveDate,
    period: PeriodKind,
) -> Result<Report> {
    let range = resolve(reference, period);
    debug!("report {} {:?}", period, range);
    let query = TransactionQuery::new(owner).with_range(range);
    let raw = fetch_transactions(store, &query)?;
    let (aggregation, transactions) = aggregate_records(&raw, period);
    let balance_words = balance_in_words(aggregation.balance).unwrap_or_else(|e| {
        warn!("{:#}", e);
        String::new()
    });
    Ok(Report {
        event: event.to_string(),
        reference,
        range: (!range.is_unbounded()).then_some(range),
        label: period_label(reference, period),
        aggregation,
        balance_words,
        transactions,
    })
}

/// "Empat Ratus Ribu Rupiah"; a deficit is prefixed with "Minus".
pub fn balance_in_words(balance: i64) -> Result<String> {
    let words = terbilang_rupiah(balance.checked_abs().unwrap_or(i64::MAX))
        .with_context(|| format!("Cannot spell balance {}", balance))?;
    if balance < 0 {
        Ok(format!("Minus {}", words))
    } else {
        Ok(words)
    }
}

fn summary(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let period = period_arg(sub)?;
    let reference = date_or_today(sub, cfg)?;
    let owner = cfg.require_owner()?;

    let report = match build_report(&SqliteStore::new(conn), owner, &cfg.event, reference, period)
    {
        Ok(r) => r,
        Err(e) => {
            if let Some(se) = e.downcast_ref::<StoreError>() {
                eprintln!("{}", se.user_message());
                print_totals(&Aggregation::empty(period));
            }
            return Err(e);
        }
    };

    if maybe_print_json(json_flag, jsonl_flag, &report)? {
        return Ok(());
    }
    println!("Laporan Keuangan {}", report.event);
    println!("Periode: {}", report.label);
    print_totals(&report.aggregation);
    if !report.balance_words.is_empty() {
        println!("Terbilang: {}", report.balance_words);
    }
    if report.aggregation.skipped > 0 {
        println!(
            "({} malformed record(s) skipped; run `bukukas doctor`)",
            report.aggregation.skipped
        );
    }

    let buckets: Vec<Vec<String>> = report
        .aggregation
        .buckets
        .iter()
        .map(|b| {
            vec![
                b.label.clone(),
                fmt_rupiah(b.income),
                fmt_rupiah(b.expense),
                fmt_rupiah(b.balance()),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Periode", "Pemasukan", "Pengeluaran", "Saldo"], buckets)
    );

    if report.transactions.is_empty() {
        println!("Tidak ada transaksi pada periode ini");
        return Ok(());
    }
    let rows: Vec<Vec<String>> = report
        .transactions
        .iter()
        .map(|t| {
            vec![
                crate::period::format_date_long(t.date),
                t.description.clone(),
                t.kind.label().to_string(),
                fmt_rupiah(t.amount),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Tanggal", "Keterangan", "Jenis", "Jumlah"], rows)
    );
    Ok(())
}

fn print_totals(agg: &Aggregation) {
    println!("Total Pemasukan: {}", fmt_rupiah(agg.total_income));
    println!("Total Pengeluaran: {}", fmt_rupiah(agg.total_expense));
    println!("Saldo: {}", fmt_rupiah(agg.balance));
}
