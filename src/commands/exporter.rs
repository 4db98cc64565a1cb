// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::reports::{Report, build_report};
use crate::config::Config;
use crate::period::format_date_numeric;
use crate::store::SqliteStore;
use crate::utils::{date_or_today, period_arg, required};
use anyhow::{Result, bail};
use rusqlite::Connection;
use serde_json::json;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export(conn, cfg, sub, write_transactions),
        Some(("report", sub)) => export(conn, cfg, sub, write_report),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Csv,
    Json,
}

impl Format {
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "json" => Ok(Format::Json),
            other => bail!("Unknown format: {} (use csv|json)", other),
        }
    }
}

type WriteFn = fn(&Report, Format, &str) -> Result<()>;

fn export(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches, write: WriteFn) -> Result<()> {
    // Validate the format before touching the store or the output file.
    let fmt = Format::parse(required(sub, "format")?)?;
    let out = required(sub, "out")?;
    let owner = cfg.require_owner()?;
    let period = period_arg(sub)?;
    let reference = date_or_today(sub, cfg)?;
    let report = build_report(&SqliteStore::new(conn), owner, &cfg.event, reference, period)?;
    write(&report, fmt, out)?;
    println!(
        "Exported {} ({}) to {}",
        report.label,
        report.aggregation.period.local_name(),
        out
    );
    Ok(())
}

/// One row per transaction: `Tanggal,Keterangan,Kategori,Jenis,Jumlah`.
pub fn write_transactions(report: &Report, fmt: Format, out: &str) -> Result<()> {
    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["Tanggal", "Keterangan", "Kategori", "Jenis", "Jumlah"])?;
            for t in &report.transactions {
                wtr.write_record([
                    format_date_numeric(t.date),
                    t.description.clone(),
                    t.display_category().to_string(),
                    t.kind.label().to_string(),
                    t.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        Format::Json => {
            let items: Vec<_> = report
                .transactions
                .iter()
                .map(|t| {
                    json!({
                        "date": t.date,
                        "description": t.description,
                        "category": t.category,
                        "kind": t.kind,
                        "amount": t.amount,
                        "receipt_no": t.receipt_no,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
    }
    Ok(())
}

/// One row per bucket, then a total row and the balance in words.
pub fn write_report(report: &Report, fmt: Format, out: &str) -> Result<()> {
    let agg = &report.aggregation;
    match fmt {
        Format::Csv => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["Periode", "Pemasukan", "Pengeluaran", "Saldo"])?;
            for b in &agg.buckets {
                wtr.write_record([
                    b.label.clone(),
                    b.income.to_string(),
                    b.expense.to_string(),
                    b.balance().to_string(),
                ])?;
            }
            wtr.write_record([
                "Total".to_string(),
                agg.total_income.to_string(),
                agg.total_expense.to_string(),
                agg.balance.to_string(),
            ])?;
            wtr.write_record(["Terbilang", report.balance_words.as_str(), "", ""])?;
            wtr.flush()?;
        }
        Format::Json => {
            std::fs::write(out, serde_json::to_string_pretty(report)?)?;
        }
    }
    Ok(())
}
