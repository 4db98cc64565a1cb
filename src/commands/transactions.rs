// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::validate;
use crate::config::Config;
use crate::models::{
    NewTransaction, OTHER_CATEGORY, REGISTRATION_CATEGORY, Transaction, TransactionKind,
};
use crate::period::resolve;
use crate::store::{SqliteStore, TransactionQuery, TransactionStore, fetch_transactions};
use crate::utils::{
    date_or_today, fmt_rupiah, kind_arg, maybe_print_json, optional, parse_amount, period_arg,
    pretty_table, required,
};
use anyhow::{Result, anyhow, bail};
use chrono::NaiveDate;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, cfg, sub)?,
        Some(("list", sub)) => list(conn, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let owner = cfg.require_owner()?;
    let kind = kind_arg(sub)?.ok_or_else(|| anyhow!("Missing required argument --kind"))?;
    let new = prepare(
        kind,
        required(sub, "category")?,
        optional(sub, "description"),
        parse_amount(required(sub, "amount")?)?,
        date_or_today(sub, cfg)?,
        owner,
    )?;
    let id = SqliteStore::new(conn).insert(&new)?;
    println!(
        "Recorded {} #{}: {} on {} ({})",
        new.kind.label(),
        id,
        fmt_rupiah(new.amount),
        new.date,
        new.description
    );
    Ok(())
}

/// Apply the entry-form rules: the description defaults to the category,
/// "lainnya" needs its own description, and income described as
/// "pendaftaran: ..." is filed under team registration.
pub fn prepare(
    kind: TransactionKind,
    category: &str,
    description: Option<String>,
    amount: i64,
    date: NaiveDate,
    owner: &str,
) -> Result<NewTransaction> {
    let category = category.trim();
    if category.is_empty() {
        bail!("Category must not be empty");
    }
    if amount <= 0 {
        bail!("Amount must be a positive number");
    }
    let description = if category.eq_ignore_ascii_case(OTHER_CATEGORY) {
        description.ok_or_else(|| anyhow!("Category '{}' needs a --description", OTHER_CATEGORY))?
    } else {
        description.unwrap_or_else(|| category.to_string())
    };
    let category = if kind == TransactionKind::Income
        && description.to_lowercase().contains("pendaftaran:")
    {
        REGISTRATION_CATEGORY.to_string()
    } else {
        category.to_string()
    };
    Ok(NewTransaction {
        date,
        description,
        category: Some(category),
        kind,
        amount,
        owner: owner.to_string(),
        receipt_no: None,
        receipt_id: None,
    })
}

fn list(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(conn, cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.date.to_string(),
                    t.description.clone(),
                    t.display_category().to_string(),
                    t.kind.label().to_string(),
                    fmt_rupiah(t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Tanggal", "Keterangan", "Kategori", "Jenis", "Jumlah"],
                rows,
            )
        );
    }
    Ok(())
}

/// Transactions selected by `--period/--date/--kind/--search/--limit`, newest first.
pub fn query_rows(
    conn: &Connection,
    cfg: &Config,
    sub: &clap::ArgMatches,
) -> Result<Vec<Transaction>> {
    let owner = cfg.require_owner()?;
    let period = period_arg(sub)?;
    let range = resolve(date_or_today(sub, cfg)?, period);
    let query = TransactionQuery::new(owner)
        .with_kind(kind_arg(sub)?)
        .with_range(range);

    let raw = fetch_transactions(&SqliteStore::new(conn), &query)?;
    let (mut data, _) = validate(&raw);
    if let Some(q) = optional(sub, "search") {
        data.retain(|t| matches_search(t, &q));
    }
    if let Some(limit) = sub.get_one::<usize>("limit") {
        data.truncate(*limit);
    }
    Ok(data)
}

/// Case-insensitive match on description or category, or a substring of the
/// formatted amount.
pub fn matches_search(t: &Transaction, q: &str) -> bool {
    let needle = q.to_lowercase();
    t.description.to_lowercase().contains(&needle)
        || t
            .category
            .as_deref()
            .is_some_and(|c| c.to_lowercase().contains(&needle))
        || fmt_rupiah(t.amount).contains(q)
}
