// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::{NewTransaction, REGISTRATION_CATEGORY, Receipt, ReceiptKind, TransactionKind};
use crate::period::format_date_short;
use crate::store::{SqliteStore, TransactionStore};
use crate::terbilang::terbilang_rupiah;
use crate::utils::{
    date_or_today, fmt_rupiah, maybe_print_json, optional, parse_amount, pretty_table, required,
};
use anyhow::{Context, Result, anyhow, bail};
use chrono::{Datelike, NaiveDate};
use log::info;
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fmt::Write as _;

const REFEREE_SEQ_START: i64 = 100;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let owner = cfg.require_owner()?;
            let description = optional(sub, "description")
                .unwrap_or_else(|| format!("Pendaftaran {}", cfg.event));
            let receipt = add_team_receipt(
                conn,
                owner,
                required(sub, "team")?,
                parse_amount(required(sub, "amount")?)?,
                date_or_today(sub, cfg)?,
                &description,
            )?;
            println!("{}", render_receipt(&receipt, &cfg.event)?);
        }
        Some(("referee", sub)) => {
            let owner = cfg.require_owner()?;
            let receipt = add_referee_receipt(
                conn,
                owner,
                required(sub, "name")?,
                parse_amount(required(sub, "amount")?)?,
                date_or_today(sub, cfg)?,
            )?;
            println!("{}", render_receipt(&receipt, &cfg.event)?);
        }
        Some(("list", sub)) => {
            let owner = cfg.require_owner()?;
            let kind = sub
                .get_one::<String>("kind")
                .map(|k| ReceiptKind::parse(k).ok_or_else(|| anyhow!("Invalid receipt kind '{}'", k)))
                .transpose()?;
            let mut data = list_receipts(conn, owner, kind)?;
            if let Some(q) = optional(sub, "search") {
                let needle = q.to_lowercase();
                data.retain(|r| {
                    r.name.to_lowercase().contains(&needle)
                        || r.number.to_lowercase().contains(&needle)
                        || fmt_rupiah(r.amount).contains(&q)
                });
            }
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
                let rows = data
                    .into_iter()
                    .map(|r| {
                        vec![
                            r.number,
                            r.date.to_string(),
                            r.name,
                            fmt_rupiah(r.amount),
                            r.description,
                        ]
                    })
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Nomor", "Tanggal", "Nama", "Nominal", "Keterangan"], rows)
                );
            }
        }
        Some(("show", sub)) => {
            let owner = cfg.require_owner()?;
            let number = required(sub, "number")?;
            let receipt = find_receipt(conn, owner, number)?
                .ok_or_else(|| anyhow!("Receipt '{}' not found", number))?;
            println!("{}", render_receipt(&receipt, &cfg.event)?);
        }
        _ => {}
    }
    Ok(())
}

/// Next free number: `KRTCUP-YYMMDD-NNN` per day for team receipts,
/// `W-NNN/KARTACUP/YYYY` per year for referee receipts.
pub fn next_number(conn: &Connection, kind: ReceiptKind, date: NaiveDate) -> Result<String> {
    match kind {
        ReceiptKind::Team => {
            let prefix = format!("KRTCUP-{}-", date.format("%y%m%d"));
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM receipts WHERE kind='team' AND number LIKE ?1 || '%'",
                params![prefix],
                |r| r.get(0),
            )?;
            Ok(format!("{}{:03}", prefix, n + 1))
        }
        ReceiptKind::Referee => {
            let year = date.year().to_string();
            let n: i64 = conn.query_row(
                "SELECT COUNT(*) FROM receipts WHERE kind='referee' AND substr(date,1,4)=?1",
                params![year],
                |r| r.get(0),
            )?;
            Ok(format!("W-{}/KARTACUP/{}", REFEREE_SEQ_START + n, year))
        }
    }
}

/// Store a registration receipt and the matching income, atomically.
pub fn add_team_receipt(
    conn: &Connection,
    owner: &str,
    team: &str,
    amount: i64,
    date: NaiveDate,
    description: &str,
) -> Result<Receipt> {
    let team = team.trim();
    if team.is_empty() {
        bail!("Team name must not be empty");
    }
    let tx = conn.unchecked_transaction()?;
    let receipt = insert_receipt(&tx, ReceiptKind::Team, owner, team, amount, date, description)?;
    SqliteStore::new(&tx).insert(&NewTransaction {
        date,
        description: format!("Pendaftaran: {}", team),
        category: Some(REGISTRATION_CATEGORY.to_string()),
        kind: TransactionKind::Income,
        amount,
        owner: owner.to_string(),
        receipt_no: Some(receipt.number.clone()),
        receipt_id: Some(receipt.id),
    })?;
    tx.commit()?;
    Ok(receipt)
}

pub fn add_referee_receipt(
    conn: &Connection,
    owner: &str,
    referee: &str,
    amount: i64,
    date: NaiveDate,
) -> Result<Receipt> {
    let referee = referee.trim();
    if referee.is_empty() {
        bail!("Referee name must not be empty");
    }
    insert_receipt(conn, ReceiptKind::Referee, owner, referee, amount, date, "Honor wasit")
}

fn insert_receipt(
    conn: &Connection,
    kind: ReceiptKind,
    owner: &str,
    name: &str,
    amount: i64,
    date: NaiveDate,
    description: &str,
) -> Result<Receipt> {
    if amount <= 0 {
        bail!("Amount must be a positive number");
    }
    let number = next_number(conn, kind, date)?;
    conn.execute(
        "INSERT INTO receipts(number, kind, date, name, amount, description, owner)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![number, kind.as_str(), date, name, amount, description, owner],
    )
    .with_context(|| format!("Failed to store receipt {}", number))?;
    let id = conn.last_insert_rowid();
    info!("receipt {} for {} ({})", number, name, amount);
    Ok(Receipt {
        id,
        number,
        kind,
        date,
        name: name.to_string(),
        amount,
        description: description.to_string(),
        owner: owner.to_string(),
    })
}

const RECEIPT_COLUMNS: &str = "id, number, kind, date, name, amount, description, owner";

fn receipt_from_row(r: &Row<'_>) -> rusqlite::Result<Receipt> {
    let kind: String = r.get(2)?;
    let kind = ReceiptKind::parse(&kind).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("unknown receipt kind '{}'", kind).into(),
        )
    })?;
    Ok(Receipt {
        id: r.get(0)?,
        number: r.get(1)?,
        kind,
        date: r.get(3)?,
        name: r.get(4)?,
        amount: r.get(5)?,
        description: r.get(6)?,
        owner: r.get(7)?,
    })
}

pub fn list_receipts(
    conn: &Connection,
    owner: &str,
    kind: Option<ReceiptKind>,
) -> Result<Vec<Receipt>> {
    let sql = format!(
        "SELECT {} FROM receipts WHERE owner=?1 AND (?2 IS NULL OR kind=?2) ORDER BY date DESC, id DESC",
        RECEIPT_COLUMNS
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params![owner, kind.map(|k| k.as_str())], receipt_from_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn find_receipt(conn: &Connection, owner: &str, number: &str) -> Result<Option<Receipt>> {
    let sql = format!(
        "SELECT {} FROM receipts WHERE owner=?1 AND number=?2",
        RECEIPT_COLUMNS
    );
    let r = conn
        .query_row(&sql, params![owner, number.trim()], receipt_from_row)
        .optional()?;
    Ok(r)
}

/// Plain-text receipt, amount spelled out in words.
pub fn render_receipt(r: &Receipt, event: &str) -> Result<String> {
    let words = terbilang_rupiah(r.amount)?;
    let rule = "=".repeat(56);
    let mut out = String::new();
    writeln!(out, "{}", rule)?;
    writeln!(out, "{:<36}{:>20}", r.kind.title(), event)?;
    writeln!(out, "No: {}", r.number)?;
    writeln!(out, "{}", "-".repeat(56))?;
    writeln!(out, "Tanggal          : {}", format_date_short(r.date))?;
    match r.kind {
        ReceiptKind::Team => {
            writeln!(out, "Telah terima dari: {}", r.name)?;
            writeln!(out, "Uang sejumlah    : {}", fmt_rupiah(r.amount))?;
            writeln!(out, "Untuk pembayaran : {}", r.description)?;
        }
        ReceiptKind::Referee => {
            writeln!(out, "Diterima oleh    : {}", r.name)?;
            writeln!(out, "Jumlah           : {}", fmt_rupiah(r.amount))?;
            writeln!(out, "Keperluan        : {}", r.description)?;
        }
    }
    writeln!(out, "Terbilang        : {}", words)?;
    write!(out, "{}", rule)?;
    Ok(out)
}
