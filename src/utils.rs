// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::TransactionKind;
use crate::period::PeriodKind;
use crate::terbilang;
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Parse a Rupiah amount as typed by a cashier: "25000", "25.000", "Rp 25.000".
/// Only digits count; the result must be positive and small enough to spell.
pub fn parse_amount(s: &str) -> Result<i64> {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        bail!("Invalid amount '{}'", s);
    }
    let n = digits
        .parse::<i64>()
        .with_context(|| format!("Amount '{}' is too large", s))?;
    if n <= 0 {
        bail!("Amount must be a positive number, got '{}'", s);
    }
    if n as u64 >= terbilang::LIMIT {
        bail!("Amount '{}' is too large", s);
    }
    Ok(n)
}

/// "Rp 1.500.000"
pub fn fmt_rupiah(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    if n < 0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // If v is an array, stream each element; else stream single line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// A string argument that clap guarantees or that the command cannot run without.
pub fn required<'a>(sub: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    sub.get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow!("Missing required argument --{}", name))
}

/// Optional trimmed, non-empty string argument.
pub fn optional(sub: &clap::ArgMatches, name: &str) -> Option<String> {
    sub.get_one::<String>(name)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// `--date`, or today in the configured timezone.
pub fn date_or_today(sub: &clap::ArgMatches, cfg: &Config) -> Result<NaiveDate> {
    match sub.get_one::<String>("date") {
        Some(s) => parse_date(s),
        None => Ok(cfg.today()),
    }
}

/// `--period`, defaulting to `all`.
pub fn period_arg(sub: &clap::ArgMatches) -> Result<PeriodKind> {
    match sub.get_one::<String>("period") {
        Some(s) => Ok(s.parse::<PeriodKind>()?),
        None => Ok(PeriodKind::All),
    }
}

/// `--kind income|expense`, if given.
pub fn kind_arg(sub: &clap::ArgMatches) -> Result<Option<TransactionKind>> {
    match sub.get_one::<String>("kind") {
        Some(s) => TransactionKind::parse(s)
            .map(Some)
            .ok_or_else(|| anyhow!("Invalid kind '{}' (use income|expense)", s)),
        None => Ok(None),
    }
}
