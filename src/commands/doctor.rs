// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::validate;
use crate::config::Config;
use crate::store::{OWNER_DATE_INDEX, SqliteStore, TransactionStore};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config) -> Result<()> {
    let rows = check(conn, cfg)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// Problems that make reports drop records or run without the index.
pub fn check(conn: &Connection, cfg: &Config) -> Result<Vec<Vec<String>>> {
    let store = SqliteStore::new(conn);
    let mut rows = Vec::new();

    // 1) Compound queries need the owner/date index
    if !store.has_owner_date_index()? {
        rows.push(vec!["missing_index".into(), OWNER_DATE_INDEX.to_string()]);
    }

    // 2) Rows nobody can read
    let orphans: i64 = conn.query_row(
        "SELECT COUNT(*) FROM transactions WHERE owner IS NULL OR owner = ''",
        [],
        |r| r.get(0),
    )?;
    if orphans > 0 {
        rows.push(vec!["no_owner".into(), format!("{} record(s)", orphans)]);
    }

    // 3) Rows reports would skip
    if let Some(owner) = cfg.owner.as_deref() {
        let (_, rejected) = validate(&store.scan_owner(owner)?);
        for e in rejected {
            rows.push(vec!["malformed".into(), e.to_string()]);
        }
    }

    // 4) Team receipts whose income was never booked
    let mut stmt = conn.prepare(
        "SELECT r.number FROM receipts r
         WHERE r.kind='team'
           AND NOT EXISTS (SELECT 1 FROM transactions t WHERE t.receipt_id = r.id)
         ORDER BY r.number",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let number: String = r.get(0)?;
        rows.push(vec!["receipt_without_income".into(), number]);
    }
    Ok(rows)
}
