// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::TransactionKind;
use crate::utils::{kind_arg, pretty_table};
use anyhow::Result;
use rusqlite::{Connection, params};

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    if let Some(("list", sub)) = m.subcommand() {
        let kinds = match kind_arg(sub)? {
            Some(k) => vec![k],
            None => vec![TransactionKind::Income, TransactionKind::Expense],
        };
        let mut data = Vec::new();
        for kind in kinds {
            for name in kind_categories(conn, cfg.owner.as_deref(), kind)? {
                data.push(vec![kind.label().to_string(), name]);
            }
        }
        println!("{}", pretty_table(&["Jenis", "Kategori"], data));
    }
    Ok(())
}

/// Suggested vocabulary for `kind`, followed by any other category the owner
/// has already used for it.
pub fn kind_categories(
    conn: &Connection,
    owner: Option<&str>,
    kind: TransactionKind,
) -> Result<Vec<String>> {
    let mut names: Vec<String> = kind
        .suggested_categories()
        .iter()
        .map(|s| s.to_string())
        .collect();
    if let Some(owner) = owner {
        let mut stmt = conn.prepare(
            "SELECT DISTINCT category FROM transactions
             WHERE owner=?1 AND kind=?2 AND category IS NOT NULL AND category != ''
             ORDER BY category",
        )?;
        let rows = stmt.query_map(params![owner, kind.as_str()], |r| r.get::<_, String>(0))?;
        for row in rows {
            let name = row?;
            if !names.iter().any(|n| n.eq_ignore_ascii_case(&name)) {
                names.push(name);
            }
        }
    }
    Ok(names)
}
