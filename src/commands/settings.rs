// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, set_setting};
use crate::utils::{pretty_table, required};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let key = required(sub, "key")?;
            let value = required(sub, "value")?;
            set_setting(conn, key, value)?;
            println!("Set {} = {}", key, value.trim());
        }
        _ => {
            let rows = vec![
                vec!["timezone".to_string(), cfg.timezone.clone()],
                vec!["owner".to_string(), cfg.owner.clone().unwrap_or_default()],
                vec!["event".to_string(), cfg.event.clone()],
                vec!["today".to_string(), cfg.today().to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
    }
    Ok(())
}
