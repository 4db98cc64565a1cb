// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use bukukas::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let conn = db::open_or_init()?;
    let owner = matches.get_one::<String>("owner").map(|s| s.as_str());
    let cfg = Config::load(&conn)?.with_owner(owner);

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", db::db_path()?.display());
        }
        Some(("config", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&conn, &cfg, sub)?,
        Some(("category", sub)) => commands::categories::handle(&conn, &cfg, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, &cfg, sub)?,
        Some(("receipt", sub)) => commands::receipts::handle(&conn, &cfg, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, &cfg, sub)?,
        Some(("terbilang", sub)) => commands::terbilang::handle(sub)?,
        Some(("doctor", _)) => commands::doctor::handle(&conn, &cfg)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
