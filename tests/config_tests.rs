// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukukas::commands::doctor;
use bukukas::config::{Config, DEFAULT_EVENT, DEFAULT_TIMEZONE, get_setting, set_setting};
use bukukas::db::init_schema;
use bukukas::error::StoreError;
use rusqlite::Connection;

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    conn
}

#[test]
fn defaults_without_settings() {
    let conn = setup();
    let cfg = Config::load(&conn).unwrap();
    assert_eq!(cfg.timezone, DEFAULT_TIMEZONE);
    assert_eq!(cfg.event, DEFAULT_EVENT);
    assert_eq!(cfg.tz(), chrono_tz::Asia::Jakarta);
    assert!(matches!(cfg.require_owner(), Err(StoreError::Unauthenticated)));
}

#[test]
fn stored_settings_and_override() {
    let conn = setup();
    set_setting(&conn, "owner", " bendahara ").unwrap();
    set_setting(&conn, "timezone", "Asia/Makassar").unwrap();
    set_setting(&conn, "event", "KARTA CUP VI").unwrap();
    assert_eq!(get_setting(&conn, "owner").unwrap().as_deref(), Some("bendahara"));

    let cfg = Config::load(&conn).unwrap();
    assert_eq!(cfg.require_owner().unwrap(), "bendahara");
    assert_eq!(cfg.tz(), chrono_tz::Asia::Makassar);
    assert_eq!(cfg.event, "KARTA CUP VI");

    let cfg = cfg.with_owner(Some("ketua"));
    assert_eq!(cfg.require_owner().unwrap(), "ketua");
    let cfg = cfg.with_owner(Some("  "));
    assert_eq!(cfg.require_owner().unwrap(), "ketua");
}

#[test]
fn set_rejects_unknown_key_and_bad_timezone() {
    let conn = setup();
    assert!(set_setting(&conn, "currency", "IDR").is_err());
    assert!(set_setting(&conn, "timezone", "Mars/Olympus").is_err());
    assert!(get_setting(&conn, "timezone").unwrap().is_none());
}

#[test]
fn doctor_reports_problems() {
    let conn = setup();
    let cfg = Config::default().with_owner(Some("u1"));
    assert!(doctor::check(&conn, &cfg).unwrap().is_empty());

    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, kind, amount, owner) VALUES ('2025-01-06', 'income', 1000, 'u1');
        INSERT INTO transactions(date, kind, owner) VALUES ('2025-01-06', 'income', 'u1');
        INSERT INTO transactions(date, kind, amount) VALUES ('2025-01-06', 'income', 1000);
        INSERT INTO receipts(number, kind, date, name, amount, owner)
            VALUES ('KRTCUP-250106-001', 'team', '2025-01-06', 'A', 1000, 'u1');
        DROP INDEX idx_transactions_owner_date;
        "#,
    )
    .unwrap();

    let issues: Vec<String> = doctor::check(&conn, &cfg)
        .unwrap()
        .into_iter()
        .map(|r| r[0].clone())
        .collect();
    assert_eq!(
        issues,
        ["missing_index", "no_owner", "malformed", "receipt_without_income"]
    );
}
