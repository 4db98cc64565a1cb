// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukukas::commands::reports::{balance_in_words, build_report};
use bukukas::db::init_schema;
use bukukas::period::PeriodKind;
use bukukas::store::SqliteStore;
use chrono::NaiveDate;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    let rows = [
        (Some("2025-01-05"), Some("income"), Some(500_000)),
        (Some("2025-01-06"), Some("expense"), Some(200_000)),
        (Some("2025-01-06"), Some("income"), Some(100_000)),
        (Some("2025-01-06"), None, Some(70_000)),
        (None, Some("income"), Some(1_000)),
        (Some("2025-02-01"), Some("expense"), Some(50_000)),
    ];
    for (date, kind, amount) in rows {
        conn.execute(
            "INSERT INTO transactions(date, description, kind, amount, owner) VALUES (?1, 'x', ?2, ?3, 'u1')",
            params![date, kind, amount],
        )
        .unwrap();
    }
    conn
}

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

#[test]
fn daily_report_for_reference_date() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let r = build_report(&store, "u1", "KARTA CUP V", d(2025, 1, 6), PeriodKind::Day).unwrap();
    assert_eq!(r.label, "Senin, 6 Januari 2025");
    assert_eq!(r.aggregation.total_income, 100_000);
    assert_eq!(r.aggregation.total_expense, 200_000);
    assert_eq!(r.aggregation.balance, -100_000);
    assert_eq!(r.aggregation.skipped, 1);
    assert_eq!(r.balance_words, "Minus Seratus Ribu Rupiah");
    assert_eq!(r.transactions.len(), 2);
}

#[test]
fn all_period_report_has_no_range() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let r = build_report(&store, "u1", "KARTA CUP V", d(2025, 1, 6), PeriodKind::All).unwrap();
    assert!(r.range.is_none());
    assert_eq!(r.aggregation.total_income, 600_000);
    assert_eq!(r.aggregation.total_expense, 250_000);
    assert_eq!(r.aggregation.skipped, 2);
}

#[test]
fn report_survives_missing_index() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let before = build_report(&store, "u1", "E", d(2025, 1, 8), PeriodKind::Week).unwrap();
    conn.execute_batch("DROP INDEX idx_transactions_owner_date").unwrap();
    let after = build_report(&store, "u1", "E", d(2025, 1, 8), PeriodKind::Week).unwrap();
    assert_eq!(before.aggregation, after.aggregation);
    assert_eq!(after.aggregation.buckets.len(), 1);
    assert_eq!(after.aggregation.balance, 400_000);
}

#[test]
fn unknown_owner_gets_zero_report() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let r = build_report(&store, "nobody", "E", d(2025, 1, 6), PeriodKind::Month).unwrap();
    assert!(r.aggregation.buckets.is_empty());
    assert_eq!(r.aggregation.balance, 0);
    assert_eq!(r.balance_words, "Nol Rupiah");
}

#[test]
fn balance_words_sign() {
    assert_eq!(balance_in_words(400_000).unwrap(), "Empat Ratus Ribu Rupiah");
    assert_eq!(balance_in_words(-1_000).unwrap(), "Minus Seribu Rupiah");
    assert!(balance_in_words(i64::MIN).is_err());
}

#[test]
fn row_with_text_amount_is_skipped() {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    conn.execute_batch(
        r#"
        INSERT INTO transactions(date, kind, amount, owner) VALUES ('2025-01-06', 'income', 500000, 'u1');
        INSERT INTO transactions(date, kind, amount, owner) VALUES ('2025-01-06', 'income', 'lima ribu', 'u1');
        "#,
    )
    .unwrap();
    let store = SqliteStore::new(&conn);
    let r = build_report(&store, "u1", "E", d(2025, 1, 6), PeriodKind::Day).unwrap();
    assert_eq!(r.aggregation.total_income, 500_000);
    assert_eq!(r.aggregation.skipped, 1);
    assert_eq!(r.transactions.len(), 1);
}

#[test]
fn unspellable_balance_leaves_words_empty() {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    for _ in 0..2 {
        conn.execute(
            "INSERT INTO transactions(date, kind, amount, owner) VALUES ('2025-01-06', 'income', ?1, 'u1')",
            params![999_999_999_999_999i64],
        )
        .unwrap();
    }
    let store = SqliteStore::new(&conn);
    let r = build_report(&store, "u1", "E", d(2025, 1, 6), PeriodKind::Day).unwrap();
    assert_eq!(r.aggregation.balance, 1_999_999_999_999_998);
    assert!(r.balance_words.is_empty());
}
