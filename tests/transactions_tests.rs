// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use bukukas::config::Config;
use bukukas::db::init_schema;
use bukukas::models::{REGISTRATION_CATEGORY, TransactionKind};
use bukukas::{cli, commands::categories, commands::transactions};
use chrono::NaiveDate;
use rusqlite::{Connection, params};

fn setup() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    init_schema(&mut conn).unwrap();
    let rows = [
        ("2025-01-03", "Sponsor toko", "sponsor", "income", 300_000),
        ("2025-01-04", "Beli kopi", "beli kopi", "expense", 15_000),
        ("2025-01-05", "Pendaftaran: Garuda FC", REGISTRATION_CATEGORY, "income", 150_000),
        ("2025-01-06", "Bayar wasit final", "bayar wasit", "expense", 200_000),
    ];
    for (date, desc, cat, kind, amount) in rows {
        conn.execute(
            "INSERT INTO transactions(date, description, category, kind, amount, owner)
             VALUES (?1, ?2, ?3, ?4, ?5, 'u1')",
            params![date, desc, cat, kind, amount],
        )
        .unwrap();
    }
    conn
}

fn cfg() -> Config {
    Config::default().with_owner(Some("u1"))
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<bukukas::models::Transaction> {
    let mut argv = vec!["bukukas", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, &cfg(), list_m).unwrap();
        }
    }
    panic!("no tx list subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, NaiveDate::from_ymd_opt(2025, 1, 6).unwrap());
}

#[test]
fn list_by_week_and_kind() {
    let conn = setup();
    let rows = list_rows(&conn, &["--period", "week", "--date", "2025-01-06"]);
    assert_eq!(rows.len(), 2);
    let rows = list_rows(
        &conn,
        &["--period", "mingguan", "--date", "2025-01-04", "--kind", "expense"],
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, "Beli kopi");
}

#[test]
fn list_search_matches_description_category_and_amount() {
    let conn = setup();
    assert_eq!(list_rows(&conn, &["--search", "garuda"]).len(), 1);
    assert_eq!(list_rows(&conn, &["--search", "WASIT"]).len(), 1);
    assert_eq!(list_rows(&conn, &["--search", "300.000"]).len(), 1);
}

#[test]
fn list_requires_owner() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["bukukas", "tx", "list"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    let err = transactions::query_rows(&conn, &Config::default(), list_m).unwrap_err();
    assert!(err.to_string().contains("no authenticated owner"));
}

#[test]
fn add_through_cli() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "bukukas",
        "tx",
        "add",
        "--kind",
        "income",
        "--amount",
        "Rp 25.000",
        "--category",
        "kopi",
        "--date",
        "2025-01-07",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        transactions::handle(&conn, &cfg(), tx_m).unwrap();
    } else {
        panic!("no tx subcommand");
    }
    let (desc, amount): (String, i64) = conn
        .query_row(
            "SELECT description, amount FROM transactions WHERE date='2025-01-07'",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .unwrap();
    assert_eq!(desc, "kopi");
    assert_eq!(amount, 25_000);
}

#[test]
fn prepare_rules() {
    let date = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
    let t = transactions::prepare(
        TransactionKind::Income,
        "donasi",
        Some("Pendaftaran: Elang Muda".into()),
        150_000,
        date,
        "u1",
    )
    .unwrap();
    assert_eq!(t.category.as_deref(), Some(REGISTRATION_CATEGORY));

    let t = transactions::prepare(TransactionKind::Expense, "konsumsi", None, 5_000, date, "u1")
        .unwrap();
    assert_eq!(t.description, "konsumsi");

    assert!(
        transactions::prepare(TransactionKind::Expense, "lainnya", None, 5_000, date, "u1")
            .is_err()
    );
    assert!(transactions::prepare(TransactionKind::Expense, "  ", None, 5_000, date, "u1").is_err());
    assert!(transactions::prepare(TransactionKind::Expense, "kopi", None, 0, date, "u1").is_err());
}

#[test]
fn categories_include_used_ones() {
    let conn = setup();
    conn.execute(
        "INSERT INTO transactions(date, description, category, kind, amount, owner)
         VALUES ('2025-01-08', 'Sewa tenda', 'sewa tenda', 'expense', 80000, 'u1')",
        [],
    )
    .unwrap();
    let names = categories::kind_categories(&conn, Some("u1"), TransactionKind::Expense).unwrap();
    assert_eq!(names[0], "beli kopi");
    assert!(names.contains(&"sewa tenda".to_string()));
    assert_eq!(names.iter().filter(|n| *n == "beli kopi").count(), 1);

    let other = categories::kind_categories(&conn, Some("u2"), TransactionKind::Expense).unwrap();
    assert!(!other.contains(&"sewa tenda".to_string()));
}

#[test]
fn parse_amount_bounds() {
    use bukukas::utils::parse_amount;
    assert_eq!(parse_amount("Rp 1.500.000").unwrap(), 1_500_000);
    assert_eq!(parse_amount("999.999.999.999.999").unwrap(), 999_999_999_999_999);
    assert!(parse_amount("1.000.000.000.000.000").is_err());
    assert!(parse_amount("99999999999999999999").is_err());
    assert!(parse_amount("0").is_err());
    assert!(parse_amount("abc").is_err());
}
