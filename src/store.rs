// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Access to stored transactions.
//!
//! The compound query (owner + kind + date range, newest first) only runs on
//! the owner/date index. When that index is missing the store refuses the
//! query and [`fetch_transactions`] falls back to an owner-only scan with the
//! remaining filters applied here.

use crate::error::StoreError;
use crate::models::{NewTransaction, RawRecord, TransactionKind};
use crate::period::DateRange;
use log::{debug, info, warn};
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, ErrorCode, Row};

pub const OWNER_DATE_INDEX: &str = "idx_transactions_owner_date";

const COLUMNS: &str = "id, date, description, category, kind, amount, owner, receipt_no";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub owner: String,
    pub kind: Option<TransactionKind>,
    pub range: DateRange,
}

impl TransactionQuery {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            kind: None,
            range: DateRange::UNBOUNDED,
        }
    }

    pub fn with_kind(mut self, kind: Option<TransactionKind>) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_range(mut self, range: DateRange) -> Self {
        self.range = range;
        self
    }

    /// Same predicate the indexed query applies, evaluated on a fetched row.
    pub fn matches(&self, raw: &RawRecord) -> bool {
        if raw.owner.as_deref() != Some(self.owner.as_str()) {
            return false;
        }
        if let Some(kind) = self.kind {
            let stored = raw.kind.as_deref().and_then(TransactionKind::parse);
            if stored != Some(kind) {
                return false;
            }
        }
        if self.range.is_unbounded() {
            return true;
        }
        let (start, end) = self.range.as_strings();
        match raw.date.as_deref() {
            Some(d) => d >= start.as_str() && d <= end.as_str(),
            None => false,
        }
    }
}

pub trait TransactionStore {
    /// Append a record and return its id.
    fn insert(&self, tx: &NewTransaction) -> Result<i64, StoreError>;

    /// Indexed compound query, newest first.
    fn find(&self, query: &TransactionQuery) -> Result<Vec<RawRecord>, StoreError>;

    /// Every record of one owner, unordered, no index required.
    fn scan_owner(&self, owner: &str) -> Result<Vec<RawRecord>, StoreError>;
}

/// Fetch the records matching `query`, retrying without the index if needed.
pub fn fetch_transactions<S: TransactionStore + ?Sized>(
    store: &S,
    query: &TransactionQuery,
) -> Result<Vec<RawRecord>, StoreError> {
    match store.find(query) {
        Err(StoreError::IndexUnavailable { index }) => {
            warn!(
                "index {} unavailable, filtering {}'s records client-side",
                index, query.owner
            );
            let mut rows: Vec<RawRecord> = store
                .scan_owner(&query.owner)?
                .into_iter()
                .filter(|r| query.matches(r))
                .collect();
            sort_newest_first(&mut rows);
            Ok(rows)
        }
        other => other,
    }
}

/// Date descending, then id descending; rows without a date go last.
pub fn sort_newest_first(rows: &mut [RawRecord]) {
    rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
}

pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn has_owner_date_index(&self) -> Result<bool, StoreError> {
        let n: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name=?1",
                params![OWNER_DATE_INDEX],
                |r| r.get(0),
            )
            .map_err(classify)?;
        Ok(n > 0)
    }
}

impl TransactionStore for SqliteStore<'_> {
    fn insert(&self, tx: &NewTransaction) -> Result<i64, StoreError> {
        self.conn
            .execute(
                "INSERT INTO transactions(date, description, category, kind, amount, owner, receipt_no, receipt_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    tx.date.format("%Y-%m-%d").to_string(),
                    tx.description,
                    tx.category,
                    tx.kind.as_str(),
                    tx.amount,
                    tx.owner,
                    tx.receipt_no,
                    tx.receipt_id
                ],
            )
            .map_err(classify)?;
        let id = self.conn.last_insert_rowid();
        info!("recorded {} #{} of {} on {}", tx.kind.as_str(), id, tx.amount, tx.date);
        Ok(id)
    }

    fn find(&self, query: &TransactionQuery) -> Result<Vec<RawRecord>, StoreError> {
        let mut sql = format!(
            "SELECT {} FROM transactions INDEXED BY {} WHERE owner=?",
            COLUMNS, OWNER_DATE_INDEX
        );
        let mut args: Vec<String> = vec![query.owner.clone()];
        if let Some(kind) = query.kind {
            // Same spellings `TransactionKind::parse` accepts.
            let names = kind.stored_names();
            sql.push_str(&format!(
                " AND lower(trim(kind, char(32, 9, 10, 12, 13))) IN ({})",
                vec!["?"; names.len()].join(", ")
            ));
            args.extend(names.iter().map(|n| n.to_string()));
        }
        if !query.range.is_unbounded() {
            let (start, end) = query.range.as_strings();
            sql.push_str(" AND date>=? AND date<=?");
            args.push(start);
            args.push(end);
        }
        sql.push_str(" ORDER BY date DESC, id DESC");
        debug!("find: {} {:?}", sql, args);

        let mut stmt = self.conn.prepare(&sql).map_err(classify)?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(args.iter()), raw_from_row)
            .map_err(classify)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(classify)
    }

    fn scan_owner(&self, owner: &str) -> Result<Vec<RawRecord>, StoreError> {
        let sql = format!("SELECT {} FROM transactions NOT INDEXED WHERE owner=?1", COLUMNS);
        debug!("scan_owner: {}", sql);
        let mut stmt = self.conn.prepare(&sql).map_err(classify)?;
        let rows = stmt
            .query_map(params![owner], raw_from_row)
            .map_err(classify)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(classify)
    }
}

// Columns are read loosely: a value of the wrong type becomes `None` (or its
// text form) so validation rejects that one row instead of the whole fetch.
fn raw_from_row(r: &Row<'_>) -> rusqlite::Result<RawRecord> {
    Ok(RawRecord {
        id: r.get(0)?,
        date: text_column(r, 1)?,
        description: text_column(r, 2)?,
        category: text_column(r, 3)?,
        kind: text_column(r, 4)?,
        amount: integer_column(r, 5)?,
        owner: text_column(r, 6)?,
        receipt_no: text_column(r, 7)?,
    })
}

fn text_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<String>> {
    Ok(match r.get_ref(idx)? {
        ValueRef::Text(b) => Some(String::from_utf8_lossy(b).into_owned()),
        ValueRef::Integer(n) => Some(n.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Null | ValueRef::Blob(_) => None,
    })
}

fn integer_column(r: &Row<'_>, idx: usize) -> rusqlite::Result<Option<i64>> {
    Ok(match r.get_ref(idx)? {
        ValueRef::Integer(n) => Some(n),
        ValueRef::Real(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(f as i64),
        _ => None,
    })
}

/// Map a SQLite failure onto the store error kinds callers act on.
pub fn classify(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(code, msg) = &err {
        if msg.as_deref().is_some_and(|m| m.contains("no such index")) {
            return StoreError::IndexUnavailable {
                index: OWNER_DATE_INDEX.to_string(),
            };
        }
        match code.code {
            ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::CannotOpen => {
                return StoreError::Unavailable(err.to_string());
            }
            ErrorCode::ReadOnly
            | ErrorCode::PermissionDenied
            | ErrorCode::AuthorizationForStatementDenied => {
                return StoreError::PermissionDenied(err.to_string());
            }
            _ => {}
        }
    }
    StoreError::Sqlite(err)
}
