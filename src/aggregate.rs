// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Income/expense totals per period bucket.

use crate::error::MalformedRecord;
use crate::models::{RawRecord, Transaction, TransactionKind};
use crate::period::{bucket_key, BucketKey, PeriodKind};
use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub start: NaiveDate,
    pub label: String,
    pub income: i64,
    pub expense: i64,
}

impl Bucket {
    pub fn balance(&self) -> i64 {
        self.income.saturating_sub(self.expense)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    pub period: PeriodKind,
    /// Sorted chronologically by bucket start.
    pub buckets: Vec<Bucket>,
    pub total_income: i64,
    pub total_expense: i64,
    pub balance: i64,
    /// Malformed records left out of every sum.
    pub skipped: usize,
}

impl Aggregation {
    pub fn empty(period: PeriodKind) -> Self {
        Self {
            period,
            buckets: Vec::new(),
            total_income: 0,
            total_expense: 0,
            balance: 0,
            skipped: 0,
        }
    }

    pub fn bucket(&self, start: NaiveDate) -> Option<&Bucket> {
        self.buckets.iter().find(|b| b.start == start)
    }
}

/// Split raw rows into valid transactions and the reasons the rest were rejected.
pub fn validate(records: &[RawRecord]) -> (Vec<Transaction>, Vec<MalformedRecord>) {
    let mut valid = Vec::with_capacity(records.len());
    let mut rejected = Vec::new();
    for raw in records {
        match Transaction::try_from(raw) {
            Ok(t) => valid.push(t),
            Err(e) => rejected.push(e),
        }
    }
    (valid, rejected)
}

/// Aggregate raw store rows, skipping the malformed ones.
pub fn aggregate(records: &[RawRecord], period: PeriodKind) -> Aggregation {
    aggregate_records(records, period).0
}

/// Like [`aggregate`], also handing back the transactions that were counted.
pub fn aggregate_records(
    records: &[RawRecord],
    period: PeriodKind,
) -> (Aggregation, Vec<Transaction>) {
    let (valid, rejected) = validate(records);
    for e in &rejected {
        warn!("skipping malformed transaction: {}", e);
    }
    let mut agg = aggregate_transactions(&valid, period);
    agg.skipped = rejected.len();
    (agg, valid)
}

/// Aggregate already-validated transactions. Each one is bucketed by its own
/// date, independently of whatever range selected it. Sums saturate at the
/// `i64` bounds.
pub fn aggregate_transactions(transactions: &[Transaction], period: PeriodKind) -> Aggregation {
    let mut map: BTreeMap<BucketKey, (i64, i64)> = BTreeMap::new();
    let mut total_income = 0i64;
    let mut total_expense = 0i64;

    for t in transactions {
        let entry = map.entry(bucket_key(t.date, period)).or_insert((0, 0));
        match t.kind {
            TransactionKind::Income => {
                entry.0 = entry.0.saturating_add(t.amount);
                total_income = total_income.saturating_add(t.amount);
            }
            TransactionKind::Expense => {
                entry.1 = entry.1.saturating_add(t.amount);
                total_expense = total_expense.saturating_add(t.amount);
            }
        }
    }

    let buckets = map
        .into_iter()
        .map(|(key, (income, expense))| Bucket {
            start: key.start,
            label: key.label,
            income,
            expense,
        })
        .collect();

    Aggregation {
        period,
        buckets,
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        skipped: 0,
    }
}
