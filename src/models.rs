// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::MalformedRecord;
use crate::terbilang;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const OTHER_CATEGORY: &str = "lainnya";
pub const REGISTRATION_CATEGORY: &str = "Pendaftaran Tim";

pub const INCOME_CATEGORIES: &[&str] = &[
    REGISTRATION_CATEGORY,
    "sponsor",
    "donasi",
    "kopi",
    "tiket dan parkir",
    "iuran warung",
    "kartu merah dan kuning",
    OTHER_CATEGORY,
];

pub const EXPENSE_CATEGORIES: &[&str] = &[
    "beli kopi",
    "operasional",
    "perlengkapan",
    "konsumsi",
    "transportasi",
    "izin keramaian",
    "keamanan harian",
    "bayar wasit",
    "bayar warung",
    "bayar anak gawang",
    OTHER_CATEGORY,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    /// Indonesian label used on reports and exports.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Pemasukan",
            TransactionKind::Expense => "Pengeluaran",
        }
    }

    /// Lowercase spellings a stored `kind` may carry for this kind.
    pub fn stored_names(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => &["income", "pemasukan"],
            TransactionKind::Expense => &["expense", "pengeluaran"],
        }
    }

    /// Accepts the stored literals and their Indonesian names, ignoring ASCII
    /// case and surrounding ASCII whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s
            .trim_matches(|c: char| c.is_ascii_whitespace())
            .to_ascii_lowercase();
        [TransactionKind::Income, TransactionKind::Expense]
            .into_iter()
            .find(|k| k.stored_names().contains(&s.as_str()))
    }

    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            TransactionKind::Income => INCOME_CATEGORIES,
            TransactionKind::Expense => EXPENSE_CATEGORIES,
        }
    }
}

/// A transaction row exactly as the store returned it. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub id: i64,
    pub date: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub kind: Option<String>,
    pub amount: Option<i64>,
    pub owner: Option<String>,
    pub receipt_no: Option<String>,
}

/// A validated transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    pub description: String,
    pub category: Option<String>,
    pub kind: TransactionKind,
    pub amount: i64,
    pub owner: String,
    pub receipt_no: Option<String>,
}

impl TryFrom<&RawRecord> for Transaction {
    type Error = MalformedRecord;

    fn try_from(raw: &RawRecord) -> Result<Self, Self::Error> {
        let id = raw.id;
        let date_s = raw
            .date
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(MalformedRecord::MissingDate { id })?;
        let date = NaiveDate::parse_from_str(date_s.trim(), "%Y-%m-%d").map_err(|_| {
            MalformedRecord::InvalidDate {
                id,
                value: date_s.to_string(),
            }
        })?;
        let amount = raw.amount.ok_or(MalformedRecord::MissingAmount { id })?;
        if amount <= 0 {
            return Err(MalformedRecord::NonPositiveAmount { id, value: amount });
        }
        if amount as u64 >= terbilang::LIMIT {
            return Err(MalformedRecord::AmountTooLarge { id, value: amount });
        }
        let kind_s = raw
            .kind
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .ok_or(MalformedRecord::MissingKind { id })?;
        let kind = TransactionKind::parse(kind_s).ok_or_else(|| MalformedRecord::UnknownKind {
            id,
            value: kind_s.to_string(),
        })?;
        Ok(Transaction {
            id,
            date,
            description: raw.description.clone().unwrap_or_default(),
            category: raw.category.clone().filter(|c| !c.is_empty()),
            kind,
            amount,
            owner: raw.owner.clone().unwrap_or_default(),
            receipt_no: raw.receipt_no.clone(),
        })
    }
}

impl Transaction {
    /// Category to display; falls back to "Umum" when none was recorded.
    pub fn display_category(&self) -> &str {
        self.category.as_deref().unwrap_or("Umum")
    }
}

/// Fields supplied when appending a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: Option<String>,
    pub kind: TransactionKind,
    pub amount: i64,
    pub owner: String,
    pub receipt_no: Option<String>,
    pub receipt_id: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptKind {
    /// Team registration receipt (kwitansi).
    Team,
    /// Referee payment receipt (tanda terima wasit).
    Referee,
}

impl ReceiptKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReceiptKind::Team => "team",
            ReceiptKind::Referee => "referee",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "team" => Some(ReceiptKind::Team),
            "referee" => Some(ReceiptKind::Referee),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ReceiptKind::Team => "KWITANSI PEMBAYARAN",
            ReceiptKind::Referee => "TANDA TERIMA",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: i64,
    pub number: String,
    pub kind: ReceiptKind,
    pub date: NaiveDate,
    /// Paying team, or the referee being paid.
    pub name: String,
    pub amount: i64,
    pub description: String,
    pub owner: String,
}
