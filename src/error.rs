// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures of the transaction store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The compound filter + sort query has no index to run on.
    #[error("query requires index '{index}' which is not available")]
    IndexUnavailable { index: String },
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("no authenticated owner; pass --owner or run `config set owner <id>`")]
    Unauthenticated,
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// Message shown to the cashier when a fetch fails.
    pub fn user_message(&self) -> &'static str {
        match self {
            StoreError::PermissionDenied(_) => "Anda tidak memiliki akses untuk melihat data ini",
            StoreError::IndexUnavailable { .. } => "Terjadi kesalahan pada pengaturan database",
            StoreError::Unavailable(_) => {
                "Koneksi ke server terputus. Periksa koneksi internet Anda"
            }
            StoreError::Unauthenticated => "Anda harus login terlebih dahulu untuk mengakses data",
            StoreError::Sqlite(_) => "Gagal memuat data. Silakan coba lagi nanti",
        }
    }
}

/// A stored record that cannot take part in aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalformedRecord {
    #[error("record {id}: missing date")]
    MissingDate { id: i64 },
    #[error("record {id}: invalid date '{value}'")]
    InvalidDate { id: i64, value: String },
    #[error("record {id}: missing amount")]
    MissingAmount { id: i64 },
    #[error("record {id}: amount {value} is not positive")]
    NonPositiveAmount { id: i64, value: i64 },
    #[error("record {id}: amount {value} is too large")]
    AmountTooLarge { id: i64, value: i64 },
    #[error("record {id}: missing kind")]
    MissingKind { id: i64 },
    #[error("record {id}: unknown kind '{value}'")]
    UnknownKind { id: i64, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TerbilangError {
    #[error("cannot spell negative amount {0}")]
    Negative(i64),
    #[error("amount {0} is too large to spell (limit is below 10^15)")]
    TooLarge(i64),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period kind '{0}' (use day|week|month|all)")]
pub struct InvalidPeriodKind(pub String);
