// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Reporting periods: resolving a selection into a date range, and labelling
//! the bucket a single transaction date belongs to.
//!
//! Weeks start on Sunday. All arithmetic is on civil dates; "today" comes from
//! a [`Clock`] pinned to the tournament's timezone, never from the host clock.

use crate::error::InvalidPeriodKind;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Day,
    Week,
    Month,
    All,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Day => "day",
            PeriodKind::Week => "week",
            PeriodKind::Month => "month",
            PeriodKind::All => "all",
        }
    }

    /// Indonesian name, as typed by cashiers.
    pub fn local_name(&self) -> &'static str {
        match self {
            PeriodKind::Day => "harian",
            PeriodKind::Week => "mingguan",
            PeriodKind::Month => "bulanan",
            PeriodKind::All => "semua",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = InvalidPeriodKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "harian" => Ok(PeriodKind::Day),
            "week" | "mingguan" => Ok(PeriodKind::Week),
            "month" | "bulanan" => Ok(PeriodKind::Month),
            "all" | "semua" => Ok(PeriodKind::All),
            _ => Err(InvalidPeriodKind(s.to_string())),
        }
    }
}

/// Inclusive range of civil dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Wide-open range meaning "apply no date filter".
    pub const UNBOUNDED: DateRange = DateRange {
        start: NaiveDate::MIN,
        end: NaiveDate::MAX,
    };

    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn is_unbounded(&self) -> bool {
        *self == Self::UNBOUNDED
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// `YYYY-MM-DD` bounds as compared against stored date strings.
    pub fn as_strings(&self) -> (String, String) {
        (
            self.start.format("%Y-%m-%d").to_string(),
            self.end.format("%Y-%m-%d").to_string(),
        )
    }
}

/// Resolve a period selection into its inclusive date range.
pub fn resolve(reference: NaiveDate, kind: PeriodKind) -> DateRange {
    match kind {
        PeriodKind::Day => DateRange::new(reference, reference),
        PeriodKind::Week => {
            let start = week_start(reference);
            let end = start.checked_add_days(Days::new(6)).unwrap_or(NaiveDate::MAX);
            DateRange::new(start, end)
        }
        PeriodKind::Month => DateRange::new(month_start(reference), month_end(reference)),
        PeriodKind::All => DateRange::UNBOUNDED,
    }
}

/// Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let back = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(back)).unwrap_or(NaiveDate::MIN)
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last calendar day of `date`'s month: the day before the 1st of the next month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}

/// The bucket a transaction date falls into under a period kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BucketKey {
    /// First date covered by the bucket; orders buckets chronologically.
    pub start: NaiveDate,
    pub label: String,
}

pub const ALL_PERIOD_LABEL: &str = "Semua Periode";

pub fn bucket_key(date: NaiveDate, kind: PeriodKind) -> BucketKey {
    match kind {
        PeriodKind::Day => BucketKey {
            start: date,
            label: format_date_long(date),
        },
        PeriodKind::Week => {
            let range = resolve(date, PeriodKind::Week);
            BucketKey {
                start: range.start,
                label: format!(
                    "{} - {}",
                    format_date_long(range.start),
                    format_date_long(range.end)
                ),
            }
        }
        PeriodKind::Month => BucketKey {
            start: month_start(date),
            label: format_month(date),
        },
        PeriodKind::All => BucketKey {
            start: NaiveDate::MIN,
            label: ALL_PERIOD_LABEL.to_string(),
        },
    }
}

/// Human label of a whole selection, as printed in report headers.
pub fn period_label(reference: NaiveDate, kind: PeriodKind) -> String {
    bucket_key(reference, kind).label
}

const MONTHS: [&str; 12] = [
    "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus", "September",
    "Oktober", "November", "Desember",
];

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Minggu",
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
    }
}

pub fn month_name(date: NaiveDate) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// "Senin, 6 Januari 2025"
pub fn format_date_long(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), format_date_short(date))
}

/// "6 Januari 2025"
pub fn format_date_short(date: NaiveDate) -> String {
    format!("{} {} {}", date.day(), month_name(date), date.year())
}

/// "Januari 2025"
pub fn format_month(date: NaiveDate) -> String {
    format!("{} {}", month_name(date), date.year())
}

/// "6/1/2025"
pub fn format_date_numeric(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.day(), date.month(), date.year())
}

/// Source of "today" as a civil date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Reads the system clock and converts it into a fixed timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock {
    tz: Tz,
}

impl ZonedClock {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }
}

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        today_in(self.tz, Utc::now())
    }
}

/// Always answers the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Civil date of instant `now` in `tz`.
pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}
