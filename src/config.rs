// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::period::{Clock, ZonedClock};
use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveDate;
use chrono_tz::Tz;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub const DEFAULT_TIMEZONE: &str = "Asia/Jakarta";
pub const DEFAULT_EVENT: &str = "KARTA CUP V";

pub const KEY_TIMEZONE: &str = "timezone";
pub const KEY_OWNER: &str = "owner";
pub const KEY_EVENT: &str = "event";
pub const KEYS: &[&str] = &[KEY_TIMEZONE, KEY_OWNER, KEY_EVENT];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Config {
    /// IANA name of the tournament's civil timezone.
    pub timezone: String,
    /// Principal whose records are read and written.
    pub owner: Option<String>,
    /// Event name printed on reports and receipts.
    pub event: String,
    #[serde(skip)]
    tz: Tz,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timezone: DEFAULT_TIMEZONE.to_string(),
            owner: None,
            event: DEFAULT_EVENT.to_string(),
            tz: chrono_tz::Asia::Jakarta,
        }
    }
}

impl Config {
    pub fn load(conn: &Connection) -> Result<Self> {
        let timezone =
            get_setting(conn, KEY_TIMEZONE)?.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let tz = parse_timezone(&timezone).context("Invalid timezone in settings")?;
        Ok(Self {
            timezone,
            owner: get_setting(conn, KEY_OWNER)?.filter(|s| !s.trim().is_empty()),
            event: get_setting(conn, KEY_EVENT)?.unwrap_or_else(|| DEFAULT_EVENT.to_string()),
            tz,
        })
    }

    /// An owner given on the command line wins over the stored one.
    pub fn with_owner(mut self, owner: Option<&str>) -> Self {
        if let Some(o) = owner.map(str::trim).filter(|o| !o.is_empty()) {
            self.owner = Some(o.to_string());
        }
        self
    }

    pub fn require_owner(&self) -> Result<&str, StoreError> {
        self.owner.as_deref().ok_or(StoreError::Unauthenticated)
    }

    pub fn tz(&self) -> Tz {
        self.tz
    }

    pub fn clock(&self) -> ZonedClock {
        ZonedClock::new(self.tz)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock().today()
    }
}

pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| anyhow!("invalid timezone: {}", s))
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row(
            "SELECT value FROM settings WHERE key=?1",
            params![key],
            |r| r.get(0),
        )
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    if !KEYS.contains(&key) {
        bail!("Unknown setting '{}' (use {})", key, KEYS.join("|"));
    }
    let value = value.trim();
    if key == KEY_TIMEZONE {
        parse_timezone(value)?;
    }
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}
