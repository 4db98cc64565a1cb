// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Indonesian number-to-words ("terbilang") for printed receipts.

use crate::error::TerbilangError;
use once_cell::sync::Lazy;
use regex::Regex;

const WORDS: [&str; 12] = [
    "", "Satu", "Dua", "Tiga", "Empat", "Lima", "Enam", "Tujuh", "Delapan", "Sembilan",
    "Sepuluh", "Sebelas",
];

const THOUSAND: u64 = 1_000;
const MILLION: u64 = 1_000_000;
const BILLION: u64 = 1_000_000_000;
const TRILLION: u64 = 1_000_000_000_000;
/// Exclusive upper bound of what can be spelled.
pub const LIMIT: u64 = 1_000_000_000_000_000;

static SPACES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Spell `amount` in Indonesian words, without a currency unit.
///
/// `0` is "Nol". Negative amounts and amounts of 10^15 or more are rejected.
///
/// ```
/// assert_eq!(bukukas::terbilang::terbilang(1_500_000).unwrap(), "Satu Juta Lima Ratus Ribu");
/// ```
pub fn terbilang(amount: i64) -> Result<String, TerbilangError> {
    if amount < 0 {
        return Err(TerbilangError::Negative(amount));
    }
    let n = amount as u64;
    if n >= LIMIT {
        return Err(TerbilangError::TooLarge(amount));
    }
    if n == 0 {
        return Ok("Nol".to_string());
    }
    Ok(collapse(&spell(n)))
}

/// Words followed by "Rupiah", as printed on receipts.
pub fn terbilang_rupiah(amount: i64) -> Result<String, TerbilangError> {
    Ok(format!("{} Rupiah", terbilang(amount)?))
}

// Zero spells as nothing here; only the top level turns it into "Nol".
fn spell(n: u64) -> String {
    match n {
        0..=11 => WORDS[n as usize].to_string(),
        12..=19 => format!("{} Belas", spell(n - 10)),
        20..=99 => format!("{} Puluh {}", spell(n / 10), spell(n % 10)),
        100..=199 => format!("Seratus {}", spell(n - 100)),
        200..=999 => format!("{} Ratus {}", spell(n / 100), spell(n % 100)),
        1_000..=1_999 => format!("Seribu {}", spell(n - THOUSAND)),
        2_000..=999_999 => format!("{} Ribu {}", spell(n / THOUSAND), spell(n % THOUSAND)),
        1_000_000..=999_999_999 => format!("{} Juta {}", spell(n / MILLION), spell(n % MILLION)),
        1_000_000_000..=1_999_999_999 => format!("Semilyar {}", spell(n - BILLION)),
        2_000_000_000..=999_999_999_999 => {
            format!("{} Milyar {}", spell(n / BILLION), spell(n % BILLION))
        }
        1_000_000_000_000..=1_999_999_999_999 => format!("Setrilyun {}", spell(n - TRILLION)),
        _ => format!("{} Trilyun {}", spell(n / TRILLION), spell(n % TRILLION)),
    }
}

fn collapse(s: &str) -> String {
    SPACES.replace_all(s, " ").trim().to_string()
}
