// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::terbilang::terbilang_rupiah;
use crate::utils::required;
use anyhow::{Context, Result};

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    let raw = required(m, "amount")?;
    let digits: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '.' && *c != '_')
        .collect();
    let amount: i64 = digits
        .parse()
        .with_context(|| format!("Invalid amount '{}'", raw))?;
    println!("{}", terbilang_rupiah(amount)?);
    Ok(())
}
