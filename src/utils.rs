// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::{MonthKey, TxKind};
use crate::store::{RecordStore, SqliteStore};

pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";
pub const CURRENCY_SYMBOL_KEY: &str = "currency_symbol";

pub fn arg<'a>(m: &'a clap::ArgMatches, name: &str) -> Result<&'a str> {
    m.get_one::<String>(name)
        .map(|s| s.trim())
        .with_context(|| format!("--{} is required", name))
}

pub fn id_arg(m: &clap::ArgMatches) -> Result<i64> {
    m.get_one::<i64>("id").copied().context("an id is required")
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts `YYYY-MM-DD` or a bare `YYYY-MM`; either lands on day 1 later.
pub fn parse_entry_date(s: &str) -> Result<NaiveDate> {
    if let Ok(d) = parse_date(s) {
        return Ok(d);
    }
    let month = parse_month(s)
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD or YYYY-MM", s))?;
    month
        .first_day()
        .with_context(|| format!("Invalid date '{}'", s))
}

pub fn parse_month(s: &str) -> Result<MonthKey> {
    Ok(s.parse::<MonthKey>()?)
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_kind(s: &str) -> Result<TxKind> {
    Ok(s.parse::<TxKind>()?)
}

pub fn fmt_money(d: &Decimal, symbol: &str) -> String {
    let d = d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if d.is_sign_negative() && !d.is_zero() {
        format!("-{}{:.2}", symbol, d.abs())
    } else {
        format!("{}{:.2}", symbol, d.abs())
    }
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn id_for_category(store: &impl RecordStore, name: &str) -> Result<i64> {
    let c = store
        .find_category(name)?
        .with_context(|| format!("Category '{}' not found", name))?;
    Ok(c.id)
}

pub fn currency_symbol(store: &SqliteStore) -> Result<String> {
    let v = store.setting(CURRENCY_SYMBOL_KEY)?;
    Ok(v.unwrap_or_else(|| DEFAULT_CURRENCY_SYMBOL.to_string()))
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}
