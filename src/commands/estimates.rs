// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::aggregate::{EstimateFilter, category_name};
use crate::models::NewEstimate;
use crate::store::RecordStore;
use crate::utils::{
    arg, currency_symbol, fmt_money, id_arg, id_for_category, maybe_print_json, parse_decimal,
    parse_month, pretty_table,
};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(ledger: &mut AppLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(ledger, sub)?,
        Some(("edit", sub)) => edit(ledger, sub)?,
        Some(("rm", sub)) => rm(ledger, sub)?,
        Some(("list", sub)) => list(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(ledger: &mut AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(arg(sub, "month")?)?;
    let cat = arg(sub, "category")?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let category_id = id_for_category(ledger.store(), cat)?;
    let id = ledger.add_estimate(&NewEstimate {
        month,
        category_id,
        amount,
    })?;
    println!("Estimate saved for {} / {} = {} (#{})", month, cat, amount, id);
    Ok(())
}

fn edit(ledger: &mut AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub)?;
    let current = ledger.store().get_estimate(id)?;
    let mut est = NewEstimate::from(&current);

    if let Some(m) = sub.get_one::<String>("month") {
        est.month = parse_month(m)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        est.category_id = id_for_category(ledger.store(), c.trim())?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        est.amount = parse_decimal(a.trim())?;
    }
    ledger.update_estimate(id, &est)?;
    println!("Updated estimate #{}", id);
    Ok(())
}

fn rm(ledger: &mut AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub)?;
    ledger.delete_estimate(id)?;
    println!("Deleted estimate #{}", id);
    Ok(())
}

fn list(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        if data.is_empty() {
            println!("No estimates found.");
            return Ok(());
        }
        let symbol = currency_symbol(ledger.store())?;
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    format!("{}/{}", r.month, r.year),
                    r.category.clone(),
                    fmt_money(&r.amount, &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month/Year", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct EstimateRow {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub amount: Decimal,
    pub timestamp: DateTime<Utc>,
}

/// Chronological, then by id.
pub fn query_rows(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<Vec<EstimateRow>> {
    let store = ledger.store();
    let mut filter = EstimateFilter::default();
    if let Some(month) = sub.get_one::<String>("month") {
        filter.month = Some(parse_month(month)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        filter.category_id = Some(id_for_category(store, cat.trim())?);
    }

    let categories = store.fetch_categories()?;
    let estimates = store.fetch_estimates(filter.month)?;
    let mut matched = filter.apply(&estimates);
    matched.sort_by_key(|e| (e.month_key(), e.id));

    Ok(matched
        .into_iter()
        .map(|e| EstimateRow {
            id: e.id,
            year: e.year,
            month: e.month,
            category: category_name(&categories, e.category_id).to_string(),
            amount: e.amount,
            timestamp: e.timestamp,
        })
        .collect())
}
