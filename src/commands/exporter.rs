// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::aggregate::category_name;
use crate::store::RecordStore;
use anyhow::{Result, bail};
use serde_json::json;

pub fn handle(ledger: &AppLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(ledger, sub),
        Some(("estimates", sub)) => export_estimates(ledger, sub),
        _ => Ok(()),
    }
}

fn target(sub: &clap::ArgMatches) -> Result<(String, String)> {
    let fmt = crate::utils::arg(sub, "format")?.to_lowercase();
    let out = crate::utils::arg(sub, "out")?.to_string();
    if fmt != "csv" && fmt != "json" {
        bail!("Unknown format: {} (use csv|json)", fmt);
    }
    Ok((fmt, out))
}

fn export_transactions(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let store = ledger.store();
    let categories = store.fetch_categories()?;
    let transactions = store.fetch_transactions()?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out)?;
        wtr.write_record(["id", "date", "type", "category", "amount"])?;
        for t in &transactions {
            wtr.write_record([
                t.id.to_string(),
                t.date.to_string(),
                t.kind.to_string(),
                category_name(&categories, t.category_id).to_string(),
                t.amount.to_string(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = transactions
            .iter()
            .map(|t| {
                json!({
                    "id": t.id,
                    "date": t.date.to_string(),
                    "type": t.kind,
                    "category": category_name(&categories, t.category_id),
                    "amount": t.amount.to_string(),
                })
            })
            .collect();
        std::fs::write(&out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} transactions to {}", transactions.len(), out);
    Ok(())
}

fn export_estimates(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let (fmt, out) = target(sub)?;
    let store = ledger.store();
    let categories = store.fetch_categories()?;
    let estimates = store.fetch_estimates(None)?;

    if fmt == "csv" {
        let mut wtr = csv::Writer::from_path(&out)?;
        wtr.write_record(["id", "year", "month", "category", "amount", "timestamp"])?;
        for e in &estimates {
            wtr.write_record([
                e.id.to_string(),
                e.year.to_string(),
                e.month.to_string(),
                category_name(&categories, e.category_id).to_string(),
                e.amount.to_string(),
                e.timestamp.to_rfc3339(),
            ])?;
        }
        wtr.flush()?;
    } else {
        let items: Vec<_> = estimates
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "year": e.year,
                    "month": e.month,
                    "category": category_name(&categories, e.category_id),
                    "amount": e.amount.to_string(),
                    "timestamp": e.timestamp.to_rfc3339(),
                })
            })
            .collect();
        std::fs::write(&out, serde_json::to_string_pretty(&items)?)?;
    }
    println!("Exported {} estimates to {}", estimates.len(), out);
    Ok(())
}
