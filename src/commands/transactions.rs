// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::aggregate::{TransactionFilter, category_name};
use crate::models::{MonthKey, NewTransaction};
use crate::store::RecordStore;
use crate::utils::{
    arg, currency_symbol, fmt_money, id_arg, id_for_category, maybe_print_json, parse_decimal,
    parse_entry_date, parse_kind, parse_month, pretty_table,
};
use anyhow::Result;
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
    let kind = parse_kind(arg(sub, "type")?)?;
    let amount = parse_decimal(arg(sub, "amount")?)?;
    let date = parse_entry_date(arg(sub, "date")?)?;
    let category = arg(sub, "category")?;
    let category_id = id_for_category(ledger.store(), category)?;

    let tx = NewTransaction {
        kind,
        amount,
        date,
        category_id,
    };
    let id = ledger.add_transaction(&tx)?;
    println!(
        "Recorded {} of {} in {} for {} (#{})",
        kind,
        amount,
        MonthKey::of(date),
        category,
        id
    );
    Ok(())
}

fn edit(ledger: &mut AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub)?;
    let current = ledger.store().get_transaction(id)?;
    let mut tx = NewTransaction::from(&current);

    if let Some(k) = sub.get_one::<String>("type") {
        tx.kind = parse_kind(k)?;
    }
    if let Some(a) = sub.get_one::<String>("amount") {
        tx.amount = parse_decimal(a.trim())?;
    }
    if let Some(d) = sub.get_one::<String>("date") {
        tx.date = parse_entry_date(d.trim())?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        tx.category_id = id_for_category(ledger.store(), c.trim())?;
    }
    ledger.update_transaction(id, &tx)?;
    println!("Updated transaction #{}", id);
    Ok(())
}

fn rm(ledger: &mut AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let id = id_arg(sub)?;
    ledger.delete_transaction(id)?;
    println!("Deleted transaction #{}", id);
    Ok(())
}

fn list(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(ledger, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No transactions found.");
            return Ok(());
        }
        let symbol = currency_symbol(ledger.store())?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.month.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    fmt_money(&r.amount, &symbol),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Month", "Type", "Category", "Amount"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: i64,
    pub date: String,
    pub month: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    pub amount: Decimal,
}

/// Newest first, narrowed by `--month`, `--type`, `--category` and `--limit`.
pub fn query_rows(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<Vec<TransactionRow>> {
    let store = ledger.store();
    let mut filter = TransactionFilter::default();
    if let Some(month) = sub.get_one::<String>("month") {
        filter.month = Some(parse_month(month)?);
    }
    if let Some(kind) = sub.get_one::<String>("type") {
        filter.kind = Some(parse_kind(kind)?);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        filter.category_id = Some(id_for_category(store, cat.trim())?);
    }

    let categories = store.fetch_categories()?;
    let transactions = store.fetch_transactions()?;
    let mut matched = filter.apply(&transactions);
    matched.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        matched.truncate(*limit);
    }

    Ok(matched
        .into_iter()
        .map(|t| TransactionRow {
            id: t.id,
            date: t.date.to_string(),
            month: t.month().to_string(),
            kind: t.kind.to_string(),
            category: category_name(&categories, t.category_id).to_string(),
            amount: t.amount,
        })
        .collect())
}
