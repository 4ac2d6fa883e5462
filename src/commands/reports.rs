// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::aggregate::{estimate_months, transaction_months};
use crate::models::MonthKey;
use crate::series::{build_category_series, month_label};
use crate::store::RecordStore;
use crate::utils::{arg, currency_symbol, fmt_money, maybe_print_json, parse_month, pretty_table};
use anyhow::{Context, Result};

pub fn handle(ledger: &AppLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(ledger, sub)?,
        Some(("compare", sub)) => compare(ledger, sub)?,
        Some(("spending", sub)) => spending(ledger, sub)?,
        Some(("months", sub)) => months(ledger, sub)?,
        Some(("month", sub)) => month_report(ledger, sub)?,
        _ => {}
    }
    Ok(())
}

fn month_filter(sub: &clap::ArgMatches) -> Result<Option<MonthKey>> {
    sub.get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()
}

fn summary(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let month = month_filter(sub)?.unwrap_or_else(MonthKey::current);
    let totals = ledger.month_totals(month)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let symbol = currency_symbol(ledger.store())?;
        let data = vec![
            vec!["Total Income".into(), fmt_money(&totals.income, &symbol)],
            vec!["Total Expenses".into(), fmt_money(&totals.expense, &symbol)],
            vec!["Estimated Expenses".into(), fmt_money(&totals.estimated, &symbol)],
            vec!["Net".into(), fmt_money(&totals.net, &symbol)],
        ];
        println!("{}", month_label(month));
        println!("{}", pretty_table(&["", "Amount"], data));
    }
    Ok(())
}

fn compare(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let series = ledger.comparison(month_filter(sub)?)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &series)? {
        if series.is_empty() {
            println!("No data to compare.");
            return Ok(());
        }
        let symbol = currency_symbol(ledger.store())?;
        let trends = series.trends();
        let data = (0..series.len())
            .map(|i| {
                vec![
                    series.labels[i].clone(),
                    fmt_money(&series.estimated[i], &symbol),
                    fmt_money(&series.actual[i], &symbol),
                    fmt_money(&series.difference[i], &symbol),
                    trends[i].as_str().to_string(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Estimated", "Actual", "Difference", ""], data)
        );
    }
    Ok(())
}

fn spending(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let totals = ledger.category_spending(month_filter(sub)?)?;
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let printed = if json_flag {
        maybe_print_json(true, false, &build_category_series(&totals))?
    } else {
        maybe_print_json(false, jsonl_flag, &totals)?
    };
    if !printed {
        let symbol = currency_symbol(ledger.store())?;
        let data = totals
            .iter()
            .map(|t| vec![t.category.clone(), fmt_money(&t.total, &symbol)])
            .collect();
        println!("{}", pretty_table(&["Category", "Spent"], data));
    }
    Ok(())
}

fn months(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let store = ledger.store();
    let keys = if sub.get_flag("estimates") {
        estimate_months(&store.fetch_estimates(None)?)
    } else {
        transaction_months(&store.fetch_transactions()?)
    };
    let data: Vec<Vec<String>> = keys
        .iter()
        .map(|k| vec![format!("{}-{:02}", k.year, k.month), month_label(*k)])
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        println!("{}", pretty_table(&["Month", "Label"], data));
    }
    Ok(())
}

fn month_report(ledger: &AppLedger, sub: &clap::ArgMatches) -> Result<()> {
    let month = parse_month(arg(sub, "month")?)?;
    let symbol = currency_symbol(ledger.store())?;
    let text = ledger.month_report(month)?.render(&symbol);
    match sub.get_one::<String>("out") {
        Some(out) => {
            std::fs::write(out, &text).with_context(|| format!("Write report to {}", out))?;
            println!("Report for {} written to {}", month_label(month), out);
        }
        None => print!("{}", text),
    }
    Ok(())
}
