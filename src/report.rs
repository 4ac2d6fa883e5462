// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly text report: totals, transaction detail and the estimate breakdown.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::aggregate::{
    MonthTotals, UNKNOWN_CATEGORY, estimates_in_month, month_totals, transactions_in_month,
};
use crate::models::{Category, EstimatedExpense, MonthKey, Transaction, TxKind};
use crate::series::month_label;
use crate::utils::{DEFAULT_CURRENCY_SYMBOL, fmt_money, pretty_table};

pub const NO_TRANSACTIONS: &str = "No transactions recorded for this month.";
pub const NO_ESTIMATES: &str = "No estimates recorded for this month.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionLine {
    pub id: i64,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimateLine {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthReport {
    pub month: MonthKey,
    pub label: String,
    pub totals: MonthTotals,
    pub transactions: Vec<TransactionLine>,
    pub estimates: Vec<EstimateLine>,
}

fn resolve(categories: &[Category], id: i64, owner: &str, owner_id: i64) -> String {
    match categories.iter().find(|c| c.id == id) {
        Some(c) => c.name.clone(),
        None => {
            warn!(category_id = id, owner, owner_id, "category not found");
            UNKNOWN_CATEGORY.to_string()
        }
    }
}

/// Collects the report for `month`. Records from other months are ignored,
/// so whole collections can be passed in.
pub fn build_report(
    month: MonthKey,
    transactions: &[Transaction],
    estimates: &[EstimatedExpense],
    categories: &[Category],
) -> MonthReport {
    let mut tx_lines: Vec<TransactionLine> = transactions_in_month(transactions, month)
        .into_iter()
        .map(|t| TransactionLine {
            id: t.id,
            date: t.date,
            kind: t.kind,
            category: resolve(categories, t.category_id, "transaction", t.id),
            amount: t.amount,
        })
        .collect();
    tx_lines.sort_by_key(|l| (l.date, l.id));

    let mut est_lines: Vec<EstimateLine> = estimates_in_month(estimates, month)
        .into_iter()
        .map(|e| EstimateLine {
            id: e.id,
            category: resolve(categories, e.category_id, "estimate", e.id),
            amount: e.amount,
        })
        .collect();
    est_lines.sort_by(|a, b| a.category.cmp(&b.category).then(a.id.cmp(&b.id)));

    MonthReport {
        month,
        label: month_label(month),
        totals: month_totals(transactions, estimates, month),
        transactions: tx_lines,
        estimates: est_lines,
    }
}

fn heading(out: &mut Vec<String>, title: &str) {
    out.push(String::new());
    out.push(title.to_string());
    out.push("-".repeat(title.chars().count()));
}

impl MonthReport {
    pub fn render(&self, symbol: &str) -> String {
        let mut out = Vec::new();
        let title = format!("Monthly Report: {} ({})", self.label, self.month);
        out.push(title.clone());
        out.push("=".repeat(title.chars().count()));

        heading(&mut out, "Summary");
        let t = &self.totals;
        out.push(format!("Total Income:     {}", fmt_money(&t.income, symbol)));
        out.push(format!("Total Expenses:   {}", fmt_money(&t.expense, symbol)));
        out.push(format!("Total Estimated:  {}", fmt_money(&t.estimated, symbol)));
        out.push(format!("Net:              {}", fmt_money(&t.net, symbol)));

        heading(&mut out, "Transactions");
        if self.transactions.is_empty() {
            out.push(NO_TRANSACTIONS.to_string());
        } else {
            let rows = self
                .transactions
                .iter()
                .map(|l| {
                    vec![
                        l.date.to_string(),
                        l.kind.to_string(),
                        l.category.clone(),
                        fmt_money(&l.amount, symbol),
                    ]
                })
                .collect();
            out.push(pretty_table(&["Date", "Type", "Category", "Amount"], rows).to_string());
        }

        heading(&mut out, "Estimated Expenses by Category");
        if self.estimates.is_empty() {
            out.push(NO_ESTIMATES.to_string());
        } else {
            let rows = self
                .estimates
                .iter()
                .map(|l| vec![l.category.clone(), fmt_money(&l.amount, symbol)])
                .collect();
            out.push(pretty_table(&["Category", "Estimated"], rows).to_string());
        }

        let mut text = out.join("\n");
        text.push('\n');
        text
    }
}

/// Report text for `month`, ready to be written to a file.
pub fn format_report(
    month: MonthKey,
    transactions: &[Transaction],
    estimates: &[EstimatedExpense],
    categories: &[Category],
) -> String {
    build_report(month, transactions, estimates, categories).render(DEFAULT_CURRENCY_SYMBOL)
}
