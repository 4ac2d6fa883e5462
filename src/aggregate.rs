// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure reductions over already-fetched transactions and estimates.
//!
//! Nothing here touches the store or mutates its inputs; identical inputs give
//! identical outputs.

use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::models::{Category, EstimatedExpense, MonthKey, MonthlyBucket, Transaction, TxKind};

pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Display name for a category id, or `"Unknown"` when it no longer resolves.
pub fn category_name(categories: &[Category], id: i64) -> &str {
    categories
        .iter()
        .find(|c| c.id == id)
        .map(|c| c.name.as_str())
        .unwrap_or(UNKNOWN_CATEGORY)
}

/// One bucket per month present in the (optionally filtered) input.
///
/// Expense transactions feed `actual`, every estimate feeds `estimated`
/// whatever its category. Income never reaches a bucket, so a month holding
/// only income produces none. Buckets come back in chronological order.
pub fn aggregate_monthly(
    transactions: &[Transaction],
    estimates: &[EstimatedExpense],
    filter: Option<MonthKey>,
) -> Vec<MonthlyBucket> {
    let wanted = |key: MonthKey| filter.is_none_or(|f| f == key);
    let mut buckets: BTreeMap<MonthKey, MonthlyBucket> = BTreeMap::new();

    for est in estimates.iter().filter(|e| wanted(e.month_key())) {
        let key = est.month_key();
        buckets
            .entry(key)
            .or_insert_with(|| MonthlyBucket::empty(key))
            .estimated += est.amount;
    }
    for tx in transactions
        .iter()
        .filter(|t| t.is_expense() && wanted(t.month()))
    {
        let key = tx.month();
        buckets
            .entry(key)
            .or_insert_with(|| MonthlyBucket::empty(key))
            .actual += tx.amount;
    }
    buckets.into_values().collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthTotals {
    pub month: MonthKey,
    pub income: Decimal,
    pub expense: Decimal,
    pub estimated: Decimal,
    pub net: Decimal,
}

/// Summary-card figures for a single month.
pub fn month_totals(
    transactions: &[Transaction],
    estimates: &[EstimatedExpense],
    month: MonthKey,
) -> MonthTotals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for tx in transactions.iter().filter(|t| month.contains(t.date)) {
        match tx.kind {
            TxKind::Income => income += tx.amount,
            TxKind::Expense => expense += tx.amount,
        }
    }
    let estimated: Decimal = estimates
        .iter()
        .filter(|e| e.month_key() == month)
        .map(|e| e.amount)
        .sum();
    MonthTotals {
        month,
        income,
        expense,
        estimated,
        net: income - expense,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
}

/// Expense totals per resolved category name, largest first.
///
/// Dangling ids all collapse into the single `"Unknown"` slice.
pub fn category_spending(
    transactions: &[Transaction],
    categories: &[Category],
    filter: Option<MonthKey>,
) -> Vec<CategoryTotal> {
    let mut agg: BTreeMap<&str, Decimal> = BTreeMap::new();
    for tx in transactions
        .iter()
        .filter(|t| t.is_expense() && filter.is_none_or(|f| f.contains(t.date)))
    {
        *agg.entry(category_name(categories, tx.category_id))
            .or_insert(Decimal::ZERO) += tx.amount;
    }
    let mut items: Vec<CategoryTotal> = agg
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();
    items.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.category.cmp(&b.category)));
    items
}

pub fn transactions_in_month(transactions: &[Transaction], month: MonthKey) -> Vec<&Transaction> {
    transactions.iter().filter(|t| month.contains(t.date)).collect()
}

pub fn estimates_in_month(
    estimates: &[EstimatedExpense],
    month: MonthKey,
) -> Vec<&EstimatedExpense> {
    estimates.iter().filter(|e| e.month_key() == month).collect()
}

/// Filters behind the transaction table: every `None` means "all".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub month: Option<MonthKey>,
    pub kind: Option<TxKind>,
    pub category_id: Option<i64>,
}

impl TransactionFilter {
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.month.is_none_or(|m| m.contains(tx.date))
            && self.kind.is_none_or(|k| k == tx.kind)
            && self.category_id.is_none_or(|c| c == tx.category_id)
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EstimateFilter {
    pub month: Option<MonthKey>,
    pub category_id: Option<i64>,
}

impl EstimateFilter {
    pub fn matches(&self, est: &EstimatedExpense) -> bool {
        self.month.is_none_or(|m| m == est.month_key())
            && self.category_id.is_none_or(|c| c == est.category_id)
    }

    pub fn apply<'a>(&self, estimates: &'a [EstimatedExpense]) -> Vec<&'a EstimatedExpense> {
        estimates.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct months that hold at least one transaction, oldest first.
pub fn transaction_months(transactions: &[Transaction]) -> Vec<MonthKey> {
    transactions
        .iter()
        .map(Transaction::month)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn estimate_months(estimates: &[EstimatedExpense]) -> Vec<MonthKey> {
    estimates
        .iter()
        .map(EstimatedExpense::month_key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
