// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::store::RecordStore;
use crate::utils::pretty_table;
use anyhow::Result;
use std::collections::{BTreeMap, HashSet};

pub fn handle(ledger: &AppLedger) -> Result<()> {
    let rows = find_issues(ledger)?;
    if rows.is_empty() {
        println!("✅ doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}

/// None of these are errors to the aggregation code; they are reported so the
/// user can tidy up.
pub fn find_issues(ledger: &AppLedger) -> Result<Vec<Vec<String>>> {
    let store = ledger.store();
    let known: HashSet<i64> = store.fetch_categories()?.iter().map(|c| c.id).collect();
    let transactions = store.fetch_transactions()?;
    let estimates = store.fetch_estimates(None)?;
    let mut rows = Vec::new();

    // 1) References to categories that no longer exist
    for t in transactions.iter().filter(|t| !known.contains(&t.category_id)) {
        rows.push(vec![
            "txn_unknown_category".into(),
            format!("#{} -> category {}", t.id, t.category_id),
        ]);
    }
    for e in estimates.iter().filter(|e| !known.contains(&e.category_id)) {
        rows.push(vec![
            "estimate_unknown_category".into(),
            format!("#{} -> category {}", e.id, e.category_id),
        ]);
    }

    // 2) Negative amounts pass through aggregation unchanged
    for t in transactions.iter().filter(|t| t.amount.is_sign_negative() && !t.amount.is_zero()) {
        rows.push(vec!["txn_negative_amount".into(), format!("#{} {}", t.id, t.amount)]);
    }
    for e in estimates.iter().filter(|e| e.amount.is_sign_negative() && !e.amount.is_zero()) {
        rows.push(vec!["estimate_negative_amount".into(), format!("#{} {}", e.id, e.amount)]);
    }

    // 3) Several estimates for one month and category (they are summed)
    let mut per_bucket: BTreeMap<(i32, u32, i64), Vec<i64>> = BTreeMap::new();
    for e in &estimates {
        per_bucket
            .entry((e.year, e.month, e.category_id))
            .or_default()
            .push(e.id);
    }
    for ((year, month, cat), ids) in per_bucket.into_iter().filter(|(_, ids)| ids.len() > 1) {
        let ids: Vec<String> = ids.iter().map(|id| format!("#{}", id)).collect();
        rows.push(vec![
            "duplicate_estimates".into(),
            format!("{}-{} category {}: {}", year, month, cat, ids.join(", ")),
        ]);
    }

    Ok(rows)
}
