// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::json;
use spendwise::aggregate::{
    EstimateFilter, TransactionFilter, aggregate_monthly, category_name, category_spending,
    estimate_months, month_totals, transaction_months,
};
use spendwise::models::{Category, EstimatedExpense, MonthKey, MonthlyBucket, Transaction, TxKind};

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: i64, kind: TxKind, amount: &str, date: &str, category_id: i64) -> Transaction {
    Transaction {
        id,
        kind,
        amount: d(amount),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        category_id,
    }
}

fn est(id: i64, year: i32, month: u32, category_id: i64, amount: &str) -> EstimatedExpense {
    EstimatedExpense {
        id,
        year,
        month,
        category_id,
        amount: d(amount),
        timestamp: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    }
}

fn month(year: i32, m: u32) -> MonthKey {
    MonthKey::new(year, m).unwrap()
}

fn categories() -> Vec<Category> {
    vec![
        Category { id: 1, name: "Food".into() },
        Category { id: 2, name: "Transport".into() },
    ]
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        tx(1, TxKind::Expense, "50", "2024-03-05", 1),
        tx(2, TxKind::Income, "1000", "2024-03-10", 1),
        tx(3, TxKind::Expense, "12.50", "2024-10-01", 2),
        tx(4, TxKind::Expense, "7.25", "2024-09-01", 1),
        tx(5, TxKind::Expense, "30", "2023-12-01", 99),
    ]
}

fn sample_estimates() -> Vec<EstimatedExpense> {
    vec![
        est(1, 2024, 3, 1, "80"),
        est(2, 2024, 9, 2, "20"),
        est(3, 2025, 1, 1, "45"),
    ]
}

#[test]
fn expense_and_income_in_one_month_give_single_bucket() {
    let transactions = vec![
        tx(1, TxKind::Expense, "50", "2024-03-05", 1),
        tx(2, TxKind::Income, "1000", "2024-03-10", 1),
    ];
    let estimates = vec![est(1, 2024, 3, 1, "80")];
    let buckets = aggregate_monthly(&transactions, &estimates, None);
    assert_eq!(
        buckets,
        vec![MonthlyBucket {
            year: 2024,
            month: 3,
            estimated: d("80"),
            actual: d("50"),
        }]
    );
}

#[test]
fn empty_inputs_give_no_buckets() {
    assert!(aggregate_monthly(&[], &[], None).is_empty());
    assert!(aggregate_monthly(&[], &[], Some(month(2024, 3))).is_empty());
}

#[test]
fn actual_sum_matches_expense_total() {
    let transactions = sample_transactions();
    let buckets = aggregate_monthly(&transactions, &[], None);
    let actual: Decimal = buckets.iter().map(|b| b.actual).sum();
    let expected: Decimal = transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .map(|t| t.amount)
        .sum();
    assert_eq!(actual, expected);
    assert!(buckets.iter().all(|b| b.estimated.is_zero()));
}

#[test]
fn estimated_sum_matches_estimate_total() {
    let estimates = sample_estimates();
    let buckets = aggregate_monthly(&[], &estimates, None);
    let estimated: Decimal = buckets.iter().map(|b| b.estimated).sum();
    assert_eq!(estimated, d("145"));
    assert_eq!(buckets.len(), 3);
}

#[test]
fn duplicate_estimates_for_same_category_are_summed() {
    let estimates = vec![est(1, 2024, 5, 1, "100"), est(2, 2024, 5, 1, "25.50")];
    let buckets = aggregate_monthly(&[], &estimates, None);
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].estimated, d("125.50"));
}

#[test]
fn one_sided_months_default_missing_side_to_zero() {
    let buckets = aggregate_monthly(&sample_transactions(), &sample_estimates(), None);
    let keys: Vec<String> = buckets.iter().map(|b| b.key().to_string()).collect();
    assert_eq!(keys, ["2023-12", "2024-3", "2024-9", "2024-10", "2025-1"]);

    let only_actual = buckets.iter().find(|b| b.key() == month(2024, 10)).unwrap();
    assert_eq!(only_actual.estimated, Decimal::ZERO);
    assert_eq!(only_actual.actual, d("12.50"));

    let only_estimate = buckets.iter().find(|b| b.key() == month(2025, 1)).unwrap();
    assert_eq!(only_estimate.estimated, d("45"));
    assert_eq!(only_estimate.actual, Decimal::ZERO);
}

#[test]
fn income_only_month_has_no_bucket() {
    let transactions = vec![tx(1, TxKind::Income, "900", "2024-06-01", 1)];
    assert!(aggregate_monthly(&transactions, &[], None).is_empty());
}

#[test]
fn filter_keeps_only_the_requested_month() {
    let buckets = aggregate_monthly(
        &sample_transactions(),
        &sample_estimates(),
        Some(month(2024, 9)),
    );
    assert_eq!(buckets.len(), 1);
    assert_eq!(buckets[0].key(), month(2024, 9));
    assert_eq!(buckets[0].estimated, d("20"));
    assert_eq!(buckets[0].actual, d("7.25"));

    let none = aggregate_monthly(&sample_transactions(), &sample_estimates(), Some(month(2030, 1)));
    assert!(none.is_empty());
}

#[test]
fn negative_amounts_pass_through() {
    let transactions = vec![tx(1, TxKind::Expense, "-5", "2024-02-01", 1)];
    let buckets = aggregate_monthly(&transactions, &[], None);
    assert_eq!(buckets[0].actual, d("-5"));
}

#[test]
fn aggregation_is_idempotent() {
    let t = sample_transactions();
    let e = sample_estimates();
    assert_eq!(aggregate_monthly(&t, &e, None), aggregate_monthly(&t, &e, None));
}

#[test]
fn month_totals_split_income_and_expense() {
    let totals = month_totals(&sample_transactions(), &sample_estimates(), month(2024, 3));
    assert_eq!(totals.income, d("1000"));
    assert_eq!(totals.expense, d("50"));
    assert_eq!(totals.estimated, d("80"));
    assert_eq!(totals.net, d("950"));

    let empty = month_totals(&sample_transactions(), &sample_estimates(), month(2022, 1));
    assert_eq!(empty.net, Decimal::ZERO);
}

#[test]
fn category_spending_resolves_names_and_sorts() {
    let totals = category_spending(&sample_transactions(), &categories(), None);
    let pairs: Vec<(&str, Decimal)> = totals
        .iter()
        .map(|t| (t.category.as_str(), t.total))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("Food", d("57.25")),
            ("Unknown", d("30")),
            ("Transport", d("12.50")),
        ]
    );

    let march = category_spending(&sample_transactions(), &categories(), Some(month(2024, 3)));
    assert_eq!(march.len(), 1);
    assert_eq!(march[0].total, d("50"));
}

#[test]
fn category_name_falls_back_to_unknown() {
    let cats = categories();
    assert_eq!(category_name(&cats, 2), "Transport");
    assert_eq!(category_name(&cats, 42), "Unknown");
}

#[test]
fn transaction_filter_combines_criteria() {
    let transactions = sample_transactions();
    let filter = TransactionFilter {
        month: Some(month(2024, 3)),
        kind: Some(TxKind::Expense),
        category_id: None,
    };
    let ids: Vec<i64> = filter.apply(&transactions).iter().map(|t| t.id).collect();
    assert_eq!(ids, [1]);

    let by_cat = TransactionFilter {
        category_id: Some(1),
        ..Default::default()
    };
    assert_eq!(by_cat.apply(&transactions).len(), 3);
    assert_eq!(TransactionFilter::default().apply(&transactions).len(), 5);
}

#[test]
fn estimate_filter_matches_exact_month() {
    let estimates = sample_estimates();
    let filter = EstimateFilter {
        month: Some(month(2024, 9)),
        category_id: Some(2),
    };
    assert_eq!(filter.apply(&estimates).len(), 1);
    let wrong_cat = EstimateFilter {
        month: Some(month(2024, 9)),
        category_id: Some(1),
    };
    assert!(wrong_cat.apply(&estimates).is_empty());
}

#[test]
fn available_months_sorted_numerically() {
    let months = transaction_months(&sample_transactions());
    assert_eq!(
        months,
        vec![month(2023, 12), month(2024, 3), month(2024, 9), month(2024, 10)]
    );
    assert_eq!(
        estimate_months(&sample_estimates()),
        vec![month(2024, 3), month(2024, 9), month(2025, 1)]
    );
}

#[test]
fn month_key_parsing() {
    assert_eq!("2024-09".parse::<MonthKey>().unwrap(), month(2024, 9));
    assert_eq!("2024-9".parse::<MonthKey>().unwrap(), month(2024, 9));
    assert!("2024-13".parse::<MonthKey>().is_err());
    assert!("2024".parse::<MonthKey>().is_err());
    assert!("abcd-01".parse::<MonthKey>().is_err());
    assert!(month(2024, 9) < month(2024, 10));
}

#[test]
fn month_key_deserialization_checks_range() {
    let ok: MonthKey = serde_json::from_value(json!({"year": 2024, "month": 12})).unwrap();
    assert_eq!(ok, month(2024, 12));
    assert!(serde_json::from_value::<MonthKey>(json!({"year": 2024, "month": 13})).is_err());
    assert!(serde_json::from_value::<MonthKey>(json!({"year": 2024, "month": 0})).is_err());
}
