// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use spendwise::commands::{AppLedger, estimates, transactions};
use spendwise::ledger::Ledger;
use spendwise::store::{RecordStore, SqliteStore};
use spendwise::cli;

fn run(ledger: &mut AppLedger, args: &[&str]) {
    let mut full = vec!["spendwise"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    match matches.subcommand() {
        Some(("tx", sub)) => transactions::handle(ledger, sub).unwrap(),
        Some(("estimate", sub)) => estimates::handle(ledger, sub).unwrap(),
        _ => panic!("unexpected subcommand"),
    }
}

fn list_matches(args: &[&str]) -> clap::ArgMatches {
    let mut full = vec!["spendwise", "tx", "list"];
    full.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(full);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    list_m.clone()
}

fn setup() -> AppLedger {
    let mut ledger = Ledger::new(SqliteStore::open_in_memory().unwrap());
    for i in 1..=3 {
        let date = format!("2025-0{}-15", i);
        run(
            &mut ledger,
            &[
                "tx", "add", "--type", "expense", "--amount", "10", "--date", &date,
                "--category", "Food",
            ],
        );
    }
    run(
        &mut ledger,
        &[
            "tx", "add", "--type", "income", "--amount", "2500", "--date", "2025-02",
            "--category", "Transport",
        ],
    );
    ledger
}

#[test]
fn list_limit_respected() {
    let ledger = setup();
    let rows = transactions::query_rows(&ledger, &list_matches(&["--limit", "2"])).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].date, "2025-03-01");
    assert_eq!(rows[1].kind, "income");
}

#[test]
fn list_filters_by_month_type_and_category() {
    let ledger = setup();
    let feb = transactions::query_rows(&ledger, &list_matches(&["--month", "2025-02"])).unwrap();
    assert_eq!(feb.len(), 2);
    assert!(feb.iter().all(|r| r.month == "2025-2"));

    let income = transactions::query_rows(&ledger, &list_matches(&["--type", "income"])).unwrap();
    assert_eq!(income.len(), 1);
    assert_eq!(income[0].category, "Transport");

    let food = transactions::query_rows(
        &ledger,
        &list_matches(&["--category", "Food", "--month", "2025-01"]),
    )
    .unwrap();
    assert_eq!(food.len(), 1);
    assert_eq!(food[0].amount.to_string(), "10");
}

#[test]
fn list_with_unknown_category_errors() {
    let ledger = setup();
    assert!(transactions::query_rows(&ledger, &list_matches(&["--category", "Nope"])).is_err());
}

#[test]
fn edit_changes_only_given_fields() {
    let mut ledger = setup();
    run(&mut ledger, &["tx", "edit", "1", "--amount", "99.90"]);
    let tx = ledger.store().get_transaction(1).unwrap();
    assert_eq!(tx.amount.to_string(), "99.90");
    assert_eq!(tx.date.to_string(), "2025-01-01");
    assert_eq!(tx.category_id, 1);

    run(&mut ledger, &["tx", "rm", "2"]);
    assert!(ledger.store().get_transaction(2).is_err());
}

#[test]
fn estimates_add_and_list() {
    let mut ledger = setup();
    for (month, category, amount) in [
        ("2025-02", "Food", "40"),
        ("2025-02", "Food", "5"),
        ("2025-03", "Transport", "20"),
    ] {
        run(
            &mut ledger,
            &[
                "estimate", "add", "--month", month, "--category", category, "--amount", amount,
            ],
        );
    }
    run(&mut ledger, &["estimate", "edit", "3", "--amount", "25"]);

    let matches =
        cli::build_cli().get_matches_from(["spendwise", "estimate", "list", "--month", "2025-02"]);
    let (_, est_m) = matches.subcommand().unwrap();
    let (_, list_m) = est_m.subcommand().unwrap();
    let rows = estimates::query_rows(&ledger, list_m).unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.category == "Food"));

    let buckets = ledger.monthly_buckets(None).unwrap();
    let feb = buckets.iter().find(|b| b.month == 2).unwrap();
    assert_eq!(feb.estimated.to_string(), "45");
    let mar = buckets.iter().find(|b| b.month == 3).unwrap();
    assert_eq!(mar.estimated.to_string(), "25");
}
