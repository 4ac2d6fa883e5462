// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use spendwise::commands::{AppLedger, exporter};
use spendwise::ledger::Ledger;
use spendwise::models::{MonthKey, NewEstimate, NewTransaction, TxKind};
use spendwise::store::SqliteStore;
use spendwise::cli;
use tempfile::tempdir;

fn base_ledger() -> AppLedger {
    let mut ledger = Ledger::new(SqliteStore::open_in_memory().unwrap());
    ledger
        .add_transaction(&NewTransaction {
            kind: TxKind::Expense,
            amount: "12.34".parse::<Decimal>().unwrap(),
            date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            category_id: 1,
        })
        .unwrap();
    ledger
        .add_transaction(&NewTransaction {
            kind: TxKind::Income,
            amount: Decimal::from(900),
            date: NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
            category_id: 77,
        })
        .unwrap();
    ledger
        .add_estimate(&NewEstimate {
            month: MonthKey::new(2025, 1).unwrap(),
            category_id: 2,
            amount: Decimal::from(60),
        })
        .unwrap();
    ledger
}

fn export(ledger: &AppLedger, what: &str, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "spendwise", "export", what, "--format", format, "--out", out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(ledger, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_streams_pretty_json() {
    let ledger = base_ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    let out_str = out_path.to_string_lossy().to_string();

    export(&ledger, "transactions", "json", &out_str).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {
                "id": 1,
                "date": "2025-01-01",
                "type": "expense",
                "category": "Food",
                "amount": "12.34"
            },
            {
                "id": 2,
                "date": "2025-01-01",
                "type": "income",
                "category": "Unknown",
                "amount": "900"
            }
        ])
    );
}

#[test]
fn export_estimates_as_csv() {
    let ledger = base_ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("estimates.csv");
    let out_str = out_path.to_string_lossy().to_string();

    export(&ledger, "estimates", "CSV", &out_str).unwrap();

    let mut rdr = csv::Reader::from_path(&out_path).unwrap();
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        ["id", "year", "month", "category", "amount", "timestamp"]
    );
    let records: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(&records[0][1], "2025");
    assert_eq!(&records[0][2], "1");
    assert_eq!(&records[0][3], "Entertainment");
    assert_eq!(&records[0][4], "60");
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let ledger = base_ledger();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    let out_str = out_path.to_string_lossy().to_string();

    assert!(export(&ledger, "transactions", "xml", &out_str).is_err());
    assert!(!out_path.exists());
}
