// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::store::RecordStore;
use crate::utils::{arg, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(ledger: &mut AppLedger, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => {
            let name = arg(sub, "name")?;
            let c = ledger.add_category(name)?;
            println!("Added category '{}' (#{})", c.name, c.id);
        }
        Some(("list", sub)) => {
            let mut cats = ledger.store().fetch_categories()?;
            cats.sort_by(|a, b| a.name.cmp(&b.name));
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let data = cats
                    .into_iter()
                    .map(|c| vec![c.id.to_string(), c.name])
                    .collect();
                println!("{}", pretty_table(&["ID", "Category"], data));
            }
        }
        _ => {}
    }
    Ok(())
}
