// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppLedger;
use crate::utils::{CURRENCY_SYMBOL_KEY, arg, currency_symbol};
use anyhow::{Result, bail};

fn setting_key(name: &str) -> Result<&'static str> {
    match name {
        "currency-symbol" => Ok(CURRENCY_SYMBOL_KEY),
        other => bail!("Unknown setting '{}'", other),
    }
}

pub fn handle(ledger: &AppLedger, m: &clap::ArgMatches) -> Result<()> {
    let store = ledger.store();
    match m.subcommand() {
        Some(("get", sub)) => {
            let name = arg(sub, "key")?;
            let value = match setting_key(name)? {
                CURRENCY_SYMBOL_KEY => currency_symbol(store)?,
                key => store.setting(key)?.unwrap_or_default(),
            };
            println!("{} = {}", name, value);
        }
        Some(("set", sub)) => {
            let name = arg(sub, "key")?;
            let value = arg(sub, "value")?;
            store.set_setting(setting_key(name)?, value)?;
            println!("{} set to {}", name, value);
        }
        _ => {}
    }
    Ok(())
}
