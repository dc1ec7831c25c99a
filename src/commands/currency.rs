// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::KeyValueStore;
use crate::ledger::LedgerStore;
use crate::models::{CurrencyCode, SUPPORTED_CURRENCIES};
use crate::utils::pretty_table;
use anyhow::{Result, bail};

pub fn handle<B: KeyValueStore>(store: &LedgerStore<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => {
            let raw = sub.get_one::<String>("code").unwrap();
            let Some(code) = CurrencyCode::parse(raw) else {
                bail!("Invalid currency '{}', expected a 3-letter code", raw);
            };
            if !store.set_selected_currency(code.as_str()) {
                bail!("Currency was not saved");
            }
            println!("Currency updated to {}", code);
        }
        Some(("show", _)) => println!("{}", store.get_selected_currency()),
        Some(("list", _)) => {
            let selected = store.get_selected_currency();
            let rows = SUPPORTED_CURRENCIES
                .iter()
                .map(|c| {
                    let mark = if *c == selected { "*" } else { "" };
                    vec![c.to_string(), mark.to_string()]
                })
                .collect();
            println!("{}", pretty_table(&["Currency", "Selected"], rows));
        }
        _ => {}
    }
    Ok(())
}
