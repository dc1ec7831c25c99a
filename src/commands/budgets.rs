// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{BudgetStatus, monthly_expenses};
use crate::backend::KeyValueStore;
use crate::ledger::LedgerStore;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::{Result, bail};
use chrono::Local;
use rust_decimal::Decimal;

pub fn handle<B: KeyValueStore>(store: &LedgerStore<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(store, sub)?,
        Some(("show", sub)) => show(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn set<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    if amount < Decimal::ZERO {
        bail!("Budget must not be negative, got {}", amount);
    }
    if !store.save_monthly_budget(amount) {
        bail!("Monthly budget was not saved");
    }
    println!(
        "Monthly budget set to {}",
        fmt_money(&amount, &store.get_selected_currency())
    );
    Ok(())
}

pub fn status<B: KeyValueStore>(store: &LedgerStore<B>) -> BudgetStatus {
    let spent = monthly_expenses(&store.get_all(), &Local::now());
    BudgetStatus::new(store.get_monthly_budget(), spent)
}

fn show<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let st = status(store);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &st)? {
        return Ok(());
    }
    let ccy = store.get_selected_currency();
    let used = st
        .percent_used
        .map(|p| format!("{}%", p))
        .unwrap_or_else(|| "-".to_string());
    let state = if st.exceeded { "over budget" } else { "ok" };
    println!(
        "{}",
        pretty_table(
            &["Budget", "Spent", "Remaining", "Used", "Status"],
            vec![vec![
                fmt_money(&st.budget, &ccy),
                fmt_money(&st.spent, &ccy),
                fmt_money(&st.remaining, &ccy),
                used,
                state.to_string(),
            ]],
        )
    );
    Ok(())
}
