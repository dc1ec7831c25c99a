// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::{
    Summary, category_spending, is_income_label, percent_of, saturating_sum,
    transactions_in_month,
};
use crate::backend::KeyValueStore;
use crate::ledger::LedgerStore;
use crate::utils::{fmt_money, local_noon, maybe_print_json, parse_month, pretty_table};
use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle<B: KeyValueStore>(store: &LedgerStore<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(store, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let s = Summary::from_snapshot(&store.get_all(), store.get_monthly_budget(), &Local::now());
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &s)? {
        return Ok(());
    }
    let ccy = store.get_selected_currency();
    let rows = vec![
        vec!["Balance".to_string(), fmt_money(&s.total_balance, &ccy)],
        vec!["Income".to_string(), fmt_money(&s.total_income, &ccy)],
        vec!["Expense".to_string(), fmt_money(&s.total_expense, &ccy)],
        vec![
            "This month".to_string(),
            fmt_money(&s.monthly_expenses, &ccy),
        ],
        vec!["Budget".to_string(), fmt_money(&s.budget.budget, &ccy)],
        vec!["Remaining".to_string(), fmt_money(&s.budget.remaining, &ccy)],
    ];
    println!("{}", pretty_table(&["", "Amount"], rows));
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct CategoryRow {
    pub label: String,
    pub amount: Decimal,
    pub income: bool,
}

/// Category totals, largest first. An empty result means nothing to chart.
pub fn category_rows<B: KeyValueStore>(
    store: &LedgerStore<B>,
    sub: &clap::ArgMatches,
) -> Result<Vec<CategoryRow>> {
    let mut txns = store.get_all();
    if let Some(month) = sub.get_one::<String>("month") {
        let reference = local_noon(parse_month(month.trim())?)?;
        txns = transactions_in_month(&txns, &reference);
    }
    let mut rows: Vec<CategoryRow> = category_spending(&txns)
        .into_iter()
        .map(|(label, amount)| CategoryRow {
            income: is_income_label(&label),
            label,
            amount,
        })
        .collect();
    rows.sort_by(|a, b| b.amount.cmp(&a.amount));
    Ok(rows)
}

fn spend_by_category<B: KeyValueStore>(
    store: &LedgerStore<B>,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let rows = category_rows(store, sub)?;
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &rows)? {
        return Ok(());
    }
    if rows.is_empty() {
        println!("No transactions yet");
        return Ok(());
    }
    let total = saturating_sum(rows.iter().map(|r| r.amount));
    let ccy = store.get_selected_currency();
    let data = rows
        .iter()
        .map(|r| {
            let share = percent_of(r.amount, total).unwrap_or(Decimal::ZERO);
            vec![
                r.label.clone(),
                fmt_money(&r.amount, &ccy),
                format!("{:.1}%", share.round_dp(1)),
            ]
        })
        .collect();
    println!("{}", pretty_table(&["Category", "Amount", "Share"], data));
    Ok(())
}
