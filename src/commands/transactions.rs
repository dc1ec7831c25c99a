// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::aggregate::same_month;
use crate::backend::KeyValueStore;
use crate::ledger::LedgerStore;
use crate::models::{Transaction, TransactionType};
use crate::utils::{
    fmt_money, local_noon, local_noon_utc, maybe_print_json, parse_date, parse_decimal,
    parse_month, pretty_table,
};
use anyhow::{Context, Result, anyhow};
use chrono::{Local, Utc};
use serde::Serialize;

pub fn handle<B: KeyValueStore>(store: &LedgerStore<B>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(store, sub)?,
        Some(("list", sub)) => list(store, sub)?,
        Some(("update", sub)) => update(store, sub)?,
        Some(("rm", sub)) => remove(store, sub)?,
        _ => {}
    }
    Ok(())
}

fn parse_type(s: &str) -> Result<TransactionType> {
    s.parse::<TransactionType>().map_err(|e| anyhow!(e))
}

fn add<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap().trim())?;
    let kind = parse_type(sub.get_one::<String>("type").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap().trim().to_string();
    let date = match sub.get_one::<String>("date") {
        Some(d) => local_noon_utc(parse_date(d.trim())?)?,
        None => Utc::now(),
    };

    let txn = match sub.get_one::<String>("id") {
        Some(id) => Transaction::with_id(id.trim(), amount, kind, category, date),
        None => Transaction::new(amount, kind, category, date),
    };
    let id = txn.id.clone();
    store
        .add(txn)
        .with_context(|| format!("Failed to add transaction {}", id))?;
    println!(
        "Recorded {} {} ({}) as {}",
        kind,
        fmt_money(&amount, &store.get_selected_currency()),
        sub.get_one::<String>("category").unwrap().trim(),
        id
    );
    Ok(())
}

fn update<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let current = store.load()?;
    let mut txn = current
        .into_iter()
        .find(|t| t.id == id)
        .with_context(|| format!("Transaction '{}' not found", id))?;

    if let Some(a) = sub.get_one::<String>("amount") {
        txn.amount = parse_decimal(a.trim())?;
    }
    if let Some(t) = sub.get_one::<String>("type") {
        txn.r#type = parse_type(t)?;
    }
    if let Some(c) = sub.get_one::<String>("category") {
        txn.category = c.trim().to_string();
    }
    if let Some(d) = sub.get_one::<String>("date") {
        txn.date = local_noon_utc(parse_date(d.trim())?)?;
    }

    if store.update(txn)? {
        println!("Updated transaction {}", id);
    } else {
        println!("Transaction {} was not updated", id);
    }
    Ok(())
}

fn remove<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap().trim();
    let removed = store
        .delete_by_id(id)
        .with_context(|| format!("Failed to delete transaction {}", id))?;
    if removed == 0 {
        println!("No transaction with id {}", id);
    } else {
        println!("Deleted transaction {}", id);
    }
    Ok(())
}

fn list<B: KeyValueStore>(store: &LedgerStore<B>, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(store, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.date.clone(),
                    r.r#type.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.id.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Date", "Type", "Category", "Amount", "Id"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub date: String,
    pub r#type: String,
    pub category: String,
    pub amount: String,
}

/// Filtered listing, newest first. Reads through the lenient path so a damaged
/// ledger still lists as empty rather than failing.
pub fn query_rows<B: KeyValueStore>(
    store: &LedgerStore<B>,
    sub: &clap::ArgMatches,
) -> Result<Vec<TransactionRow>> {
    let mut txns = store.get_all();

    if let Some(month) = sub.get_one::<String>("month") {
        let reference = local_noon(parse_month(month.trim())?)?;
        txns.retain(|t| same_month(&t.date, &reference));
    }
    if let Some(ty) = sub.get_one::<String>("type") {
        let kind = parse_type(ty)?;
        txns.retain(|t| t.r#type == kind);
    }
    if let Some(cat) = sub.get_one::<String>("category") {
        txns.retain(|t| t.category.eq_ignore_ascii_case(cat.trim()));
    }
    // Stable sort keeps insertion order among same-instant records.
    txns.sort_by(|a, b| b.date.cmp(&a.date));
    if let Some(limit) = sub.get_one::<usize>("limit") {
        txns.truncate(*limit);
    }

    Ok(txns
        .into_iter()
        .map(|t| TransactionRow {
            date: t.date.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            r#type: t.r#type.to_string(),
            category: t.category,
            amount: format!("{:.2}", t.amount),
            id: t.id,
        })
        .collect())
}
