// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::KeyValueStore;
use crate::ledger::{Diagnostic, LedgerStore};
use crate::utils::pretty_table;
use anyhow::Result;

/// Issue rows for everything a strict read turns up.
pub fn findings<B: KeyValueStore>(store: &LedgerStore<B>) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) Unreadable collection
    if let Err(e) = store.load() {
        rows.push(vec!["corrupt_collection".into(), e.to_string()]);
    }

    // 2) Records skipped by that read
    for d in store.take_diagnostics() {
        if let Diagnostic::QuarantinedRecords { rejected } = d {
            for r in rejected {
                rows.push(vec![
                    "invalid_record".into(),
                    format!("#{}: {}", r.index, r.reason),
                ]);
            }
        }
    }

    // 3) Records already moved aside
    let held = store.quarantined();
    if !held.is_empty() {
        rows.push(vec![
            "quarantined".into(),
            format!("{} record(s) held aside", held.len()),
        ]);
    }

    // 4) Settings that read back as defaults
    store.get_monthly_budget();
    store.get_selected_currency();
    for d in store.take_diagnostics() {
        match d {
            Diagnostic::InvalidBudget { value } => {
                rows.push(vec!["invalid_budget".into(), value])
            }
            Diagnostic::InvalidCurrency { value } => {
                rows.push(vec!["invalid_currency".into(), value])
            }
            Diagnostic::SettingUnreadable { key, error } => {
                rows.push(vec!["unreadable_setting".into(), format!("{}: {}", key, error)])
            }
            _ => {}
        }
    }
    rows
}

pub fn handle<B: KeyValueStore>(store: &LedgerStore<B>) -> Result<()> {
    let rows = findings(store);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
