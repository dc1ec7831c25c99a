// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::backend::KeyValueStore;
use crate::backup::{BackupService, RestoreOutcome};
use crate::ledger::LedgerStore;
use anyhow::{Context, Result};

pub fn backup<B: KeyValueStore>(store: &LedgerStore<B>, service: &BackupService) -> Result<()> {
    let count = service
        .backup(store)
        .with_context(|| format!("Backup failed: {}", service.path().display()))?;
    println!(
        "Backup successful: {} transactions written to {}",
        count,
        service.path().display()
    );
    Ok(())
}

pub fn restore<B: KeyValueStore>(store: &LedgerStore<B>, service: &BackupService) -> Result<()> {
    match service.restore(store).context("Restore failed")? {
        RestoreOutcome::Restored { count } => {
            println!("Restore successful: {} transactions", count)
        }
        RestoreOutcome::NoBackup => println!("No backup file found"),
    }
    Ok(())
}
