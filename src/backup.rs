// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::backend::KeyValueStore;
use crate::codec;
use crate::errors::BackupError;
use crate::ledger::LedgerStore;

pub const BACKUP_FILE_NAME: &str = "transactions_backup.json";
const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    Restored { count: usize },
    NoBackup,
}

/// Single-slot JSON backup of the transaction list.
#[derive(Debug, Clone)]
pub struct BackupService {
    path: PathBuf,
}

impl BackupService {
    /// Backups live at a fixed name inside `files_dir`.
    pub fn in_dir(files_dir: &Path) -> Self {
        Self {
            path: files_dir.join(BACKUP_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the current collection over any previous backup. A corrupt
    /// ledger fails here instead of replacing a good backup with `[]`.
    pub fn backup<B: KeyValueStore>(&self, store: &LedgerStore<B>) -> Result<usize, BackupError> {
        let transactions = store.load()?;
        let json = codec::encode_pretty(&transactions).map_err(BackupError::Encode)?;
        write_atomic(&self.path, &json)?;
        info!(count = transactions.len(), path = %self.path.display(), "backup written");
        Ok(transactions.len())
    }

    /// Replaces the whole collection with the backup's contents. The ledger is
    /// left as it was when the file is missing or does not decode.
    pub fn restore<B: KeyValueStore>(
        &self,
        store: &LedgerStore<B>,
    ) -> Result<RestoreOutcome, BackupError> {
        if !self.path.exists() {
            return Ok(RestoreOutcome::NoBackup);
        }
        let json = fs::read_to_string(&self.path)?;
        let transactions = codec::decode_strict(&json).map_err(BackupError::Malformed)?;
        store.save_all(&transactions)?;
        info!(count = transactions.len(), "backup restored");
        Ok(RestoreOutcome::Restored {
            count: transactions.len(),
        })
    }
}

fn write_atomic(path: &Path, data: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(TMP_SUFFIX);
    fs::write(&tmp, data)?;
    fs::rename(tmp, path)
}
