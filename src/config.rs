// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use std::fs;
use std::path::{Path, PathBuf};

use crate::backup::BackupService;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.example", "ImiliPocket", "pocketledger"));

pub const DATA_DIR_ENV: &str = "POCKETLEDGER_DATA_DIR";
const DB_FILE_NAME: &str = "pocketledger.sqlite";

/// Where the ledger keeps its files.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Uses `data_dir` when given, the platform data directory otherwise.
    pub fn resolve(data_dir: Option<&Path>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => ProjectDirs::from(APP.0, APP.1, APP.2)
                .context("Could not determine platform-specific data dir")?
                .data_dir()
                .to_path_buf(),
        };
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data dir {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    pub fn backup_service(&self) -> BackupService {
        BackupService::in_dir(&self.data_dir)
    }
}
