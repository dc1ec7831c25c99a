// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod backend;
pub mod backup;
pub mod cli;
pub mod codec;
pub mod commands;
pub mod config;
pub mod db;
pub mod errors;
pub mod ledger;
pub mod logging;
pub mod models;
pub mod utils;

pub use backend::{KeyValueStore, MemoryStore};
pub use backup::{BackupService, RestoreOutcome};
pub use db::SqliteStore;
pub use ledger::{Diagnostic, LedgerStore};
pub use models::{Transaction, TransactionType};
