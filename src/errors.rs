// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by a key-value persistence backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("value '{value}' stored under '{key}' is not a number")]
    InvalidFloat { key: String, value: String },
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// A transaction that breaks one of the record rules.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidTransaction {
    #[error("transaction id is empty")]
    EmptyId,
    #[error("transaction '{0}' has an empty category")]
    EmptyCategory(String),
    #[error("transaction '{id}' has a negative amount ({amount})")]
    NegativeAmount { id: String, amount: Decimal },
    #[error("transaction '{id}' amount {amount} is too large to store")]
    AmountOutOfRange { id: String, amount: Decimal },
    #[error("transaction '{id}' uses reserved category '{category}'")]
    ReservedCategory { id: String, category: String },
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("expected a JSON array of transactions")]
    NotAnArray,
    #[error("record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },
    #[error("duplicate transaction id '{0}'")]
    DuplicateId(String),
}

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Invalid(#[from] InvalidTransaction),
    #[error("a transaction with id '{0}' already exists")]
    DuplicateId(String),
    #[error("stored transactions are unreadable: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backup file is malformed: {0}")]
    Malformed(#[source] CodecError),
    #[error("could not encode transactions: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
