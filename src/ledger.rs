// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! The transaction ledger over a key-value backend.
//!
//! Reads never fail: a missing or unreadable value falls back to a default.
//! Every fallback is recorded as a [`Diagnostic`] and logged, so callers that
//! care can tell a real empty ledger from a corrupt one.

use std::cell::RefCell;
use std::collections::HashSet;

use chrono::Local;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::aggregate;
use crate::backend::KeyValueStore;
use crate::codec::{self, RejectedRecord};
use crate::errors::{LedgerError, StoreError};
use crate::models::{CurrencyCode, DEFAULT_CURRENCY, Transaction};

pub const KEY_TRANSACTIONS: &str = "transactions";
pub const KEY_QUARANTINE: &str = "transactions_quarantine";
pub const KEY_MONTHLY_BUDGET: &str = "monthly_budget";
pub const KEY_SELECTED_CURRENCY: &str = "selected_currency";

const EMPTY_COLLECTION: &str = "[]";

/// Diagnostics kept in memory; older entries are dropped first.
pub const MAX_DIAGNOSTICS: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The stored collection could not be parsed and was read as empty.
    CorruptCollection { error: String },
    /// Some stored records failed validation and were left out of reads.
    QuarantinedRecords { rejected: Vec<RejectedRecord> },
    /// A full write failed and the empty collection was persisted instead.
    SaveFellBackToEmpty { error: String },
    /// Both the write and the empty fallback failed.
    FallbackWriteFailed { error: String },
    /// `add` was refused because the current collection could not be read.
    AddRefused { id: String, error: String },
    UpdateTargetMissing { id: String },
    SettingUnreadable { key: String, error: String },
    SettingWriteFailed { key: String, error: String },
    InvalidCurrency { value: String },
    InvalidBudget { value: String },
}

pub struct LedgerStore<B> {
    backend: B,
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl<B: KeyValueStore> LedgerStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            diagnostics: RefCell::new(Vec::new()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn take_diagnostics(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.diagnostics.borrow_mut())
    }

    /// Repeats of the most recent diagnostic are logged but not stored again.
    fn record(&self, diagnostic: Diagnostic) {
        warn!(?diagnostic, "ledger fallback");
        let mut diagnostics = self.diagnostics.borrow_mut();
        if diagnostics.last() == Some(&diagnostic) {
            return;
        }
        if diagnostics.len() >= MAX_DIAGNOSTICS {
            diagnostics.remove(0);
        }
        diagnostics.push(diagnostic);
    }

    // Transactions

    /// All transactions in insertion order; empty if nothing readable is stored.
    pub fn get_all(&self) -> Vec<Transaction> {
        match self.read_collection() {
            Ok((transactions, _)) => transactions,
            Err(e) => {
                self.record(Diagnostic::CorruptCollection {
                    error: e.to_string(),
                });
                Vec::new()
            }
        }
    }

    /// Like [`get_all`](Self::get_all), but a corrupt collection is an error.
    pub fn load(&self) -> Result<Vec<Transaction>, LedgerError> {
        self.read_collection().map(|(transactions, _)| transactions)
    }

    fn read_collection(&self) -> Result<(Vec<Transaction>, Vec<RejectedRecord>), LedgerError> {
        let json = self.backend.get_string(KEY_TRANSACTIONS, EMPTY_COLLECTION)?;
        let decoded =
            codec::decode_lenient(&json).map_err(|e| LedgerError::Corrupt(e.to_string()))?;
        if !decoded.rejected.is_empty() {
            self.record(Diagnostic::QuarantinedRecords {
                rejected: decoded.rejected.clone(),
            });
        }
        Ok((decoded.transactions, decoded.rejected))
    }

    /// Replaces the whole collection in a single write.
    ///
    /// If the write fails the empty collection is persisted in its place and
    /// the original failure is returned.
    pub fn save_all(&self, transactions: &[Transaction]) -> Result<(), LedgerError> {
        let mut seen = HashSet::new();
        for txn in transactions {
            txn.validate()?;
            if !seen.insert(txn.id.as_str()) {
                return Err(LedgerError::DuplicateId(txn.id.clone()));
            }
        }

        let written = codec::encode(transactions)
            .map_err(|e| LedgerError::Codec(e.into()))
            .and_then(|json| Ok(self.backend.put_string(KEY_TRANSACTIONS, &json)?));
        match written {
            Ok(()) => {
                debug!(count = transactions.len(), "saved transactions");
                Ok(())
            }
            Err(e) => {
                match self.backend.put_string(KEY_TRANSACTIONS, EMPTY_COLLECTION) {
                    Ok(()) => self.record(Diagnostic::SaveFellBackToEmpty {
                        error: e.to_string(),
                    }),
                    Err(fallback) => self.record(Diagnostic::FallbackWriteFailed {
                        error: format!("{}; fallback: {}", e, fallback),
                    }),
                }
                Err(e)
            }
        }
    }

    /// Appends a transaction. Refuses to write over a collection it cannot read.
    pub fn add(&self, transaction: Transaction) -> Result<(), LedgerError> {
        transaction.validate()?;
        let (mut transactions, rejected) = match self.read_collection() {
            Ok(read) => read,
            Err(e) => {
                self.record(Diagnostic::AddRefused {
                    id: transaction.id.clone(),
                    error: e.to_string(),
                });
                return Err(e);
            }
        };
        if transactions.iter().any(|t| t.id == transaction.id) {
            return Err(LedgerError::DuplicateId(transaction.id));
        }
        info!(id = %transaction.id, "adding transaction");
        transactions.push(transaction);
        self.rewrite(&transactions, &rejected)
    }

    /// Replaces the stored record with the same id, keeping its position.
    ///
    /// Returns `Ok(false)` when no record has that id; the collection is
    /// re-saved unchanged in that case.
    pub fn update(&self, transaction: Transaction) -> Result<bool, LedgerError> {
        transaction.validate()?;
        let (mut transactions, rejected) = self.read_collection()?;
        match transactions.iter().position(|t| t.id == transaction.id) {
            Some(index) => {
                info!(id = %transaction.id, "updating transaction");
                transactions[index] = transaction;
                self.rewrite(&transactions, &rejected)?;
                Ok(true)
            }
            None => {
                self.record(Diagnostic::UpdateTargetMissing {
                    id: transaction.id.clone(),
                });
                self.rewrite(&transactions, &rejected)?;
                Ok(false)
            }
        }
    }

    pub fn delete(&self, transaction: &Transaction) -> Result<usize, LedgerError> {
        self.delete_by_id(&transaction.id)
    }

    /// Removes every record with `id`, returning how many were removed.
    pub fn delete_by_id(&self, id: &str) -> Result<usize, LedgerError> {
        let (mut transactions, rejected) = self.read_collection()?;
        let before = transactions.len();
        transactions.retain(|t| t.id != id);
        let removed = before - transactions.len();
        if removed > 0 {
            info!(id, removed, "deleted transaction");
        }
        self.rewrite(&transactions, &rejected)?;
        Ok(removed)
    }

    /// Saves a mutated collection. Rejected records are moved aside first so
    /// the rewrite does not drop them; if that fails nothing is rewritten.
    fn rewrite(
        &self,
        transactions: &[Transaction],
        rejected: &[RejectedRecord],
    ) -> Result<(), LedgerError> {
        if !rejected.is_empty() {
            self.quarantine(rejected)?;
        }
        self.save_all(transactions)
    }

    fn quarantine(&self, rejected: &[RejectedRecord]) -> Result<(), LedgerError> {
        let json = self.backend.get_string(KEY_QUARANTINE, EMPTY_COLLECTION)?;
        let mut held: Vec<Value> = serde_json::from_str(&json).map_err(|e| {
            LedgerError::Corrupt(format!("{} is unreadable: {}", KEY_QUARANTINE, e))
        })?;
        for record in rejected {
            if !held.contains(&record.raw) {
                held.push(record.raw.clone());
            }
        }
        let written = serde_json::to_string(&held)
            .map_err(|e| LedgerError::Codec(e.into()))
            .and_then(|json| Ok(self.backend.put_string(KEY_QUARANTINE, &json)?));
        if let Err(e) = &written {
            self.setting_write_failed_msg(KEY_QUARANTINE, e.to_string());
        }
        written
    }

    /// Raw records set aside by earlier rewrites.
    pub fn quarantined(&self) -> Vec<Value> {
        self.backend
            .get_string(KEY_QUARANTINE, EMPTY_COLLECTION)
            .ok()
            .and_then(|json| serde_json::from_str::<Vec<Value>>(&json).ok())
            .unwrap_or_default()
    }

    // Settings

    pub fn get_monthly_budget(&self) -> Decimal {
        let raw = match self.backend.get_float(KEY_MONTHLY_BUDGET, 0.0) {
            Ok(v) => v,
            Err(e) => {
                self.setting_unreadable(KEY_MONTHLY_BUDGET, e);
                return Decimal::ZERO;
            }
        };
        match Decimal::try_from(raw) {
            Ok(budget) if budget >= Decimal::ZERO => budget,
            _ => {
                self.record(Diagnostic::InvalidBudget {
                    value: raw.to_string(),
                });
                Decimal::ZERO
            }
        }
    }

    /// Stores the monthly budget. Returns `false` if nothing was written;
    /// the reason is recorded as a diagnostic.
    pub fn save_monthly_budget(&self, budget: Decimal) -> bool {
        let value = match budget.to_f64() {
            Some(v) if budget >= Decimal::ZERO => v,
            _ => {
                self.record(Diagnostic::InvalidBudget {
                    value: budget.to_string(),
                });
                return false;
            }
        };
        match self.backend.put_float(KEY_MONTHLY_BUDGET, value) {
            Ok(()) => true,
            Err(e) => {
                self.setting_write_failed(KEY_MONTHLY_BUDGET, e);
                false
            }
        }
    }

    pub fn get_selected_currency(&self) -> String {
        let raw = match self
            .backend
            .get_string(KEY_SELECTED_CURRENCY, DEFAULT_CURRENCY)
        {
            Ok(v) => v,
            Err(e) => {
                self.setting_unreadable(KEY_SELECTED_CURRENCY, e);
                return DEFAULT_CURRENCY.to_string();
            }
        };
        match CurrencyCode::parse(&raw) {
            Some(code) => code.to_string(),
            None => {
                self.record(Diagnostic::InvalidCurrency { value: raw });
                DEFAULT_CURRENCY.to_string()
            }
        }
    }

    /// Stores the selected currency. Values that are not a 3-letter code are
    /// dropped with a diagnostic and `false` is returned.
    pub fn set_selected_currency(&self, currency: &str) -> bool {
        let Some(code) = CurrencyCode::parse(currency) else {
            self.record(Diagnostic::InvalidCurrency {
                value: currency.to_string(),
            });
            return false;
        };
        match self
            .backend
            .put_string(KEY_SELECTED_CURRENCY, code.as_str())
        {
            Ok(()) => true,
            Err(e) => {
                self.setting_write_failed(KEY_SELECTED_CURRENCY, e);
                false
            }
        }
    }

    fn setting_unreadable(&self, key: &str, e: StoreError) {
        self.record(Diagnostic::SettingUnreadable {
            key: key.to_string(),
            error: e.to_string(),
        });
    }

    fn setting_write_failed(&self, key: &str, e: StoreError) {
        self.setting_write_failed_msg(key, e.to_string());
    }

    fn setting_write_failed_msg(&self, key: &str, error: String) {
        self.record(Diagnostic::SettingWriteFailed {
            key: key.to_string(),
            error,
        });
    }

    // Derived views

    /// Expenses in the current month of the local calendar.
    pub fn get_monthly_expenses(&self) -> Decimal {
        aggregate::monthly_expenses(&self.get_all(), &Local::now())
    }
}
