// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::Cell;

use chrono::{DateTime, TimeZone, Utc};
use pocketledger::errors::StoreError;
use pocketledger::{KeyValueStore, MemoryStore, Transaction, TransactionType};
use rust_decimal::Decimal;

pub fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
}

pub fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

pub fn expense(id: &str, amount: &str, category: &str, date: DateTime<Utc>) -> Transaction {
    Transaction::with_id(id, dec(amount), TransactionType::Expense, category, date)
}

pub fn income(id: &str, amount: &str, category: &str, date: DateTime<Utc>) -> Transaction {
    Transaction::with_id(id, dec(amount), TransactionType::Income, category, date)
}

/// Memory backend whose non-empty collection writes, quarantine writes or
/// all writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_collection_writes: Cell<bool>,
    pub fail_quarantine_writes: Cell<bool>,
    pub fail_all_writes: Cell<bool>,
}

impl KeyValueStore for FlakyStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String, StoreError> {
        self.inner.get_string(key, default)
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_all_writes.get()
            || (self.fail_collection_writes.get() && key == "transactions" && value != "[]")
            || (self.fail_quarantine_writes.get() && key == "transactions_quarantine")
        {
            return Err(StoreError::Unavailable("disk full".into()));
        }
        self.inner.put_string(key, value)
    }

    fn get_float(&self, key: &str, default: f64) -> Result<f64, StoreError> {
        self.inner.get_float(key, default)
    }

    fn put_float(&self, key: &str, value: f64) -> Result<(), StoreError> {
        if self.fail_all_writes.get() {
            return Err(StoreError::Unavailable("disk full".into()));
        }
        self.inner.put_float(key, value)
    }
}
