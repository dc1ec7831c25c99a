// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::errors::StoreError;

/// Scalar key-value persistence the ledger is built on.
///
/// Every write replaces the whole value under its key in one step.
pub trait KeyValueStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String, StoreError>;
    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn get_float(&self, key: &str, default: f64) -> Result<f64, StoreError>;
    fn put_float(&self, key: &str, value: f64) -> Result<(), StoreError>;
}

/// Process-local backend, used for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, bypassing defaults.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str, default: &str) -> Result<String, StoreError> {
        Ok(self.raw(key).unwrap_or_else(|| default.to_string()))
    }

    fn put_string(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn get_float(&self, key: &str, default: f64) -> Result<f64, StoreError> {
        match self.raw(key) {
            Some(value) => parse_float(key, &value),
            None => Ok(default),
        }
    }

    fn put_float(&self, key: &str, value: f64) -> Result<(), StoreError> {
        self.put_string(key, &value.to_string())
    }
}

pub(crate) fn parse_float(key: &str, value: &str) -> Result<f64, StoreError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| StoreError::InvalidFloat {
            key: key.to_string(),
            value: value.to_string(),
        })
}
