// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! JSON codec for the transaction list.
//!
//! The same format is used for the stored collection and for backup files: a
//! JSON array of `{id, amount, type, category, date}` objects. Decoding checks
//! each record on its own so one bad entry does not take the whole list with it.

use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::errors::CodecError;
use crate::models::Transaction;

/// A stored record that failed to decode or validate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRecord {
    pub index: usize,
    pub reason: String,
    pub raw: Value,
}

#[derive(Debug, Default)]
pub struct Decoded {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedRecord>,
}

pub fn encode(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string(transactions)
}

pub fn encode_pretty(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(transactions)
}

/// Decodes a document, setting aside records that do not pass validation.
///
/// A blank document or `null` decodes to an empty list. Anything that is not
/// an array is an error.
pub fn decode_lenient(json: &str) -> Result<Decoded, CodecError> {
    let items = match parse_document(json)? {
        Some(items) => items,
        None => return Ok(Decoded::default()),
    };

    let mut seen = HashSet::new();
    let mut decoded = Decoded::default();
    for (index, raw) in items.into_iter().enumerate() {
        match check_record(&raw, &mut seen) {
            Ok(txn) => decoded.transactions.push(txn),
            Err(reason) => decoded.rejected.push(RejectedRecord { index, reason, raw }),
        }
    }
    Ok(decoded)
}

/// Decodes a document, failing on the first bad record.
pub fn decode_strict(json: &str) -> Result<Vec<Transaction>, CodecError> {
    let items = match parse_document(json)? {
        Some(items) => items,
        None => return Ok(Vec::new()),
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(items.len());
    for (index, raw) in items.iter().enumerate() {
        let txn: Transaction =
            serde_json::from_value(raw.clone()).map_err(|e| CodecError::InvalidRecord {
                index,
                reason: e.to_string(),
            })?;
        txn.validate().map_err(|e| CodecError::InvalidRecord {
            index,
            reason: e.to_string(),
        })?;
        if !seen.insert(txn.id.clone()) {
            return Err(CodecError::DuplicateId(txn.id));
        }
        out.push(txn);
    }
    Ok(out)
}

fn parse_document(json: &str) -> Result<Option<Vec<Value>>, CodecError> {
    let trimmed = json.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match serde_json::from_str::<Value>(trimmed)? {
        Value::Null => Ok(None),
        Value::Array(items) => Ok(Some(items)),
        _ => Err(CodecError::NotAnArray),
    }
}

fn check_record(raw: &Value, seen: &mut HashSet<String>) -> Result<Transaction, String> {
    let txn: Transaction = serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;
    txn.validate().map_err(|e| e.to_string())?;
    if !seen.insert(txn.id.clone()) {
        return Err(format!("duplicate transaction id '{}'", txn.id));
    }
    Ok(txn)
}
