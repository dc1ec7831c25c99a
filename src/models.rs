// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::InvalidTransaction;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Prefix of income labels in category breakdowns. Reserved, so no stored
/// category may start with it.
pub const INCOME_LABEL_PREFIX: &str = "Income: ";

/// Largest amount accepted, in whole units. Amounts are stored as JSON
/// floats and must decode back into the same record.
pub const MAX_AMOUNT_UNITS: i64 = 1_000_000_000_000_000;

/// Currency codes offered by the settings screen. Any well-formed code is accepted.
pub const SUPPORTED_CURRENCIES: [&str; 19] = [
    "USD", "EUR", "GBP", "JPY", "INR", "AUD", "CAD", "LKR", "CNY", "SGD", "MYR", "THB", "IDR",
    "PHP", "VND", "KRW", "AED", "SAR", "QAR",
];

pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food",
    "Transport",
    "Shopping",
    "Bills",
    "Entertainment",
    "Health",
    "Education",
    "Salary",
    "Investment",
    "Other",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionType::Income => f.write_str("INCOME"),
            TransactionType::Expense => f.write_str("EXPENSE"),
        }
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionType::Income),
            "expense" | "out" => Ok(TransactionType::Expense),
            other => Err(format!(
                "Invalid transaction type '{}', expected income|expense",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub r#type: TransactionType,
    pub category: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub date: DateTime<Utc>,
}

impl Transaction {
    /// Creates a record with a freshly generated id.
    pub fn new(
        amount: Decimal,
        r#type: TransactionType,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), amount, r#type, category, date)
    }

    /// Dates are cut to whole milliseconds, the precision they are stored at.
    pub fn with_id(
        id: impl Into<String>,
        amount: Decimal,
        r#type: TransactionType,
        category: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            r#type,
            category: category.into(),
            date: date.trunc_subsecs(3),
        }
    }

    pub fn is_expense(&self) -> bool {
        self.r#type == TransactionType::Expense
    }

    pub fn validate(&self) -> Result<(), InvalidTransaction> {
        if self.id.trim().is_empty() {
            return Err(InvalidTransaction::EmptyId);
        }
        if self.category.trim().is_empty() {
            return Err(InvalidTransaction::EmptyCategory(self.id.clone()));
        }
        if self.category.trim_start().starts_with(INCOME_LABEL_PREFIX) {
            return Err(InvalidTransaction::ReservedCategory {
                id: self.id.clone(),
                category: self.category.clone(),
            });
        }
        if self.amount < Decimal::ZERO {
            return Err(InvalidTransaction::NegativeAmount {
                id: self.id.clone(),
                amount: self.amount,
            });
        }
        let survives_float = self
            .amount
            .to_f64()
            .and_then(Decimal::from_f64)
            .is_some();
        if self.amount > Decimal::from(MAX_AMOUNT_UNITS) || !survives_float {
            return Err(InvalidTransaction::AmountOutOfRange {
                id: self.id.clone(),
                amount: self.amount,
            });
        }
        Ok(())
    }
}

/// A three-letter currency code, upper-cased. Display label only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Accepts `usd`, `USD` or a picker label such as `USD - US Dollar`.
    pub fn parse(s: &str) -> Option<Self> {
        let head = s.trim().split(|c: char| !c.is_ascii_alphabetic()).next()?;
        if head.len() == 3 && head.chars().all(|c| c.is_ascii_alphabetic()) {
            Some(Self(head.to_ascii_uppercase()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
