// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals and breakdowns computed from a snapshot of transactions.
//!
//! Sums saturate at the `Decimal` bounds instead of overflowing.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Transaction, TransactionType};

pub use crate::models::INCOME_LABEL_PREFIX;

pub fn total_income(txns: &[Transaction]) -> Decimal {
    sum_of(txns, TransactionType::Income)
}

pub fn total_expense(txns: &[Transaction]) -> Decimal {
    sum_of(txns, TransactionType::Expense)
}

pub fn total_balance(txns: &[Transaction]) -> Decimal {
    saturating_sub(total_income(txns), total_expense(txns))
}

fn sum_of(txns: &[Transaction], kind: TransactionType) -> Decimal {
    saturating_sum(txns.iter().filter(|t| t.r#type == kind).map(|t| t.amount))
}

pub fn saturating_sum<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts.into_iter().fold(Decimal::ZERO, saturating_add)
}

fn saturating_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MIN
    } else {
        Decimal::MAX
    })
}

fn saturating_sub(a: Decimal, b: Decimal) -> Decimal {
    a.checked_sub(b).unwrap_or(if b.is_sign_negative() {
        Decimal::MAX
    } else {
        Decimal::MIN
    })
}

/// `part` as a percentage of `whole`, rounded to 2 places. `None` when
/// `whole` is zero.
pub fn percent_of(part: Decimal, whole: Decimal) -> Option<Decimal> {
    if whole.is_zero() {
        return None;
    }
    let percent = part
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|scaled| scaled.checked_div(whole))
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        });
    Some(percent.round_dp(2))
}

/// True when `date` is in the same calendar month as `reference`, judged in
/// the reference's time zone.
pub fn same_month<Tz: TimeZone>(date: &DateTime<Utc>, reference: &DateTime<Tz>) -> bool {
    let local = date.with_timezone(&reference.timezone());
    local.year() == reference.year() && local.month() == reference.month()
}

pub fn transactions_in_month<Tz: TimeZone>(
    txns: &[Transaction],
    reference: &DateTime<Tz>,
) -> Vec<Transaction> {
    txns.iter()
        .filter(|t| same_month(&t.date, reference))
        .cloned()
        .collect()
}

pub fn monthly_expenses<Tz: TimeZone>(txns: &[Transaction], reference: &DateTime<Tz>) -> Decimal {
    saturating_sum(
        txns.iter()
            .filter(|t| t.is_expense() && same_month(&t.date, reference))
            .map(|t| t.amount),
    )
}

/// Sums per category label. Income categories carry [`INCOME_LABEL_PREFIX`]
/// so they never merge with an expense category of the same name.
pub fn category_spending(txns: &[Transaction]) -> BTreeMap<String, Decimal> {
    let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
    for t in txns {
        let label = match t.r#type {
            TransactionType::Income => format!("{}{}", INCOME_LABEL_PREFIX, t.category),
            TransactionType::Expense => t.category.clone(),
        };
        let total = agg.entry(label).or_insert(Decimal::ZERO);
        *total = saturating_add(*total, t.amount);
    }
    agg
}

pub fn is_income_label(label: &str) -> bool {
    label.starts_with(INCOME_LABEL_PREFIX)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    /// `None` while no budget is set.
    pub percent_used: Option<Decimal>,
    pub exceeded: bool,
}

impl BudgetStatus {
    pub fn new(budget: Decimal, spent: Decimal) -> Self {
        Self {
            budget,
            spent,
            remaining: saturating_sub(budget, spent),
            percent_used: percent_of(spent, budget),
            exceeded: !budget.is_zero() && spent > budget,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub total_balance: Decimal,
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub monthly_expenses: Decimal,
    pub budget: BudgetStatus,
}

impl Summary {
    pub fn from_snapshot<Tz: TimeZone>(
        txns: &[Transaction],
        monthly_budget: Decimal,
        reference: &DateTime<Tz>,
    ) -> Self {
        let monthly = monthly_expenses(txns, reference);
        Self {
            total_balance: total_balance(txns),
            total_income: total_income(txns),
            total_expense: total_expense(txns),
            monthly_expenses: monthly,
            budget: BudgetStatus::new(monthly_budget, monthly),
        }
    }
}
