// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use chrono::{FixedOffset, TimeZone, Utc};
use common::{at, dec, expense, income};
use pocketledger::aggregate::{
    BudgetStatus, Summary, category_spending, is_income_label, monthly_expenses, total_balance,
    total_expense, total_income, transactions_in_month,
};
use pocketledger::{Transaction, TransactionType};
use rust_decimal::Decimal;

fn sample() -> Vec<Transaction> {
    vec![
        income("1", "1000", "Salary", at(2025, 2, 28)),
        expense("2", "45.25", "Food", at(2025, 3, 2)),
        expense("3", "14.75", "Food", at(2025, 3, 9)),
        expense("4", "120", "Bills", at(2025, 2, 3)),
        income("5", "80", "Food", at(2025, 3, 20)),
        expense("6", "0", "Other", at(2025, 3, 21)),
    ]
}

#[test]
fn empty_snapshot_is_all_zero() {
    let none: Vec<Transaction> = Vec::new();
    assert_eq!(total_balance(&none), Decimal::ZERO);
    assert_eq!(total_income(&none), Decimal::ZERO);
    assert_eq!(total_expense(&none), Decimal::ZERO);
    assert_eq!(monthly_expenses(&none, &at(2025, 3, 1)), Decimal::ZERO);
    assert!(category_spending(&none).is_empty());
}

#[test]
fn balance_is_income_minus_expense() {
    let txns = sample();
    assert_eq!(total_income(&txns), dec("1080"));
    assert_eq!(total_expense(&txns), dec("180"));
    assert_eq!(
        total_balance(&txns),
        total_income(&txns) - total_expense(&txns)
    );
}

#[test]
fn category_sums_cover_every_amount() {
    let txns = sample();
    let by_cat = category_spending(&txns);
    let sum: Decimal = by_cat.values().copied().sum();
    assert_eq!(sum, total_income(&txns) + total_expense(&txns));

    assert_eq!(by_cat["Food"], dec("60"));
    assert_eq!(by_cat["Income: Food"], dec("80"));
    assert_eq!(by_cat["Income: Salary"], dec("1000"));
    assert_eq!(by_cat["Other"], Decimal::ZERO);
    assert!(is_income_label("Income: Food"));
    assert!(!is_income_label("Food"));
}

#[test]
fn monthly_expenses_match_calendar_month_and_year() {
    let txns = vec![
        expense("a", "10", "Food", at(2025, 3, 1)),
        expense("b", "20", "Food", at(2024, 3, 15)),
        expense("c", "40", "Food", at(2025, 4, 1)),
        income("d", "80", "Salary", at(2025, 3, 10)),
    ];
    assert_eq!(monthly_expenses(&txns, &at(2025, 3, 31)), dec("10"));
    assert_eq!(transactions_in_month(&txns, &at(2025, 3, 5)).len(), 2);
}

#[test]
fn month_boundary_follows_the_reference_time_zone() {
    // 2025-03-31 23:30 UTC is already April in UTC+02:00.
    let late = Utc.with_ymd_and_hms(2025, 3, 31, 23, 30, 0).unwrap();
    let txns = vec![expense("a", "5", "Food", late)];

    let utc_ref = at(2025, 3, 15);
    let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
    let april_ref = plus_two.with_ymd_and_hms(2025, 4, 10, 9, 0, 0).unwrap();

    assert_eq!(monthly_expenses(&txns, &utc_ref), dec("5"));
    assert_eq!(monthly_expenses(&txns, &april_ref), dec("5"));
    assert_eq!(
        monthly_expenses(&txns, &plus_two.with_ymd_and_hms(2025, 3, 15, 9, 0, 0).unwrap()),
        Decimal::ZERO
    );
}

#[test]
fn budget_status_tracks_spend() {
    let st = BudgetStatus::new(dec("200"), dec("50"));
    assert_eq!(st.remaining, dec("150"));
    assert_eq!(st.percent_used, Some(dec("25")));
    assert!(!st.exceeded);

    let over = BudgetStatus::new(dec("40"), dec("50"));
    assert!(over.exceeded);
    assert_eq!(over.remaining, dec("-10"));

    let unset = BudgetStatus::new(Decimal::ZERO, dec("50"));
    assert_eq!(unset.percent_used, None);
    assert!(!unset.exceeded);
}

#[test]
fn summary_combines_totals_and_budget() {
    let txns = sample();
    let s = Summary::from_snapshot(&txns, dec("100"), &at(2025, 3, 25));
    assert_eq!(s.total_balance, dec("900"));
    assert_eq!(s.monthly_expenses, dec("60"));
    assert_eq!(s.budget.remaining, dec("40"));
    assert_eq!(s.budget.percent_used, Some(dec("60")));
}

#[test]
fn sums_saturate_instead_of_overflowing() {
    let txns = vec![
        Transaction::with_id("1", Decimal::MAX, TransactionType::Income, "Salary", at(2025, 3, 1)),
        income("2", "1", "Salary", at(2025, 3, 2)),
        Transaction::with_id("3", Decimal::MAX, TransactionType::Expense, "Rent", at(2025, 3, 3)),
        expense("4", "1", "Rent", at(2025, 3, 4)),
    ];
    assert_eq!(total_income(&txns), Decimal::MAX);
    assert_eq!(total_expense(&txns), Decimal::MAX);
    assert_eq!(total_balance(&txns), Decimal::ZERO);
    assert_eq!(monthly_expenses(&txns, &at(2025, 3, 20)), Decimal::MAX);
    assert_eq!(category_spending(&txns)["Rent"], Decimal::MAX);

    let st = BudgetStatus::new(dec("0.5"), Decimal::MAX);
    assert!(st.exceeded);
    assert_eq!(st.percent_used, Some(Decimal::MAX));
    assert_eq!(st.remaining, dec("0.5") - Decimal::MAX);
}
