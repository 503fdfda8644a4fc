// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::balance::resolve_balance;
use crate::metrics::error::{Approximation, Estimate};
use crate::metrics::recurring::{next_occurrence, occurrences_in, WEEKS_PER_MONTH};
use crate::metrics::snapshot::Snapshot;
use crate::models::{AccountType, Cadence, TransactionType};
use crate::utils::{month_bounds, month_key, next_month, prev_month};

/// Checking balances below this figure trigger the low-cash warning.
pub const LOW_CASH_FLOOR: Decimal = Decimal::from_parts(500, 0, 0, false, 0);

/// One month of money movement. `net = income - expenses - bills`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashFlowSummary {
    pub income: Decimal,
    pub expenses: Decimal,
    pub bills: Decimal,
    pub net: Decimal,
}

/// A budget category whose month-to-date spend exceeds its budgeted figure.
#[derive(Debug, Clone, Serialize)]
pub struct Overspend {
    pub category: String,
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub over_by: Decimal,
}

/// Sum of resolved balances over all non-archived accounts.
///
/// Balances stay signed: a credit card resolved to -1200 subtracts 1200,
/// with no special-casing by account type.
pub fn net_worth(snapshot: &Snapshot) -> Decimal {
    snapshot
        .accounts
        .iter()
        .filter(|a| !a.archived)
        .map(|a| resolve_balance(a, &snapshot.transactions))
        .sum()
}

/// Resolved balances of non-archived checking and savings accounts.
pub fn liquid_cash(snapshot: &Snapshot) -> Decimal {
    snapshot
        .accounts
        .iter()
        .filter(|a| !a.archived && a.kind.is_liquid())
        .map(|a| resolve_balance(a, &snapshot.transactions))
        .sum()
}

fn checking_cash(snapshot: &Snapshot) -> Decimal {
    snapshot
        .accounts
        .iter()
        .filter(|a| !a.archived && a.kind == AccountType::Checking)
        .map(|a| resolve_balance(a, &snapshot.transactions))
        .sum()
}

/// Discretionary cash available today: checking balances minus uncancelled
/// bills still due later this month, floored at zero.
///
/// A bill counts when its next occurrence from `today` lands inside
/// `today`'s month, so bills due early next month are not subtracted yet.
pub fn safe_to_spend(snapshot: &Snapshot, today: NaiveDate) -> Estimate<Decimal> {
    let (_, month_end) = month_bounds(today.year(), today.month());
    let upcoming: Decimal = snapshot
        .subscriptions
        .iter()
        .filter(|s| !s.cancelled)
        .filter(|s| next_occurrence(&s.cadence, today) < month_end)
        .map(|s| s.amount)
        .sum();
    let available = (checking_cash(snapshot) - upcoming).max(Decimal::ZERO);
    Estimate::approximate(available, vec![Approximation::SingleMonthBillLookahead])
}

pub fn low_cash_warning(snapshot: &Snapshot) -> bool {
    checking_cash(snapshot) < LOW_CASH_FLOOR
}

/// Actual cash flow for one calendar month.
///
/// Transactions are partitioned into the half-open `[first, first-of-next)`
/// window; income sums signed income amounts, expenses sum absolute expense
/// amounts, and each uncancelled bill contributes its amount once per
/// occurrence inside the window.
pub fn month_flow(snapshot: &Snapshot, year: i32, month: u32) -> CashFlowSummary {
    let (start, end) = month_bounds(year, month);
    let in_window = |d: NaiveDate| d >= start && d < end;

    let income: Decimal = snapshot
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Income && in_window(t.date))
        .map(|t| t.amount)
        .sum();
    let expenses: Decimal = snapshot
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense && in_window(t.date))
        .map(|t| t.amount.abs())
        .sum();
    let bills: Decimal = snapshot
        .subscriptions
        .iter()
        .filter(|s| !s.cancelled)
        .map(|s| s.amount * Decimal::from(occurrences_in(&s.cadence, start, end)))
        .sum();

    CashFlowSummary {
        income,
        expenses,
        bills,
        net: income - expenses - bills,
    }
}

/// Rough projection for the month after `today`.
///
/// Income repeats last month's income; expenses extrapolate last month's
/// mean expense per transaction over thirty days; bills take next month's
/// monthly and yearly charges plus weekly charges at 4.33 weeks.
pub fn project_next_month(snapshot: &Snapshot, today: NaiveDate) -> Estimate<CashFlowSummary> {
    let (last_year, last_month) = prev_month(today.year(), today.month());
    let (last_start, last_end) = month_bounds(last_year, last_month);
    let (_, next_month_no) = next_month(today.year(), today.month());

    let income: Decimal = snapshot
        .transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionType::Income && t.date >= last_start && t.date < last_end
        })
        .map(|t| t.amount)
        .sum();

    let last_expenses: Vec<Decimal> = snapshot
        .transactions
        .iter()
        .filter(|t| {
            t.kind == TransactionType::Expense && t.date >= last_start && t.date < last_end
        })
        .map(|t| t.amount.abs())
        .collect();
    let expenses = if last_expenses.is_empty() {
        Decimal::ZERO
    } else {
        let total: Decimal = last_expenses.iter().copied().sum();
        total / Decimal::from(last_expenses.len() as u64) * Decimal::from(30)
    };

    let mut notes = vec![Approximation::ThirtyDayExpenseExtrapolation];
    let mut bills = Decimal::ZERO;
    for sub in snapshot.subscriptions.iter().filter(|s| !s.cancelled) {
        match sub.cadence {
            Cadence::Monthly { .. } => bills += sub.amount,
            Cadence::Yearly { due_month } => {
                if due_month == next_month_no {
                    bills += sub.amount;
                }
            }
            Cadence::Weekly { .. } => {
                bills += sub.amount * WEEKS_PER_MONTH;
                if !notes.contains(&Approximation::WeeklyMonthlyEquivalent) {
                    notes.push(Approximation::WeeklyMonthlyEquivalent);
                }
            }
        }
    }
    Estimate::approximate(
        CashFlowSummary {
            income,
            expenses,
            bills,
            net: income - expenses - bills,
        },
        notes,
    )
}

/// Budget categories overspent in the given month.
pub fn overspent_categories(snapshot: &Snapshot, year: i32, month: u32) -> Vec<Overspend> {
    let key = month_key(year, month);
    let (start, end) = month_bounds(year, month);
    snapshot
        .budgets
        .iter()
        .filter(|b| b.month == key)
        .filter_map(|b| {
            let spent: Decimal = snapshot
                .transactions
                .iter()
                .filter(|t| {
                    t.kind == TransactionType::Expense
                        && t.category == b.category
                        && t.date >= start
                        && t.date < end
                })
                .map(|t| t.amount.abs())
                .sum();
            if spent > b.budgeted {
                Some(Overspend {
                    category: b.category.clone(),
                    budgeted: b.budgeted,
                    spent,
                    over_by: spent - b.budgeted,
                })
            } else {
                None
            }
        })
        .collect()
}
