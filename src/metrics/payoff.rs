// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::error::MetricsError;
use crate::models::{Debt, Strategy};

/// Default ceiling on simulated months. Callers wanting a longer horizon
/// pass their own cap to [`plan_payoff_capped`].
pub const DEFAULT_PAYOFF_HORIZON_MONTHS: u32 = 60;

/// Payoff schedule for a single debt under the chosen strategy.
#[derive(Debug, Clone, Serialize)]
pub struct PayoffPlan {
    pub debt_id: i64,
    pub name: String,
    /// 1-based position in the strategy's payoff order.
    pub order: u32,
    pub balance: Decimal,
    /// First-month interest accrual at the current balance.
    pub monthly_interest: Decimal,
    /// Portion of the minimum payment hitting principal in the first month.
    pub principal_portion: Decimal,
    pub months_to_payoff: u32,
    /// Interest accumulated over the simulated horizon.
    pub total_interest: Decimal,
    /// Set when the horizon cap stopped the simulation before the balance
    /// reached zero.
    pub truncated: bool,
}

fn monthly_interest(balance: Decimal, apr: Decimal) -> Decimal {
    balance * apr / Decimal::from(100) / Decimal::from(12)
}

/// Orders debts by strategy and simulates each debt's standalone payoff.
///
/// Snowball sorts ascending by balance, avalanche descending by APR; the
/// sort is stable, so debts with equal keys keep their input order. Each
/// debt amortizes independently against its own minimum payment - freed-up
/// payments are not rolled into the next debt.
///
/// A debt whose minimum payment does not cover its first month of interest
/// fails the whole plan with [`MetricsError::NonAmortizing`].
pub fn plan_payoff(debts: &[Debt], strategy: Strategy) -> Result<Vec<PayoffPlan>, MetricsError> {
    plan_payoff_capped(debts, strategy, DEFAULT_PAYOFF_HORIZON_MONTHS)
}

pub fn plan_payoff_capped(
    debts: &[Debt],
    strategy: Strategy,
    horizon_months: u32,
) -> Result<Vec<PayoffPlan>, MetricsError> {
    if horizon_months == 0 {
        return Err(MetricsError::InvalidConfiguration(
            "payoff horizon must be at least one month".to_string(),
        ));
    }

    let mut ordered: Vec<&Debt> = debts.iter().collect();
    match strategy {
        Strategy::Snowball => ordered.sort_by(|a, b| a.balance.cmp(&b.balance)),
        Strategy::Avalanche => ordered.sort_by(|a, b| b.apr.cmp(&a.apr)),
    }

    let mut plans = Vec::with_capacity(ordered.len());
    for (idx, debt) in ordered.iter().enumerate() {
        let plan = simulate(debt, idx as u32 + 1, horizon_months)?;
        plans.push(plan);
    }
    Ok(plans)
}

fn simulate(debt: &Debt, order: u32, horizon_months: u32) -> Result<PayoffPlan, MetricsError> {
    let first_interest = monthly_interest(debt.balance, debt.apr);
    let first_principal = debt.minimum_payment - first_interest;
    if debt.balance > Decimal::ZERO && first_principal <= Decimal::ZERO {
        return Err(MetricsError::NonAmortizing {
            name: debt.name.clone(),
            minimum_payment: debt.minimum_payment,
            monthly_interest: first_interest,
        });
    }

    let mut balance = debt.balance;
    let mut months = 0;
    let mut total_interest = Decimal::ZERO;
    while balance > Decimal::ZERO && months < horizon_months {
        let interest = monthly_interest(balance, debt.apr);
        let principal = debt.minimum_payment - interest;
        total_interest += interest;
        balance = (balance - principal).max(Decimal::ZERO);
        months += 1;
    }

    Ok(PayoffPlan {
        debt_id: debt.id,
        name: debt.name.clone(),
        order,
        balance: debt.balance,
        monthly_interest: first_interest,
        principal_portion: first_principal,
        months_to_payoff: months,
        total_interest,
        truncated: balance > Decimal::ZERO,
    })
}

/// Outstanding balance across all debts.
pub fn total_debt(debts: &[Debt]) -> Decimal {
    debts.iter().map(|d| d.balance).sum()
}

/// Combined minimum payments due each month.
pub fn total_minimum_payments(debts: &[Debt]) -> Decimal {
    debts.iter().map(|d| d.minimum_payment).sum()
}

/// Interest accruing across all debts in the current month.
pub fn total_monthly_interest(debts: &[Debt]) -> Decimal {
    debts
        .iter()
        .map(|d| monthly_interest(d.balance, d.apr))
        .sum()
}
