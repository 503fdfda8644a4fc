// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::error::MetricsError;
use crate::metrics::snapshot::Snapshot;
use crate::models::{Member, TransactionType};
use crate::utils::month_bounds;

/// Who owes whom after splitting a period's joint expenses evenly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OwedDirection {
    BOwesA,
    AOwesB,
    Even,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberTotal {
    pub member: Member,
    pub paid: Decimal,
}

/// Result of a settlement run over one period.
#[derive(Debug, Clone, Serialize)]
pub struct Settlement {
    pub member_totals: Vec<MemberTotal>,
    pub total_joint_expenses: Decimal,
    pub share_per_member: Decimal,
    /// Member A's paid total minus the even share. Positive means member B
    /// owes member A this amount; negative means the reverse.
    pub settlement_amount: Decimal,
}

impl Settlement {
    pub fn owed_direction(&self) -> OwedDirection {
        if self.settlement_amount > Decimal::ZERO {
            OwedDirection::BOwesA
        } else if self.settlement_amount < Decimal::ZERO {
            OwedDirection::AOwesB
        } else {
            OwedDirection::Even
        }
    }
}

/// Splits shared expenses for `[start, end)` and computes the balancing
/// transfer.
///
/// A transaction is shared when it is an expense inside the period and
/// either sits on a joint-ownership account or carries a `paid_by` tag.
/// Untagged joint-account expenses count toward the total but toward no
/// member, which shifts the settlement against whoever is tagged elsewhere.
pub fn settle(
    snapshot: &Snapshot,
    members: &[Member],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Settlement, MetricsError> {
    if members.is_empty() {
        return Err(MetricsError::InvalidConfiguration(
            "settlement requires at least one member".to_string(),
        ));
    }

    let shared: Vec<_> = snapshot
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
        .filter(|t| t.date >= start && t.date < end)
        .filter(|t| t.paid_by.is_some() || snapshot.is_joint_account(t.account_id))
        .collect();

    let total_joint_expenses: Decimal = shared.iter().map(|t| t.amount.abs()).sum();

    let member_totals: Vec<MemberTotal> = members
        .iter()
        .map(|&member| {
            let paid = shared
                .iter()
                .filter(|t| t.paid_by == Some(member))
                .map(|t| t.amount.abs())
                .sum();
            MemberTotal { member, paid }
        })
        .collect();

    let share_per_member = total_joint_expenses / Decimal::from(members.len() as u64);
    let member_a_paid = member_totals
        .iter()
        .find(|mt| mt.member == Member::A)
        .map(|mt| mt.paid)
        .unwrap_or(Decimal::ZERO);

    Ok(Settlement {
        member_totals,
        total_joint_expenses,
        share_per_member,
        settlement_amount: member_a_paid - share_per_member,
    })
}

/// Discretionary allowance a member still has this month.
///
/// Personal spend is every expense the member paid outside joint accounts
/// in the given month; the result floors at zero rather than going
/// negative.
pub fn fun_money_remaining(
    snapshot: &Snapshot,
    member: Member,
    year: i32,
    month: u32,
) -> Result<Decimal, MetricsError> {
    if !snapshot.couples.enabled {
        return Err(MetricsError::InvalidConfiguration(
            "couples mode is not enabled".to_string(),
        ));
    }
    let (start, end) = month_bounds(year, month);
    let personal: Decimal = snapshot
        .transactions
        .iter()
        .filter(|t| t.kind == TransactionType::Expense)
        .filter(|t| t.date >= start && t.date < end)
        .filter(|t| t.paid_by == Some(member))
        .filter(|t| !snapshot.is_joint_account(t.account_id))
        .map(|t| t.amount.abs())
        .sum();
    Ok((snapshot.couples.fun_money_allowance - personal).max(Decimal::ZERO))
}

/// Whether the next scheduled couples check-in has arrived.
///
/// With no recorded check-in yet, any enabled configuration is due.
pub fn check_in_due(snapshot: &Snapshot, today: NaiveDate) -> bool {
    if !snapshot.couples.enabled {
        return false;
    }
    match snapshot.couples.last_check_in {
        None => true,
        Some(last) => (today - last).num_days() >= snapshot.couples.check_in.days(),
    }
}
