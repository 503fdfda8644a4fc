// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{Account, Transaction};

/// Current balance of an account: opening balance plus every transaction
/// delta referencing it, regardless of date.
///
/// This is the total-to-date ledger balance, not a statement balance.
/// Archived accounts still resolve; the archived flag only controls
/// inclusion in aggregate totals.
pub fn resolve_balance(account: &Account, transactions: &[Transaction]) -> Decimal {
    let delta: Decimal = transactions
        .iter()
        .filter(|t| t.account_id == account.id)
        .map(|t| t.amount)
        .sum();
    account.initial_balance + delta
}
