// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::balance::resolve_balance;
use crate::metrics::error::MetricsError;
use crate::models::{
    Account, Budget, CouplesSettings, Debt, Goal, ItineraryItem, Subscription, Transaction, Trip,
};

/// Read-only view of the ledger handed to every derivation function.
///
/// The store owns the records; a snapshot borrows nothing back from the core
/// and is dropped when the computation returns. All derivations are pure
/// functions of a snapshot plus an injected "today", so identical inputs
/// always produce identical output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub subscriptions: Vec<Subscription>,
    pub debts: Vec<Debt>,
    pub goals: Vec<Goal>,
    pub budgets: Vec<Budget>,
    pub couples: CouplesSettings,
    pub trips: Vec<Trip>,
    pub itinerary: Vec<ItineraryItem>,
}

impl Snapshot {
    pub fn account(&self, id: i64) -> Result<&Account, MetricsError> {
        self.accounts
            .iter()
            .find(|a| a.id == id)
            .ok_or_else(|| MetricsError::not_found("account", id.to_string()))
    }

    pub fn trip(&self, id: i64) -> Result<&Trip, MetricsError> {
        self.trips
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| MetricsError::not_found("trip", id.to_string()))
    }

    /// Current balance of one account; fails with `NotFound` for a bad id.
    pub fn balance_of(&self, account_id: i64) -> Result<Decimal, MetricsError> {
        let account = self.account(account_id)?;
        Ok(resolve_balance(account, &self.transactions))
    }

    /// Whether an account is marked joint; unknown ids are treated as
    /// individually owned rather than failing, since settlement filters
    /// must tolerate dangling references.
    pub fn is_joint_account(&self, account_id: i64) -> bool {
        self.accounts
            .iter()
            .any(|a| a.id == account_id && a.is_joint())
    }
}
