// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod accounts;
pub mod transactions;
pub mod subscriptions;
pub mod debts;
pub mod goals;
pub mod budgets;
pub mod couples;
pub mod trips;
pub mod reports;
pub mod doctor;
