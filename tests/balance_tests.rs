// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use plana::metrics::balance::resolve_balance;
use plana::metrics::{MetricsError, Snapshot};
use plana::models::{Account, AccountType, Transaction, TransactionType};

fn account(id: i64, initial: &str) -> Account {
    Account {
        id,
        name: format!("acct-{}", id),
        kind: AccountType::Checking,
        initial_balance: initial.parse().unwrap(),
        archived: false,
        ownership: None,
    }
}

fn tx(account_id: i64, amount: &str, kind: TransactionType) -> Transaction {
    Transaction {
        id: 0,
        account_id,
        amount: amount.parse().unwrap(),
        kind,
        category: "General".into(),
        date: NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
        paid_by: None,
        trip_id: None,
    }
}

#[test]
fn balance_is_initial_plus_deltas() {
    let acct = account(1, "1000");
    let txs = vec![
        tx(1, "-200", TransactionType::Expense),
        tx(1, "500", TransactionType::Income),
    ];
    assert_eq!(resolve_balance(&acct, &txs), Decimal::from(1300));
}

#[test]
fn empty_transaction_set_returns_initial_balance_exactly() {
    let acct = account(1, "123.45");
    assert_eq!(resolve_balance(&acct, &[]), "123.45".parse().unwrap());
}

#[test]
fn other_accounts_transactions_are_ignored() {
    let acct = account(1, "100");
    let txs = vec![
        tx(2, "-50", TransactionType::Expense),
        tx(1, "-10", TransactionType::Expense),
        tx(3, "999", TransactionType::Income),
    ];
    assert_eq!(resolve_balance(&acct, &txs), Decimal::from(90));
}

#[test]
fn archived_accounts_still_resolve() {
    let mut acct = account(1, "100");
    acct.archived = true;
    let txs = vec![tx(1, "25", TransactionType::Income)];
    assert_eq!(resolve_balance(&acct, &txs), Decimal::from(125));
}

#[test]
fn snapshot_balance_lookup_fails_for_unknown_account() {
    let snapshot = Snapshot {
        accounts: vec![account(1, "100")],
        ..Default::default()
    };
    assert_eq!(snapshot.balance_of(1).unwrap(), Decimal::from(100));
    match snapshot.balance_of(42) {
        Err(MetricsError::NotFound(entity, key)) => {
            assert_eq!(entity, "account");
            assert_eq!(key, "42");
        }
        other => panic!("expected NotFound, got {:?}", other),
    }
}
