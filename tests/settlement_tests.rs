// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use plana::metrics::settlement::{
    check_in_due, fun_money_remaining, settle, OwedDirection,
};
use plana::metrics::{MetricsError, Snapshot};
use plana::models::{
    Account, AccountType, CheckInCadence, CouplesSettings, Member, Ownership, Transaction,
    TransactionType,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn account(id: i64, ownership: Option<Ownership>) -> Account {
    Account {
        id,
        name: format!("acct-{}", id),
        kind: AccountType::Checking,
        initial_balance: Decimal::ZERO,
        archived: false,
        ownership,
    }
}

fn expense(account_id: i64, amount: &str, on: NaiveDate, paid_by: Option<Member>) -> Transaction {
    Transaction {
        id: 0,
        account_id,
        amount: amount.parse().unwrap(),
        kind: TransactionType::Expense,
        category: "Shared".into(),
        date: on,
        paid_by,
        trip_id: None,
    }
}

fn couples(allowance: &str) -> CouplesSettings {
    CouplesSettings {
        enabled: true,
        fun_money_allowance: allowance.parse().unwrap(),
        joint_threshold: Decimal::from(100),
        check_in: CheckInCadence::Monthly,
        last_check_in: None,
    }
}

fn august() -> (NaiveDate, NaiveDate) {
    (date(2025, 8, 1), date(2025, 9, 1))
}

#[test]
fn uneven_tagged_payments_settle_toward_the_bigger_payer() {
    let snapshot = Snapshot {
        accounts: vec![account(1, Some(Ownership::MemberA))],
        transactions: vec![
            expense(1, "-300", date(2025, 8, 5), Some(Member::A)),
            expense(1, "-100", date(2025, 8, 9), Some(Member::B)),
        ],
        ..Default::default()
    };
    let settlement = settle(&snapshot, &[Member::A, Member::B], august().0, august().1).unwrap();
    assert_eq!(settlement.total_joint_expenses, Decimal::from(400));
    assert_eq!(settlement.share_per_member, Decimal::from(200));
    assert_eq!(settlement.settlement_amount, Decimal::from(100));
    assert_eq!(settlement.owed_direction(), OwedDirection::BOwesA);
}

#[test]
fn equal_payments_settle_even() {
    let snapshot = Snapshot {
        transactions: vec![
            expense(1, "-150", date(2025, 8, 5), Some(Member::A)),
            expense(1, "-150", date(2025, 8, 9), Some(Member::B)),
        ],
        ..Default::default()
    };
    let settlement = settle(&snapshot, &[Member::A, Member::B], august().0, august().1).unwrap();
    assert_eq!(settlement.settlement_amount, Decimal::ZERO);
    assert_eq!(settlement.owed_direction(), OwedDirection::Even);
}

#[test]
fn negative_settlement_means_a_owes_b() {
    let snapshot = Snapshot {
        transactions: vec![expense(1, "-200", date(2025, 8, 5), Some(Member::B))],
        ..Default::default()
    };
    let settlement = settle(&snapshot, &[Member::A, Member::B], august().0, august().1).unwrap();
    assert_eq!(settlement.settlement_amount, Decimal::from(-100));
    assert_eq!(settlement.owed_direction(), OwedDirection::AOwesB);
}

#[test]
fn untagged_joint_account_expenses_count_toward_the_total() {
    let snapshot = Snapshot {
        accounts: vec![account(1, Some(Ownership::Joint))],
        transactions: vec![
            expense(1, "-100", date(2025, 8, 5), None),
            expense(2, "-300", date(2025, 8, 9), Some(Member::A)),
        ],
        ..Default::default()
    };
    let settlement = settle(&snapshot, &[Member::A, Member::B], august().0, august().1).unwrap();
    assert_eq!(settlement.total_joint_expenses, Decimal::from(400));
    // A paid 300 against a 200 share.
    assert_eq!(settlement.settlement_amount, Decimal::from(100));
}

#[test]
fn untagged_personal_account_expenses_stay_out() {
    let snapshot = Snapshot {
        accounts: vec![account(1, Some(Ownership::MemberA))],
        transactions: vec![expense(1, "-100", date(2025, 8, 5), None)],
        ..Default::default()
    };
    let settlement = settle(&snapshot, &[Member::A, Member::B], august().0, august().1).unwrap();
    assert_eq!(settlement.total_joint_expenses, Decimal::ZERO);
}

#[test]
fn period_bounds_are_half_open() {
    let snapshot = Snapshot {
        transactions: vec![
            expense(1, "-50", date(2025, 8, 1), Some(Member::A)),
            expense(1, "-60", date(2025, 9, 1), Some(Member::A)),
        ],
        ..Default::default()
    };
    let settlement = settle(&snapshot, &[Member::A, Member::B], august().0, august().1).unwrap();
    assert_eq!(settlement.total_joint_expenses, Decimal::from(50));
}

#[test]
fn settlement_without_members_is_rejected() {
    let snapshot = Snapshot::default();
    assert!(matches!(
        settle(&snapshot, &[], august().0, august().1),
        Err(MetricsError::InvalidConfiguration(_))
    ));
}

#[test]
fn fun_money_subtracts_personal_spend() {
    let snapshot = Snapshot {
        accounts: vec![
            account(1, Some(Ownership::MemberA)),
            account(2, Some(Ownership::Joint)),
        ],
        transactions: vec![
            expense(1, "-150", date(2025, 8, 5), Some(Member::A)),
            // Joint-account spend is not fun money even when tagged.
            expense(2, "-75", date(2025, 8, 6), Some(Member::A)),
            // The other member's spending does not drain A's allowance.
            expense(1, "-90", date(2025, 8, 7), Some(Member::B)),
        ],
        couples: couples("200"),
        ..Default::default()
    };
    assert_eq!(
        fun_money_remaining(&snapshot, Member::A, 2025, 8).unwrap(),
        Decimal::from(50)
    );
    assert_eq!(
        fun_money_remaining(&snapshot, Member::B, 2025, 8).unwrap(),
        Decimal::from(110)
    );
}

#[test]
fn fun_money_floors_at_zero() {
    let snapshot = Snapshot {
        transactions: vec![expense(1, "-500", date(2025, 8, 5), Some(Member::A))],
        couples: couples("200"),
        ..Default::default()
    };
    assert_eq!(
        fun_money_remaining(&snapshot, Member::A, 2025, 8).unwrap(),
        Decimal::ZERO
    );
}

#[test]
fn fun_money_requires_couples_mode() {
    let snapshot = Snapshot::default();
    assert!(matches!(
        fun_money_remaining(&snapshot, Member::A, 2025, 8),
        Err(MetricsError::InvalidConfiguration(_))
    ));
}

#[test]
fn check_in_due_follows_the_cadence() {
    let mut snapshot = Snapshot {
        couples: couples("0"),
        ..Default::default()
    };
    // Enabled but never checked in: due immediately.
    assert!(check_in_due(&snapshot, date(2025, 8, 15)));

    snapshot.couples.last_check_in = Some(date(2025, 8, 1));
    // Monthly cadence: 30 days.
    assert!(!check_in_due(&snapshot, date(2025, 8, 30)));
    assert!(check_in_due(&snapshot, date(2025, 8, 31)));

    snapshot.couples.check_in = CheckInCadence::Weekly;
    assert!(check_in_due(&snapshot, date(2025, 8, 8)));
    assert!(!check_in_due(&snapshot, date(2025, 8, 7)));

    snapshot.couples.enabled = false;
    assert!(!check_in_due(&snapshot, date(2026, 1, 1)));
}
