// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use plana::db;
use plana::models::{
    AccountType, Cadence, CheckInCadence, CouplesSettings, Member, Ownership, Strategy,
    TransactionType,
};

fn test_conn() -> Connection {
    let mut conn = Connection::open_in_memory().unwrap();
    db::init_schema(&mut conn).unwrap();
    conn
}

fn insert_account(conn: &Connection, name: &str, kind: &str, initial: &str) -> i64 {
    conn.execute(
        "INSERT INTO accounts(name, type, initial_balance, ownership) VALUES(?1, ?2, ?3, ?4)",
        params![name, kind, initial, "joint"],
    )
    .unwrap();
    conn.last_insert_rowid()
}

#[test]
fn schema_init_is_idempotent() {
    let mut conn = test_conn();
    db::init_schema(&mut conn).unwrap();
    db::init_schema(&mut conn).unwrap();
}

#[test]
fn file_backed_db_initializes_like_memory() {
    let dir = tempfile::tempdir().unwrap();
    let mut conn = Connection::open(dir.path().join("plana.sqlite")).unwrap();
    db::init_schema(&mut conn).unwrap();
    insert_account(&conn, "Main", "checking", "100");
    let snapshot = db::load_snapshot(&conn).unwrap();
    assert_eq!(snapshot.accounts.len(), 1);
}

#[test]
fn snapshot_round_trips_accounts_and_transactions() {
    let conn = test_conn();
    let acct = insert_account(&conn, "Main", "checking", "1000");
    conn.execute(
        "INSERT INTO transactions(date, account_id, amount, type, category, paid_by)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
        params!["2025-08-05", acct, "-200", "expense", "Groceries", "member-a"],
    )
    .unwrap();

    let snapshot = db::load_snapshot(&conn).unwrap();
    let account = &snapshot.accounts[0];
    assert_eq!(account.name, "Main");
    assert_eq!(account.kind, AccountType::Checking);
    assert_eq!(account.initial_balance, Decimal::from(1000));
    assert_eq!(account.ownership, Some(Ownership::Joint));

    let tx = &snapshot.transactions[0];
    assert_eq!(tx.account_id, acct);
    assert_eq!(tx.amount, Decimal::from(-200));
    assert_eq!(tx.kind, TransactionType::Expense);
    assert_eq!(tx.date, NaiveDate::from_ymd_opt(2025, 8, 5).unwrap());
    assert_eq!(tx.paid_by, Some(Member::A));

    assert_eq!(snapshot.balance_of(acct).unwrap(), Decimal::from(800));
}

#[test]
fn subscriptions_load_with_their_cadence() {
    let conn = test_conn();
    let acct = insert_account(&conn, "Main", "checking", "0");
    for (name, cadence, due) in [
        ("Gym", "weekly", 5),
        ("Streaming", "monthly", 26),
        ("Insurance", "yearly", 9),
    ] {
        conn.execute(
            "INSERT INTO subscriptions(name, amount, cadence, due, category, account_id)
             VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
            params![name, "9.99", cadence, due, "Bills", acct],
        )
        .unwrap();
    }

    let snapshot = db::load_snapshot(&conn).unwrap();
    assert_eq!(snapshot.subscriptions.len(), 3);
    assert_eq!(
        snapshot.subscriptions[0].cadence,
        Cadence::Weekly { weekday: chrono::Weekday::Fri }
    );
    assert_eq!(snapshot.subscriptions[1].cadence, Cadence::Monthly { due_day: 26 });
    assert_eq!(snapshot.subscriptions[2].cadence, Cadence::Yearly { due_month: 9 });
}

#[test]
fn malformed_cadence_row_fails_the_load() {
    let conn = test_conn();
    let acct = insert_account(&conn, "Main", "checking", "0");
    conn.execute(
        "INSERT INTO subscriptions(name, amount, cadence, due, category, account_id)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
        params!["Bad", "5", "daily", 1, "Bills", acct],
    )
    .unwrap();
    assert!(db::load_snapshot(&conn).is_err());
}

#[test]
fn debts_load_with_optional_strategy_override() {
    let conn = test_conn();
    let acct = insert_account(&conn, "Card", "credit", "0");
    conn.execute(
        "INSERT INTO debts(name, balance, apr, minimum_payment, due_day, account_id, strategy)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params!["Visa", "1200", "19.99", "50", 15, acct, "avalanche"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO debts(name, balance, apr, minimum_payment, due_day, account_id)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
        params!["Car", "8000", "6.5", "220", 1, acct],
    )
    .unwrap();

    let snapshot = db::load_snapshot(&conn).unwrap();
    assert_eq!(snapshot.debts[0].strategy_override, Some(Strategy::Avalanche));
    assert_eq!(snapshot.debts[0].apr, "19.99".parse::<Decimal>().unwrap());
    assert_eq!(snapshot.debts[1].strategy_override, None);
}

#[test]
fn settings_upsert_and_read_back() {
    let conn = test_conn();
    assert_eq!(db::get_setting(&conn, "payoff_strategy").unwrap(), None);
    db::set_setting(&conn, "payoff_strategy", "avalanche").unwrap();
    db::set_setting(&conn, "payoff_strategy", "snowball").unwrap();
    assert_eq!(
        db::get_setting(&conn, "payoff_strategy").unwrap().as_deref(),
        Some("snowball")
    );
}

#[test]
fn default_strategy_is_snowball_until_configured() {
    let conn = test_conn();
    assert_eq!(db::default_strategy(&conn).unwrap(), Strategy::Snowball);
    db::set_setting(&conn, "payoff_strategy", "avalanche").unwrap();
    assert_eq!(db::default_strategy(&conn).unwrap(), Strategy::Avalanche);
}

#[test]
fn couples_settings_round_trip() {
    let conn = test_conn();
    let saved = CouplesSettings {
        enabled: true,
        fun_money_allowance: "150.50".parse().unwrap(),
        joint_threshold: Decimal::from(100),
        check_in: CheckInCadence::Biweekly,
        last_check_in: NaiveDate::from_ymd_opt(2025, 8, 1),
    };
    db::save_couples(&conn, &saved).unwrap();

    let loaded = db::load_couples(&conn).unwrap();
    assert!(loaded.enabled);
    assert_eq!(loaded.fun_money_allowance, saved.fun_money_allowance);
    assert_eq!(loaded.joint_threshold, saved.joint_threshold);
    assert_eq!(loaded.check_in, CheckInCadence::Biweekly);
    assert_eq!(loaded.last_check_in, saved.last_check_in);
}

#[test]
fn couples_settings_default_when_unset() {
    let conn = test_conn();
    let loaded = db::load_couples(&conn).unwrap();
    assert!(!loaded.enabled);
    assert_eq!(loaded.fun_money_allowance, Decimal::ZERO);
    assert_eq!(loaded.check_in, CheckInCadence::Monthly);
    assert_eq!(loaded.last_check_in, None);
}

#[test]
fn id_lookup_by_name() {
    let conn = test_conn();
    let acct = insert_account(&conn, "Main", "checking", "0");
    assert_eq!(db::id_for_account(&conn, "Main").unwrap(), acct);
    assert!(db::id_for_account(&conn, "Nope").is_err());
}

#[test]
fn doctor_runs_clean_and_with_findings() {
    let conn = test_conn();
    plana::commands::doctor::handle(&conn).unwrap();

    // Sign mismatch plus a bill on an archived account; doctor reports
    // rather than fails.
    let acct = insert_account(&conn, "Main", "checking", "0");
    conn.execute(
        "INSERT INTO transactions(date, account_id, amount, type, category)
         VALUES(?1, ?2, ?3, ?4, ?5)",
        params!["2025-08-05", acct, "50", "expense", "General"],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO subscriptions(name, amount, cadence, due, category, account_id)
         VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
        params!["Gym", "30", "monthly", 1, "Bills", acct],
    )
    .unwrap();
    conn.execute("UPDATE accounts SET archived=1 WHERE id=?1", params![acct])
        .unwrap();
    plana::commands::doctor::handle(&conn).unwrap();
}

#[test]
fn transactions_load_ordered_by_date() {
    let conn = test_conn();
    let acct = insert_account(&conn, "Main", "checking", "0");
    for (date, amount) in [("2025-08-20", "-30"), ("2025-08-05", "-10"), ("2025-08-12", "-20")] {
        conn.execute(
            "INSERT INTO transactions(date, account_id, amount, type, category)
             VALUES(?1, ?2, ?3, ?4, ?5)",
            params![date, acct, amount, "expense", "General"],
        )
        .unwrap();
    }
    let snapshot = db::load_snapshot(&conn).unwrap();
    let days: Vec<u32> = snapshot
        .transactions
        .iter()
        .map(|t| chrono::Datelike::day(&t.date))
        .collect();
    assert_eq!(days, vec![5, 12, 20]);
}
