// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;

pub fn handle(conn: &Connection) -> Result<()> {
    let mut rows = Vec::new();

    // 1) Transactions pointing at accounts that no longer exist
    let mut stmt = conn.prepare(
        "SELECT t.id, t.account_id FROM transactions t
         LEFT JOIN accounts a ON a.id = t.account_id WHERE a.id IS NULL",
    )?;
    let mut cur = stmt.query([])?;
    while let Some(r) = cur.next()? {
        let tx_id: i64 = r.get(0)?;
        let account_id: i64 = r.get(1)?;
        rows.push(vec![
            "orphan_transaction".into(),
            format!("tx {} -> account {}", tx_id, account_id),
        ]);
    }

    // 2) Amount signs inconsistent with the transaction type
    let mut stmt2 = conn.prepare(
        "SELECT id, amount, type FROM transactions WHERE type IN ('income','expense')",
    )?;
    let mut cur2 = stmt2.query([])?;
    while let Some(r) = cur2.next()? {
        let id: i64 = r.get(0)?;
        let amount_s: String = r.get(1)?;
        let kind: String = r.get(2)?;
        let Ok(amount) = amount_s.parse::<Decimal>() else {
            rows.push(vec!["bad_amount".into(), format!("tx {}: '{}'", id, amount_s)]);
            continue;
        };
        let wrong_sign = (kind == "income" && amount < Decimal::ZERO)
            || (kind == "expense" && amount > Decimal::ZERO);
        if wrong_sign {
            rows.push(vec![
                "sign_mismatch".into(),
                format!("tx {}: {} amount {}", id, kind, amount),
            ]);
        }
    }

    // 3) Debts whose minimum payment cannot cover monthly interest
    let snapshot = crate::db::load_snapshot(conn)?;
    for debt in &snapshot.debts {
        let interest = debt.balance * debt.apr / Decimal::from(100) / Decimal::from(12);
        if debt.balance > Decimal::ZERO && debt.minimum_payment <= interest {
            rows.push(vec![
                "non_amortizing_debt".into(),
                format!(
                    "'{}': minimum {} vs monthly interest {}",
                    debt.name,
                    debt.minimum_payment,
                    interest.round_dp(2)
                ),
            ]);
        }
    }

    // 4) Bills charged to archived accounts
    let mut stmt3 = conn.prepare(
        "SELECT s.name FROM subscriptions s
         JOIN accounts a ON a.id = s.account_id
         WHERE s.cancelled = 0 AND a.archived = 1",
    )?;
    let mut cur3 = stmt3.query([])?;
    while let Some(r) = cur3.next()? {
        let name: String = r.get(0)?;
        rows.push(vec!["bill_on_archived_account".into(), name]);
    }

    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
