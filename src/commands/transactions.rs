// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Member, TransactionType};
use crate::utils::{
    fmt_money, maybe_print_json, month_bounds, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::{bail, Result};
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let account = sub.get_one::<String>("account").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let kind = TransactionType::parse(sub.get_one::<String>("type").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let paid_by = sub
        .get_one::<String>("paid-by")
        .map(|s| Member::parse(s))
        .transpose()?;
    let trip_id = sub
        .get_one::<String>("trip")
        .map(|name| crate::db::id_for_trip(conn, name))
        .transpose()?;

    // Keep amount signs consistent with type so aggregates stay honest.
    match kind {
        TransactionType::Income if amount < rust_decimal::Decimal::ZERO => {
            bail!("Income amounts must be positive (got {})", amount)
        }
        TransactionType::Expense if amount > rust_decimal::Decimal::ZERO => {
            bail!("Expense amounts must be negative (got {})", amount)
        }
        _ => {}
    }

    let account_id = crate::db::id_for_account(conn, account)?;
    conn.execute(
        "INSERT INTO transactions(date, account_id, amount, type, category, paid_by, trip_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            date.to_string(),
            account_id,
            amount.to_string(),
            kind.as_str(),
            category,
            paid_by.map(|p| p.as_str()),
            trip_id
        ],
    )?;
    println!("Recorded {} {} on {} ({})", kind.as_str(), amount, date, category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let month = sub
        .get_one::<String>("month")
        .map(|s| parse_month(s))
        .transpose()?;
    let account_filter = sub.get_one::<String>("account");
    let category_filter = sub.get_one::<String>("category");

    let snapshot = crate::db::load_snapshot(conn)?;
    let account_id = account_filter
        .map(|name| crate::db::id_for_account(conn, name))
        .transpose()?;
    let window = month.map(|(y, mo)| month_bounds(y, mo));

    let mut data = Vec::new();
    for t in &snapshot.transactions {
        if let Some(id) = account_id {
            if t.account_id != id {
                continue;
            }
        }
        if let Some(cat) = category_filter {
            if &t.category != cat {
                continue;
            }
        }
        if let Some((start, end)) = window {
            if t.date < start || t.date >= end {
                continue;
            }
        }
        let account_name = snapshot
            .account(t.account_id)
            .map(|a| a.name.clone())
            .unwrap_or_else(|_| format!("#{}", t.account_id));
        data.push(vec![
            t.date.to_string(),
            account_name,
            t.kind.as_str().to_string(),
            t.category.clone(),
            fmt_money(&t.amount),
            t.paid_by.map(|p| p.as_str().to_string()).unwrap_or_default(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Date", "Account", "Type", "Category", "Amount", "Paid by"],
                data
            )
        );
    }
    Ok(())
}
