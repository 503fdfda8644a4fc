// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::cashflow::overspent_categories;
use crate::models::TransactionType;
use crate::utils::{
    fmt_money, maybe_print_json, month_bounds, month_key, parse_decimal, parse_month, pretty_table,
};
use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = parse_month(sub.get_one::<String>("month").unwrap())?;
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let key = month_key(year, month);
    conn.execute(
        "INSERT INTO budgets(month, category, budgeted) VALUES (?1, ?2, ?3)
         ON CONFLICT(month, category) DO UPDATE SET budgeted=excluded.budgeted",
        params![key, category, amount.to_string()],
    )?;
    println!("Budget set for {} / {} = {}", key, category, amount);
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (year, month) = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => {
            let now = Utc::now().date_naive();
            (now.year(), now.month())
        }
    };

    let snapshot = crate::db::load_snapshot(conn)?;
    let key = month_key(year, month);
    let (start, end) = month_bounds(year, month);

    let mut data = Vec::new();
    for b in snapshot.budgets.iter().filter(|b| b.month == key) {
        let spent: Decimal = snapshot
            .transactions
            .iter()
            .filter(|t| {
                t.kind == TransactionType::Expense
                    && t.category == b.category
                    && t.date >= start
                    && t.date < end
            })
            .map(|t| t.amount.abs())
            .sum();
        data.push(vec![
            b.category.clone(),
            fmt_money(&b.budgeted),
            fmt_money(&spent),
            fmt_money(&(b.budgeted - spent)),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Category", "Budgeted", "Spent", "Remaining"], data)
        );
        for over in overspent_categories(&snapshot, year, month) {
            println!(
                "{} is overspent by {}",
                over.category,
                fmt_money(&over.over_by)
            );
        }
    }
    Ok(())
}
