// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::recurring::{monthly_equivalent, next_occurrence};
use crate::models::Cadence;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("cancel", sub)) => cancel(conn, sub)?,
        Some(("upcoming", sub)) => upcoming(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let cadence_kind = sub.get_one::<String>("cadence").unwrap();
    let due: u32 = sub
        .get_one::<String>("due")
        .unwrap()
        .parse()
        .with_context(|| "Invalid due value, expected a number")?;
    let cadence = Cadence::from_parts(cadence_kind, due)?;
    let category = sub.get_one::<String>("category").unwrap();
    let account = sub.get_one::<String>("account").unwrap();
    let account_id = crate::db::id_for_account(conn, account)?;

    conn.execute(
        "INSERT INTO subscriptions(name, amount, cadence, due, category, account_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            name,
            amount.to_string(),
            cadence.kind(),
            cadence.due_value(),
            category,
            account_id
        ],
    )?;
    println!("Added {} bill '{}' ({} {})", cadence.kind(), name, amount, category);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let include_cancelled = sub.get_flag("all");

    let snapshot = crate::db::load_snapshot(conn)?;
    let mut data = Vec::new();
    for s in snapshot
        .subscriptions
        .iter()
        .filter(|s| include_cancelled || !s.cancelled)
    {
        let monthly = monthly_equivalent(s);
        let monthly_disp = if monthly.is_exact() {
            fmt_money(&monthly.value)
        } else {
            format!("~{}", fmt_money(&monthly.value))
        };
        data.push(vec![
            s.name.clone(),
            s.cadence.kind().to_string(),
            fmt_money(&s.amount),
            monthly_disp,
            s.category.clone(),
            if s.cancelled { "cancelled" } else { "" }.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Bill", "Cadence", "Amount", "Monthly equiv", "Category", "Status"],
                data
            )
        );
    }
    Ok(())
}

fn cancel(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let on = match sub.get_one::<String>("on") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let changed = conn.execute(
        "UPDATE subscriptions SET cancelled=1, cancelled_on=?1 WHERE name=?2 AND cancelled=0",
        params![on.to_string(), name],
    )?;
    if changed == 0 {
        anyhow::bail!("No active bill named '{}'", name);
    }
    println!("Cancelled '{}' as of {}", name, on);
    Ok(())
}

fn upcoming(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let snapshot = crate::db::load_snapshot(conn)?;
    let mut rows: Vec<_> = snapshot
        .subscriptions
        .iter()
        .filter(|s| !s.cancelled)
        .map(|s| (next_occurrence(&s.cadence, today), s))
        .collect();
    rows.sort_by_key(|(due, _)| *due);

    let data: Vec<Vec<String>> = rows
        .into_iter()
        .map(|(due, s)| {
            vec![
                due.to_string(),
                s.name.clone(),
                fmt_money(&s.amount),
                s.cadence.kind().to_string(),
            ]
        })
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Next due", "Bill", "Amount", "Cadence"], data)
        );
    }
    Ok(())
}
