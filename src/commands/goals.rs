// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::goals::{days_remaining, summarize_goals};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("contribute", sub)) => contribute(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let target = parse_decimal(sub.get_one::<String>("target").unwrap())?;
    if target < Decimal::ZERO {
        anyhow::bail!("Target amount must not be negative (got {})", target);
    }
    let current = parse_decimal(sub.get_one::<String>("current").unwrap())?;
    let due = sub
        .get_one::<String>("due")
        .map(|s| parse_date(s))
        .transpose()?;
    let shared = sub.get_flag("shared");

    conn.execute(
        "INSERT INTO goals(name, target_amount, current_amount, due_date, shared)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            target.to_string(),
            current.to_string(),
            due.map(|d| d.to_string()),
            shared as i64
        ],
    )?;
    println!("Added goal '{}' targeting {}", name, target);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let snapshot = crate::db::load_snapshot(conn)?;
    let mut data = Vec::new();
    for g in &snapshot.goals {
        let pct = g.progress() * Decimal::from(100);
        let days = days_remaining(g, today)
            .map(|d| d.to_string())
            .unwrap_or_default();
        data.push(vec![
            g.name.clone(),
            fmt_money(&g.current_amount),
            fmt_money(&g.target_amount),
            format!("{:.0}%", pct),
            days,
            if g.is_reached() { "done" } else { "" }.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Goal", "Saved", "Target", "Progress", "Days left", "Status"],
                data
            )
        );
        let summary = summarize_goals(&snapshot);
        println!(
            "{} active, {} completed | saved {} of {}",
            summary.active,
            summary.completed,
            fmt_money(&summary.total_saved),
            fmt_money(&summary.total_target)
        );
    }
    Ok(())
}

fn contribute(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;

    let current_s: Option<String> = conn
        .query_row(
            "SELECT current_amount FROM goals WHERE name=?1",
            params![name],
            |r| r.get(0),
        )
        .optional()?;
    let current = current_s
        .with_context(|| format!("Goal '{}' not found", name))?
        .parse::<Decimal>()
        .with_context(|| format!("Invalid stored amount for goal '{}'", name))?;
    let updated = current + amount;
    conn.execute(
        "UPDATE goals SET current_amount=?1 WHERE name=?2",
        params![updated.to_string(), name],
    )?;
    println!("Goal '{}' now at {}", name, updated);
    Ok(())
}
