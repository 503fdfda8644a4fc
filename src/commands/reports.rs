// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::cashflow::{
    low_cash_warning, month_flow, net_worth, project_next_month, safe_to_spend,
};
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_month, pretty_table};
use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("net-worth", sub)) => net_worth_report(conn, sub)?,
        Some(("safe-to-spend", sub)) => safe_to_spend_report(conn, sub)?,
        Some(("cashflow", sub)) => cashflow_report(conn, sub)?,
        Some(("projection", sub)) => projection_report(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn net_worth_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let snapshot = crate::db::load_snapshot(conn)?;
    let worth = net_worth(&snapshot);
    if !maybe_print_json(json_flag, jsonl_flag, &worth)? {
        println!("Net worth: {}", fmt_money(&worth));
        if low_cash_warning(&snapshot) {
            println!("Warning: checking balances are running low");
        }
    }
    Ok(())
}

fn safe_to_spend_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let snapshot = crate::db::load_snapshot(conn)?;
    let estimate = safe_to_spend(&snapshot, today);
    if maybe_print_json(json_flag, jsonl_flag, &estimate)? {
        return Ok(());
    }
    println!("Safe to spend today: {}", fmt_money(&estimate.value));
    for note in &estimate.notes {
        println!("note: {}", note.describe());
    }
    Ok(())
}

fn cashflow_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
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
    let flow = month_flow(&snapshot, year, month);
    if maybe_print_json(json_flag, jsonl_flag, &flow)? {
        return Ok(());
    }
    let data = vec![vec![
        fmt_money(&flow.income),
        fmt_money(&flow.expenses),
        fmt_money(&flow.bills),
        fmt_money(&flow.net),
    ]];
    println!(
        "{}",
        pretty_table(&["Income", "Expenses", "Bills", "Net"], data)
    );
    Ok(())
}

fn projection_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let snapshot = crate::db::load_snapshot(conn)?;
    let estimate = project_next_month(&snapshot, today);
    if maybe_print_json(json_flag, jsonl_flag, &estimate)? {
        return Ok(());
    }
    let flow = &estimate.value;
    let data = vec![vec![
        fmt_money(&flow.income),
        fmt_money(&flow.expenses),
        fmt_money(&flow.bills),
        fmt_money(&flow.net),
    ]];
    println!(
        "{}",
        pretty_table(&["Income", "Expenses", "Bills", "Net"], data)
    );
    for note in &estimate.notes {
        println!("note: {}", note.describe());
    }
    Ok(())
}
