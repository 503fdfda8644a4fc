// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::settlement::{check_in_due, fun_money_remaining, settle, OwedDirection};
use crate::models::{CheckInCadence, Member};
use crate::utils::{
    fmt_money, maybe_print_json, month_bounds, parse_date, parse_decimal, parse_month,
    pretty_table,
};
use anyhow::Result;
use chrono::{Datelike, Utc};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("setup", sub)) => setup(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("settle", sub)) => settle_month(conn, sub)?,
        Some(("fun-money", sub)) => fun_money(conn, sub)?,
        Some(("check-in", sub)) => check_in(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn setup(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let mut settings = crate::db::load_couples(conn)?;
    settings.enabled = !sub.get_flag("disable");
    if let Some(s) = sub.get_one::<String>("fun-money") {
        settings.fun_money_allowance = parse_decimal(s)?;
    }
    if let Some(s) = sub.get_one::<String>("threshold") {
        settings.joint_threshold = parse_decimal(s)?;
    }
    if let Some(s) = sub.get_one::<String>("check-in") {
        settings.check_in = CheckInCadence::parse(s)?;
    }
    crate::db::save_couples(conn, &settings)?;
    println!(
        "Couples mode {}",
        if settings.enabled { "enabled" } else { "disabled" }
    );
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let today = match sub.get_one::<String>("today") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };

    let snapshot = crate::db::load_snapshot(conn)?;
    if maybe_print_json(json_flag, jsonl_flag, &snapshot.couples)? {
        return Ok(());
    }
    if !snapshot.couples.enabled {
        println!("Couples mode is disabled");
        return Ok(());
    }
    println!(
        "Fun money {} / member / month | joint threshold {} | check-in {}",
        fmt_money(&snapshot.couples.fun_money_allowance),
        fmt_money(&snapshot.couples.joint_threshold),
        snapshot.couples.check_in.as_str()
    );
    match snapshot.couples.last_check_in {
        Some(d) => println!("Last check-in: {}", d),
        None => println!("No check-in recorded yet"),
    }
    if check_in_due(&snapshot, today) {
        println!("A check-in is due");
    }
    Ok(())
}

fn settle_month(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
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
    if !snapshot.couples.enabled {
        anyhow::bail!("Couples mode is not enabled; run `plana couples setup` first");
    }
    let (start, end) = month_bounds(year, month);
    let result = settle(&snapshot, &[Member::A, Member::B], start, end)?;

    if maybe_print_json(json_flag, jsonl_flag, &result)? {
        return Ok(());
    }
    let data: Vec<Vec<String>> = result
        .member_totals
        .iter()
        .map(|mt| vec![mt.member.as_str().to_string(), fmt_money(&mt.paid)])
        .collect();
    println!("{}", pretty_table(&["Member", "Paid"], data));
    println!(
        "Joint expenses {} | fair share {}",
        fmt_money(&result.total_joint_expenses),
        fmt_money(&result.share_per_member)
    );
    match result.owed_direction() {
        OwedDirection::BOwesA => println!(
            "{} owes {} {}",
            Member::B.as_str(),
            Member::A.as_str(),
            fmt_money(&result.settlement_amount)
        ),
        OwedDirection::AOwesB => println!(
            "{} owes {} {}",
            Member::A.as_str(),
            Member::B.as_str(),
            fmt_money(&result.settlement_amount.abs())
        ),
        OwedDirection::Even => println!("All square"),
    }
    Ok(())
}

fn fun_money(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let member = Member::parse(sub.get_one::<String>("member").unwrap())?;
    let (year, month) = match sub.get_one::<String>("month") {
        Some(s) => parse_month(s)?,
        None => {
            let now = Utc::now().date_naive();
            (now.year(), now.month())
        }
    };

    let snapshot = crate::db::load_snapshot(conn)?;
    let remaining = fun_money_remaining(&snapshot, member, year, month)?;
    if !maybe_print_json(json_flag, jsonl_flag, &remaining)? {
        println!(
            "{} has {} fun money left this month",
            member.as_str(),
            fmt_money(&remaining)
        );
    }
    Ok(())
}

fn check_in(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => Utc::now().date_naive(),
    };
    let mut settings = crate::db::load_couples(conn)?;
    if !settings.enabled {
        anyhow::bail!("Couples mode is not enabled");
    }
    settings.last_check_in = Some(date);
    crate::db::save_couples(conn, &settings)?;
    println!("Check-in recorded for {}", date);
    Ok(())
}
