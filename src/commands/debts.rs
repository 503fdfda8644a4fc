// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::payoff::{
    plan_payoff_capped, total_debt, total_minimum_payments, total_monthly_interest,
    DEFAULT_PAYOFF_HORIZON_MONTHS,
};
use crate::metrics::recurring::next_monthly_due;
use crate::models::Strategy;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("plan", sub)) => plan(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    let apr = parse_decimal(sub.get_one::<String>("apr").unwrap())?;
    let minimum = parse_decimal(sub.get_one::<String>("minimum").unwrap())?;
    let due_day: u32 = sub
        .get_one::<String>("due-day")
        .unwrap()
        .parse()
        .with_context(|| "Invalid due day, expected 1-31")?;
    if !(1..=31).contains(&due_day) {
        anyhow::bail!("Due day {} outside 1-31", due_day);
    }
    let account = sub.get_one::<String>("account").unwrap();
    let strategy = sub
        .get_one::<String>("strategy")
        .map(|s| Strategy::parse(s))
        .transpose()?;
    let account_id = crate::db::id_for_account(conn, account)?;

    conn.execute(
        "INSERT INTO debts(name, balance, apr, minimum_payment, due_day, account_id, strategy)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            name,
            balance.to_string(),
            apr.to_string(),
            minimum.to_string(),
            due_day,
            account_id,
            strategy.map(|s| s.as_str())
        ],
    )?;
    println!("Added debt '{}' ({} at {}% APR)", name, balance, apr);
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
    for d in &snapshot.debts {
        data.push(vec![
            d.name.clone(),
            fmt_money(&d.balance),
            format!("{}%", d.apr),
            fmt_money(&d.minimum_payment),
            next_monthly_due(d.due_day, today).to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(
                &["Debt", "Balance", "APR", "Min payment", "Next payment"],
                data
            )
        );
        println!(
            "Total debt {} | monthly minimums {} | monthly interest {}",
            fmt_money(&total_debt(&snapshot.debts)),
            fmt_money(&total_minimum_payments(&snapshot.debts)),
            fmt_money(&total_monthly_interest(&snapshot.debts))
        );
    }
    Ok(())
}

fn plan(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let strategy = match sub.get_one::<String>("strategy") {
        Some(s) => Strategy::parse(s)?,
        None => crate::db::default_strategy(conn)?,
    };
    let horizon = *sub
        .get_one::<u32>("horizon")
        .unwrap_or(&DEFAULT_PAYOFF_HORIZON_MONTHS);

    let snapshot = crate::db::load_snapshot(conn)?;
    let plans = plan_payoff_capped(&snapshot.debts, strategy, horizon)?;

    if maybe_print_json(json_flag, jsonl_flag, &plans)? {
        return Ok(());
    }
    let data: Vec<Vec<String>> = plans
        .iter()
        .map(|p| {
            vec![
                p.order.to_string(),
                p.name.clone(),
                fmt_money(&p.balance),
                fmt_money(&p.monthly_interest),
                fmt_money(&p.principal_portion),
                if p.truncated {
                    format!("{}+", p.months_to_payoff)
                } else {
                    p.months_to_payoff.to_string()
                },
                fmt_money(&p.total_interest),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &[
                "#",
                "Debt",
                "Balance",
                "Interest/mo",
                "Principal/mo",
                "Months",
                "Total interest"
            ],
            data
        )
    );
    println!("Strategy: {}", strategy.as_str());
    Ok(())
}
