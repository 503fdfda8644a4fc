// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::balance::resolve_balance;
use crate::models::{AccountType, Ownership};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("archive", sub)) => archive(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let kind = AccountType::parse(sub.get_one::<String>("type").unwrap())?;
    let balance = parse_decimal(sub.get_one::<String>("balance").unwrap())?;
    let ownership = sub
        .get_one::<String>("ownership")
        .map(|s| Ownership::parse(s))
        .transpose()?;

    conn.execute(
        "INSERT INTO accounts(name, type, initial_balance, ownership) VALUES (?1, ?2, ?3, ?4)",
        params![
            name,
            kind.as_str(),
            balance.to_string(),
            ownership.map(|o| o.as_str())
        ],
    )?;
    println!("Added {} account '{}'", kind.as_str(), name);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let include_archived = sub.get_flag("all");

    let snapshot = crate::db::load_snapshot(conn)?;
    let mut data = Vec::new();
    for account in snapshot
        .accounts
        .iter()
        .filter(|a| include_archived || !a.archived)
    {
        let balance = resolve_balance(account, &snapshot.transactions);
        data.push(vec![
            account.name.clone(),
            account.kind.as_str().to_string(),
            account
                .ownership
                .map(|o| o.as_str().to_string())
                .unwrap_or_default(),
            fmt_money(&balance),
            if account.archived { "yes" } else { "" }.to_string(),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Account", "Type", "Ownership", "Balance", "Archived"], data)
        );
    }
    Ok(())
}

fn archive(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let restore = sub.get_flag("restore");
    let id = crate::db::id_for_account(conn, name)?;
    conn.execute(
        "UPDATE accounts SET archived=?1 WHERE id=?2",
        params![if restore { 0 } else { 1 }, id],
    )?;
    println!(
        "{} account '{}'",
        if restore { "Restored" } else { "Archived" },
        name
    );
    Ok(())
}
