// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::metrics::travel::trip_spending;
use crate::models::ItineraryCategory;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use chrono::NaiveTime;
use rusqlite::{params, Connection};

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("plan-item", sub)) => plan_item(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let name = sub.get_one::<String>("name").unwrap();
    let destination = sub.get_one::<String>("destination").unwrap();
    let start = parse_date(sub.get_one::<String>("start").unwrap())?;
    let end = parse_date(sub.get_one::<String>("end").unwrap())?;
    if end < start {
        anyhow::bail!("Trip end {} is before start {}", end, start);
    }
    let budget = parse_decimal(sub.get_one::<String>("budget").unwrap())?;

    conn.execute(
        "INSERT INTO trips(name, destination, start_date, end_date, budget)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            name,
            destination,
            start.to_string(),
            end.to_string(),
            budget.to_string()
        ],
    )?;
    println!("Added trip '{}' to {} ({} - {})", name, destination, start, end);
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let snapshot = crate::db::load_snapshot(conn)?;
    let mut data = Vec::new();
    for t in snapshot.trips.iter().filter(|t| !t.archived) {
        let spending = trip_spending(&snapshot, t.id)?;
        data.push(vec![
            t.name.clone(),
            t.destination.clone(),
            format!("{} - {}", t.start_date, t.end_date),
            fmt_money(&spending.spent),
            fmt_money(&t.budget),
        ]);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!(
            "{}",
            pretty_table(&["Trip", "Destination", "Dates", "Spent", "Budget"], data)
        );
    }
    Ok(())
}

fn plan_item(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let trip = sub.get_one::<String>("trip").unwrap();
    let trip_id = crate::db::id_for_trip(conn, trip)?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let time = sub
        .get_one::<String>("time")
        .map(|t| {
            NaiveTime::parse_from_str(t, "%H:%M")
                .with_context(|| format!("Invalid time '{}', expected HH:MM", t))
        })
        .transpose()?;
    let activity = sub.get_one::<String>("activity").unwrap();
    let category = ItineraryCategory::parse(sub.get_one::<String>("category").unwrap())?;
    let location = sub.get_one::<String>("location");
    let cost = sub
        .get_one::<String>("cost")
        .map(|c| parse_decimal(c))
        .transpose()?;

    conn.execute(
        "INSERT INTO itinerary_items(trip_id, date, time, activity, category, location, cost)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            trip_id,
            date.to_string(),
            time.map(|t| t.format("%H:%M").to_string()),
            activity,
            category.as_str(),
            location,
            cost.map(|c| c.to_string())
        ],
    )?;
    println!("Planned '{}' on {} for trip '{}'", activity, date, trip);
    Ok(())
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let trip = sub.get_one::<String>("trip").unwrap();
    let trip_id = crate::db::id_for_trip(conn, trip)?;

    let snapshot = crate::db::load_snapshot(conn)?;
    let spending = trip_spending(&snapshot, trip_id)?;
    if maybe_print_json(json_flag, jsonl_flag, &spending)? {
        return Ok(());
    }
    println!(
        "Trip '{}': spent {} of {} budget | planned itinerary costs {}",
        trip,
        fmt_money(&spending.spent),
        fmt_money(&spending.budget),
        fmt_money(&spending.planned_cost)
    );
    if spending.over_budget {
        println!("Over budget by {}", fmt_money(&(spending.spent - spending.budget)));
    }
    let mut items: Vec<_> = snapshot
        .itinerary
        .iter()
        .filter(|i| i.trip_id == trip_id)
        .collect();
    items.sort_by_key(|i| (i.date, i.time));
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|i| {
            vec![
                i.date.to_string(),
                i.time.map(|t| t.format("%H:%M").to_string()).unwrap_or_default(),
                i.activity.clone(),
                i.category.as_str().to_string(),
                i.cost.map(|c| fmt_money(&c)).unwrap_or_default(),
            ]
        })
        .collect();
    if !data.is_empty() {
        println!(
            "{}",
            pretty_table(&["Date", "Time", "Activity", "Category", "Cost"], data)
        );
    }
    Ok(())
}
