// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use rusqlite::{params, Connection, OptionalExtension};
use rust_decimal::Decimal;
use std::fs;
use std::path::PathBuf;

use crate::metrics::Snapshot;
use crate::models::{
    Account, AccountType, Budget, Cadence, CheckInCadence, CouplesSettings, Debt, Goal,
    ItineraryCategory, ItineraryItem, Member, Ownership, Strategy, Subscription, Transaction,
    TransactionType, Trip,
};
use crate::utils::parse_date;

static APP: Lazy<(&str, &str, &str)> = Lazy::new(|| ("com.alphavelocity", "Plana", "plana"));

pub fn db_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific data dir")?;
    let data_dir = proj.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data dir")?;
    Ok(data_dir.join("plana.sqlite"))
}

pub fn open_or_init() -> Result<Connection> {
    let path = db_path()?;
    let mut conn =
        Connection::open(&path).with_context(|| format!("Open DB at {}", path.display()))?;
    init_schema(&mut conn)?;
    Ok(conn)
}

pub fn init_schema(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
    PRAGMA foreign_keys = ON;

    CREATE TABLE IF NOT EXISTS settings(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS accounts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        type TEXT NOT NULL,
        initial_balance TEXT NOT NULL DEFAULT '0',
        archived INTEGER NOT NULL DEFAULT 0,
        ownership TEXT,
        created_at TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE IF NOT EXISTS transactions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        date TEXT NOT NULL,
        account_id INTEGER NOT NULL,
        amount TEXT NOT NULL,
        type TEXT NOT NULL,
        category TEXT NOT NULL,
        paid_by TEXT,
        trip_id INTEGER,
        created_at TEXT NOT NULL DEFAULT (datetime('now')),
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE,
        FOREIGN KEY(trip_id) REFERENCES trips(id) ON DELETE SET NULL
    );
    CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);
    CREATE INDEX IF NOT EXISTS idx_transactions_account ON transactions(account_id);

    CREATE TABLE IF NOT EXISTS subscriptions(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        amount TEXT NOT NULL,
        cadence TEXT NOT NULL,
        due INTEGER NOT NULL,
        category TEXT NOT NULL,
        account_id INTEGER NOT NULL,
        cancelled INTEGER NOT NULL DEFAULT 0,
        cancelled_on TEXT,
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS debts(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        balance TEXT NOT NULL,
        apr TEXT NOT NULL,
        minimum_payment TEXT NOT NULL,
        due_day INTEGER NOT NULL,
        account_id INTEGER NOT NULL,
        strategy TEXT,
        FOREIGN KEY(account_id) REFERENCES accounts(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS goals(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        target_amount TEXT NOT NULL,
        current_amount TEXT NOT NULL DEFAULT '0',
        due_date TEXT,
        shared INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS budgets(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        month TEXT NOT NULL,
        category TEXT NOT NULL,
        budgeted TEXT NOT NULL,
        UNIQUE(month, category)
    );

    CREATE TABLE IF NOT EXISTS trips(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        destination TEXT NOT NULL,
        start_date TEXT NOT NULL,
        end_date TEXT NOT NULL,
        budget TEXT NOT NULL,
        archived INTEGER NOT NULL DEFAULT 0
    );

    CREATE TABLE IF NOT EXISTS itinerary_items(
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        trip_id INTEGER NOT NULL,
        date TEXT NOT NULL,
        time TEXT,
        activity TEXT NOT NULL,
        category TEXT NOT NULL,
        location TEXT,
        cost TEXT,
        FOREIGN KEY(trip_id) REFERENCES trips(id) ON DELETE CASCADE
    );
    "#,
    )?;
    Ok(())
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

/// The household's default payoff strategy; snowball until configured.
pub fn default_strategy(conn: &Connection) -> Result<Strategy> {
    match get_setting(conn, "payoff_strategy")? {
        Some(s) => Ok(Strategy::parse(&s)?),
        None => Ok(Strategy::Snowball),
    }
}

pub fn load_couples(conn: &Connection) -> Result<CouplesSettings> {
    let mut settings = CouplesSettings::default();
    if let Some(v) = get_setting(conn, "couples_enabled")? {
        settings.enabled = v == "true";
    }
    if let Some(v) = get_setting(conn, "fun_money_allowance")? {
        settings.fun_money_allowance = parse_stored_decimal(&v, "fun_money_allowance")?;
    }
    if let Some(v) = get_setting(conn, "joint_threshold")? {
        settings.joint_threshold = parse_stored_decimal(&v, "joint_threshold")?;
    }
    if let Some(v) = get_setting(conn, "check_in_cadence")? {
        settings.check_in = CheckInCadence::parse(&v)?;
    }
    if let Some(v) = get_setting(conn, "last_check_in")? {
        settings.last_check_in = Some(parse_date(&v)?);
    }
    Ok(settings)
}

pub fn save_couples(conn: &Connection, settings: &CouplesSettings) -> Result<()> {
    set_setting(
        conn,
        "couples_enabled",
        if settings.enabled { "true" } else { "false" },
    )?;
    set_setting(
        conn,
        "fun_money_allowance",
        &settings.fun_money_allowance.to_string(),
    )?;
    set_setting(conn, "joint_threshold", &settings.joint_threshold.to_string())?;
    set_setting(conn, "check_in_cadence", settings.check_in.as_str())?;
    if let Some(d) = settings.last_check_in {
        set_setting(conn, "last_check_in", &d.to_string())?;
    }
    Ok(())
}

pub fn id_for_account(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM accounts WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Account '{}' not found", name))?;
    Ok(id)
}

pub fn id_for_trip(conn: &Connection, name: &str) -> Result<i64> {
    let mut stmt = conn.prepare("SELECT id FROM trips WHERE name=?1")?;
    let id: i64 = stmt
        .query_row(params![name], |r| r.get(0))
        .with_context(|| format!("Trip '{}' not found", name))?;
    Ok(id)
}

fn parse_stored_decimal(s: &str, what: &str) -> Result<Decimal> {
    s.parse::<Decimal>()
        .with_context(|| format!("Invalid stored decimal '{}' for {}", s, what))
}

fn load_accounts(conn: &Connection) -> Result<Vec<Account>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, type, initial_balance, archived, ownership FROM accounts ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let kind: String = r.get(2)?;
        let bal: String = r.get(3)?;
        let ownership: Option<String> = r.get(5)?;
        out.push(Account {
            id: r.get(0)?,
            name: r.get(1)?,
            kind: AccountType::parse(&kind)?,
            initial_balance: parse_stored_decimal(&bal, "account balance")?,
            archived: r.get::<_, i64>(4)? != 0,
            ownership: ownership.as_deref().map(Ownership::parse).transpose()?,
        });
    }
    Ok(out)
}

fn load_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(
        "SELECT id, date, account_id, amount, type, category, paid_by, trip_id
         FROM transactions ORDER BY date, id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(1)?;
        let amount: String = r.get(3)?;
        let kind: String = r.get(4)?;
        let paid_by: Option<String> = r.get(6)?;
        out.push(Transaction {
            id: r.get(0)?,
            date: parse_date(&date)?,
            account_id: r.get(2)?,
            amount: parse_stored_decimal(&amount, "transaction amount")?,
            kind: TransactionType::parse(&kind)?,
            category: r.get(5)?,
            paid_by: paid_by.as_deref().map(Member::parse).transpose()?,
            trip_id: r.get(7)?,
        });
    }
    Ok(out)
}

fn load_subscriptions(conn: &Connection) -> Result<Vec<Subscription>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, amount, cadence, due, category, account_id, cancelled, cancelled_on
         FROM subscriptions ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let amount: String = r.get(2)?;
        let cadence: String = r.get(3)?;
        let due: i64 = r.get(4)?;
        let cancelled_on: Option<String> = r.get(8)?;
        out.push(Subscription {
            id: r.get(0)?,
            name: r.get(1)?,
            amount: parse_stored_decimal(&amount, "subscription amount")?,
            cadence: Cadence::from_parts(&cadence, due as u32)?,
            category: r.get(5)?,
            account_id: r.get(6)?,
            cancelled: r.get::<_, i64>(7)? != 0,
            cancelled_on: cancelled_on.as_deref().map(parse_date).transpose()?,
        });
    }
    Ok(out)
}

fn load_debts(conn: &Connection) -> Result<Vec<Debt>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, balance, apr, minimum_payment, due_day, account_id, strategy
         FROM debts ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let balance: String = r.get(2)?;
        let apr: String = r.get(3)?;
        let minimum: String = r.get(4)?;
        let due_day: i64 = r.get(5)?;
        let strategy: Option<String> = r.get(7)?;
        out.push(Debt {
            id: r.get(0)?,
            name: r.get(1)?,
            balance: parse_stored_decimal(&balance, "debt balance")?,
            apr: parse_stored_decimal(&apr, "debt apr")?,
            minimum_payment: parse_stored_decimal(&minimum, "minimum payment")?,
            due_day: due_day as u32,
            account_id: r.get(6)?,
            strategy_override: strategy.as_deref().map(Strategy::parse).transpose()?,
        });
    }
    Ok(out)
}

fn load_goals(conn: &Connection) -> Result<Vec<Goal>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, target_amount, current_amount, due_date, shared FROM goals ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let target: String = r.get(2)?;
        let current: String = r.get(3)?;
        let due: Option<String> = r.get(4)?;
        out.push(Goal {
            id: r.get(0)?,
            name: r.get(1)?,
            target_amount: parse_stored_decimal(&target, "goal target")?,
            current_amount: parse_stored_decimal(&current, "goal saved amount")?,
            due_date: due.as_deref().map(parse_date).transpose()?,
            shared: r.get::<_, i64>(5)? != 0,
        });
    }
    Ok(out)
}

fn load_budgets(conn: &Connection) -> Result<Vec<Budget>> {
    let mut stmt =
        conn.prepare("SELECT id, month, category, budgeted FROM budgets ORDER BY month, category")?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let budgeted: String = r.get(3)?;
        out.push(Budget {
            id: r.get(0)?,
            month: r.get(1)?,
            category: r.get(2)?,
            budgeted: parse_stored_decimal(&budgeted, "budgeted amount")?,
        });
    }
    Ok(out)
}

fn load_trips(conn: &Connection) -> Result<Vec<Trip>> {
    let mut stmt = conn.prepare(
        "SELECT id, name, destination, start_date, end_date, budget, archived FROM trips ORDER BY id",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let start: String = r.get(3)?;
        let end: String = r.get(4)?;
        let budget: String = r.get(5)?;
        out.push(Trip {
            id: r.get(0)?,
            name: r.get(1)?,
            destination: r.get(2)?,
            start_date: parse_date(&start)?,
            end_date: parse_date(&end)?,
            budget: parse_stored_decimal(&budget, "trip budget")?,
            archived: r.get::<_, i64>(6)? != 0,
        });
    }
    Ok(out)
}

fn load_itinerary(conn: &Connection) -> Result<Vec<ItineraryItem>> {
    let mut stmt = conn.prepare(
        "SELECT id, trip_id, date, time, activity, category, location, cost
         FROM itinerary_items ORDER BY date, time",
    )?;
    let mut rows = stmt.query([])?;
    let mut out = Vec::new();
    while let Some(r) = rows.next()? {
        let date: String = r.get(2)?;
        let time: Option<String> = r.get(3)?;
        let category: String = r.get(5)?;
        let cost: Option<String> = r.get(7)?;
        out.push(ItineraryItem {
            id: r.get(0)?,
            trip_id: r.get(1)?,
            date: parse_date(&date)?,
            time: time
                .as_deref()
                .map(|t| {
                    chrono::NaiveTime::parse_from_str(t, "%H:%M")
                        .with_context(|| format!("Invalid time '{}', expected HH:MM", t))
                })
                .transpose()?,
            activity: r.get(4)?,
            category: ItineraryCategory::parse(&category)?,
            location: r.get(6)?,
            cost: cost
                .as_deref()
                .map(|c| parse_stored_decimal(c, "itinerary cost"))
                .transpose()?,
        });
    }
    Ok(out)
}

/// Materializes the full read-only ledger view consumed by `metrics`.
pub fn load_snapshot(conn: &Connection) -> Result<Snapshot> {
    Ok(Snapshot {
        accounts: load_accounts(conn)?,
        transactions: load_transactions(conn)?,
        subscriptions: load_subscriptions(conn)?,
        debts: load_debts(conn)?,
        goals: load_goals(conn)?,
        budgets: load_budgets(conn)?,
        couples: load_couples(conn)?,
        trips: load_trips(conn)?,
        itinerary: load_itinerary(conn)?,
    })
}
