// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use plana::metrics::goals::{days_remaining, summarize_goals};
use plana::metrics::travel::trip_spending;
use plana::metrics::{MetricsError, Snapshot};
use plana::models::{
    Goal, ItineraryCategory, ItineraryItem, Transaction, TransactionType, Trip,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn goal(id: i64, target: &str, current: &str, due: Option<NaiveDate>) -> Goal {
    Goal {
        id,
        name: format!("goal-{}", id),
        target_amount: target.parse().unwrap(),
        current_amount: current.parse().unwrap(),
        due_date: due,
        shared: false,
    }
}

fn trip(id: i64, budget: &str) -> Trip {
    Trip {
        id,
        name: format!("trip-{}", id),
        destination: "Lisbon".into(),
        start_date: date(2025, 10, 3),
        end_date: date(2025, 10, 10),
        budget: budget.parse().unwrap(),
        archived: false,
    }
}

#[test]
fn goal_progress_and_remaining() {
    let g = goal(1, "1000", "250", None);
    assert!(!g.is_reached());
    assert_eq!(g.remaining(), Decimal::from(750));
    assert_eq!(g.progress(), "0.25".parse::<Decimal>().unwrap());

    let done = goal(2, "500", "600", None);
    assert!(done.is_reached());
    assert_eq!(done.remaining(), Decimal::ZERO);
    assert_eq!(done.progress(), Decimal::ONE);

    // A zero target counts as complete rather than dividing by zero.
    assert_eq!(goal(3, "0", "0", None).progress(), Decimal::ONE);
}

#[test]
fn goal_summary_counts_only_active_totals() {
    let snapshot = Snapshot {
        goals: vec![
            goal(1, "1000", "250", None),
            goal(2, "500", "600", None),
            goal(3, "2000", "100", None),
        ],
        ..Default::default()
    };
    let summary = summarize_goals(&snapshot);
    assert_eq!(summary.active, 2);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.total_target, Decimal::from(3000));
    assert_eq!(summary.total_saved, Decimal::from(350));
}

#[test]
fn days_remaining_is_signed() {
    let today = date(2025, 8, 26);
    let ahead = goal(1, "100", "0", Some(date(2025, 9, 5)));
    let behind = goal(2, "100", "0", Some(date(2025, 8, 20)));
    let open_ended = goal(3, "100", "0", None);
    assert_eq!(days_remaining(&ahead, today), Some(10));
    assert_eq!(days_remaining(&behind, today), Some(-6));
    assert_eq!(days_remaining(&open_ended, today), None);
}

#[test]
fn trip_spending_tallies_tagged_transactions_and_itinerary_costs() {
    let snapshot = Snapshot {
        trips: vec![trip(1, "2000")],
        transactions: vec![
            Transaction {
                id: 1,
                account_id: 1,
                amount: "-450".parse().unwrap(),
                kind: TransactionType::Expense,
                category: "Travel".into(),
                date: date(2025, 10, 4),
                paid_by: None,
                trip_id: Some(1),
            },
            Transaction {
                id: 2,
                account_id: 1,
                amount: "-80".parse().unwrap(),
                kind: TransactionType::Expense,
                category: "Food".into(),
                date: date(2025, 10, 5),
                paid_by: None,
                trip_id: None,
            },
        ],
        itinerary: vec![
            ItineraryItem {
                id: 1,
                trip_id: 1,
                date: date(2025, 10, 3),
                time: None,
                activity: "Flight out".into(),
                category: ItineraryCategory::Flight,
                location: None,
                cost: Some("320".parse().unwrap()),
            },
            ItineraryItem {
                id: 2,
                trip_id: 1,
                date: date(2025, 10, 4),
                time: None,
                activity: "Tram tour".into(),
                category: ItineraryCategory::Activity,
                location: Some("Alfama".into()),
                cost: None,
            },
        ],
        ..Default::default()
    };
    let spending = trip_spending(&snapshot, 1).unwrap();
    assert_eq!(spending.spent, Decimal::from(450));
    assert_eq!(spending.planned_cost, Decimal::from(320));
    assert_eq!(spending.budget, Decimal::from(2000));
    assert!(!spending.over_budget);
}

#[test]
fn trip_spending_flags_over_budget() {
    let snapshot = Snapshot {
        trips: vec![trip(1, "100")],
        transactions: vec![Transaction {
            id: 1,
            account_id: 1,
            amount: "-150".parse().unwrap(),
            kind: TransactionType::Expense,
            category: "Travel".into(),
            date: date(2025, 10, 4),
            paid_by: None,
            trip_id: Some(1),
        }],
        ..Default::default()
    };
    assert!(trip_spending(&snapshot, 1).unwrap().over_budget);
}

#[test]
fn unknown_trip_fails_lookup() {
    let snapshot = Snapshot::default();
    assert!(matches!(
        trip_spending(&snapshot, 9),
        Err(MetricsError::NotFound(entity, _)) if entity == "trip"
    ));
}
