// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, Weekday};
use rust_decimal::Decimal;

use plana::metrics::recurring::{
    due_in_period, monthly_equivalent, next_occurrence, occurrences_in,
};
use plana::metrics::{Approximation, MetricsError};
use plana::models::{Cadence, Subscription};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn bill(amount: &str, cadence: Cadence) -> Subscription {
    Subscription {
        id: 1,
        name: "Bill".into(),
        amount: amount.parse().unwrap(),
        cadence,
        category: "Bills".into(),
        account_id: 1,
        cancelled: false,
        cancelled_on: None,
    }
}

#[test]
fn monthly_due_today_counts_as_today() {
    let cadence = Cadence::Monthly { due_day: 15 };
    assert_eq!(next_occurrence(&cadence, date(2025, 8, 15)), date(2025, 8, 15));
}

#[test]
fn monthly_rolls_into_next_month_once_passed() {
    let cadence = Cadence::Monthly { due_day: 10 };
    assert_eq!(next_occurrence(&cadence, date(2025, 8, 20)), date(2025, 9, 10));
}

#[test]
fn monthly_due_day_clamps_to_short_months() {
    let cadence = Cadence::Monthly { due_day: 31 };
    assert_eq!(next_occurrence(&cadence, date(2025, 2, 1)), date(2025, 2, 28));
    // Leap year February keeps its 29th.
    assert_eq!(next_occurrence(&cadence, date(2024, 2, 1)), date(2024, 2, 29));
    // Rolling from a 31-day month into a 30-day month also clamps.
    assert_eq!(next_occurrence(&cadence, date(2025, 4, 1)), date(2025, 4, 30));
}

#[test]
fn yearly_fires_on_first_of_due_month() {
    let cadence = Cadence::Yearly { due_month: 6 };
    assert_eq!(next_occurrence(&cadence, date(2025, 3, 5)), date(2025, 6, 1));
    assert_eq!(next_occurrence(&cadence, date(2025, 7, 1)), date(2026, 6, 1));
    // The first of the due month itself still counts.
    assert_eq!(next_occurrence(&cadence, date(2025, 6, 1)), date(2025, 6, 1));
}

#[test]
fn weekly_is_strictly_after_as_of() {
    let cadence = Cadence::Weekly { weekday: Weekday::Mon };
    // 2025-08-18 is a Monday; the next occurrence is the following Monday.
    assert_eq!(next_occurrence(&cadence, date(2025, 8, 18)), date(2025, 8, 25));
    assert_eq!(next_occurrence(&cadence, date(2025, 8, 19)), date(2025, 8, 25));
    assert_eq!(next_occurrence(&cadence, date(2025, 8, 24)), date(2025, 8, 25));
}

#[test]
fn due_in_period_is_half_open() {
    let cadence = Cadence::Monthly { due_day: 1 };
    // September 1st sits at the end bound and must not count for August.
    assert!(!due_in_period(&cadence, date(2025, 8, 2), date(2025, 9, 1)));
    assert!(due_in_period(&cadence, date(2025, 8, 2), date(2025, 9, 2)));
    // Start-at-due-day counts (monthly fires on as_of).
    assert!(due_in_period(&cadence, date(2025, 8, 1), date(2025, 8, 2)));
    // Degenerate window.
    assert!(!due_in_period(&cadence, date(2025, 8, 1), date(2025, 8, 1)));
}

#[test]
fn weekly_occurrences_count_matching_weekdays() {
    let cadence = Cadence::Weekly { weekday: Weekday::Fri };
    // August 2025 has five Fridays: 1, 8, 15, 22, 29. The 1st itself cannot
    // fire because weekly occurrences are strictly after the cursor, so the
    // count from Aug 1 starts at Aug 8.
    assert_eq!(occurrences_in(&cadence, date(2025, 8, 1), date(2025, 9, 1)), 4);
    assert_eq!(occurrences_in(&cadence, date(2025, 7, 31), date(2025, 9, 1)), 5);
}

#[test]
fn monthly_occurrences_in_one_month_is_one() {
    let cadence = Cadence::Monthly { due_day: 26 };
    assert_eq!(occurrences_in(&cadence, date(2025, 8, 1), date(2025, 9, 1)), 1);
}

#[test]
fn monthly_equivalent_monthly_is_exact() {
    let estimate = monthly_equivalent(&bill("12.99", Cadence::Monthly { due_day: 26 }));
    assert_eq!(estimate.value, "12.99".parse::<Decimal>().unwrap());
    assert!(estimate.is_exact());
}

#[test]
fn monthly_equivalent_yearly_divides_by_twelve() {
    let estimate = monthly_equivalent(&bill("120", Cadence::Yearly { due_month: 1 }));
    assert_eq!(estimate.value, Decimal::from(10));
    assert!(estimate.is_exact());
}

#[test]
fn monthly_equivalent_weekly_uses_average_weeks() {
    let estimate = monthly_equivalent(&bill("10", Cadence::Weekly { weekday: Weekday::Mon }));
    assert_eq!(estimate.value, "43.30".parse::<Decimal>().unwrap());
    assert_eq!(estimate.notes, vec![Approximation::WeeklyMonthlyEquivalent]);
}

#[test]
fn unknown_cadence_kind_is_rejected() {
    match Cadence::from_parts("daily", 1) {
        Err(MetricsError::InvalidCadence(kind)) => assert_eq!(kind, "daily"),
        other => panic!("expected InvalidCadence, got {:?}", other),
    }
}

#[test]
fn out_of_range_due_values_are_rejected() {
    assert!(matches!(
        Cadence::from_parts("monthly", 0),
        Err(MetricsError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Cadence::from_parts("monthly", 32),
        Err(MetricsError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Cadence::from_parts("yearly", 13),
        Err(MetricsError::InvalidConfiguration(_))
    ));
    assert!(matches!(
        Cadence::from_parts("weekly", 8),
        Err(MetricsError::InvalidConfiguration(_))
    ));
}

#[test]
fn from_parts_round_trips_through_due_value() {
    for (kind, due) in [("weekly", 3), ("monthly", 28), ("yearly", 12)] {
        let cadence = Cadence::from_parts(kind, due).unwrap();
        assert_eq!(cadence.kind(), kind);
        assert_eq!(cadence.due_value(), due);
    }
}
