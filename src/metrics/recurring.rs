// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::metrics::error::{Approximation, Estimate};
use crate::models::{Cadence, Subscription};
use crate::utils::{clamped_day_of_month, next_month};

/// Average weeks per month, used to normalize weekly amounts.
pub const WEEKS_PER_MONTH: Decimal = Decimal::from_parts(433, 0, 0, false, 2);

/// Next calendar date on which a cadence fires, looking from `as_of`.
///
/// Monthly and yearly cadences may fire on `as_of` itself; weekly cadences
/// fire strictly after it (a bill due "every Monday" checked on a Monday
/// points at next week). Due days beyond the end of a month clamp to its
/// last day, so a due day of 31 lands on Feb 28/29.
pub fn next_occurrence(cadence: &Cadence, as_of: NaiveDate) -> NaiveDate {
    match cadence {
        Cadence::Monthly { due_day } => {
            let this_month = clamped_day_of_month(as_of.year(), as_of.month(), *due_day);
            if this_month >= as_of {
                this_month
            } else {
                let (y, m) = next_month(as_of.year(), as_of.month());
                clamped_day_of_month(y, m, *due_day)
            }
        }
        Cadence::Yearly { due_month } => {
            let this_year = clamped_day_of_month(as_of.year(), *due_month, 1);
            if this_year >= as_of {
                this_year
            } else {
                clamped_day_of_month(as_of.year() + 1, *due_month, 1)
            }
        }
        Cadence::Weekly { weekday } => {
            let ahead = (i64::from(weekday.num_days_from_monday())
                - i64::from(as_of.weekday().num_days_from_monday()))
            .rem_euclid(7);
            let ahead = if ahead == 0 { 7 } else { ahead };
            as_of + Duration::days(ahead)
        }
    }
}

/// Whether a cadence fires at least once inside the half-open `[start, end)`.
pub fn due_in_period(cadence: &Cadence, start: NaiveDate, end: NaiveDate) -> bool {
    if start >= end {
        return false;
    }
    next_occurrence(cadence, start) < end
}

/// Number of times a cadence fires inside `[start, end)`.
///
/// Monthly and yearly cadences yield 0 or 1 for a one-month window; weekly
/// cadences yield one count per matching weekday.
pub fn occurrences_in(cadence: &Cadence, start: NaiveDate, end: NaiveDate) -> u32 {
    let mut count = 0;
    let mut cursor = start;
    while cursor < end {
        let hit = next_occurrence(cadence, cursor);
        if hit >= end {
            break;
        }
        count += 1;
        cursor = hit + Duration::days(1);
    }
    count
}

/// Normalizes a bill to a monthly amount: monthly unchanged, yearly / 12,
/// weekly x 4.33 (flagged as an approximation).
pub fn monthly_equivalent(subscription: &Subscription) -> Estimate<Decimal> {
    match subscription.cadence {
        Cadence::Monthly { .. } => Estimate::exact(subscription.amount),
        Cadence::Yearly { .. } => Estimate::exact(subscription.amount / Decimal::from(12)),
        Cadence::Weekly { .. } => Estimate::approximate(
            subscription.amount * WEEKS_PER_MONTH,
            vec![Approximation::WeeklyMonthlyEquivalent],
        ),
    }
}

/// Next payment date for a plain monthly due day (used for debts, which are
/// always monthly).
pub fn next_monthly_due(due_day: u32, as_of: NaiveDate) -> NaiveDate {
    next_occurrence(&Cadence::Monthly { due_day }, as_of)
}
