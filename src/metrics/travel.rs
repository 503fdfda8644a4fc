// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::error::MetricsError;
use crate::metrics::snapshot::Snapshot;

/// Spending position of one trip against its budget.
#[derive(Debug, Clone, Serialize)]
pub struct TripSpending {
    pub trip_id: i64,
    /// Absolute value of every transaction tagged with the trip.
    pub spent: Decimal,
    /// Costs attached to itinerary items that have one.
    pub planned_cost: Decimal,
    pub budget: Decimal,
    pub over_budget: bool,
}

pub fn trip_spending(snapshot: &Snapshot, trip_id: i64) -> Result<TripSpending, MetricsError> {
    let trip = snapshot.trip(trip_id)?;
    let spent: Decimal = snapshot
        .transactions
        .iter()
        .filter(|t| t.trip_id == Some(trip_id))
        .map(|t| t.amount.abs())
        .sum();
    let planned_cost: Decimal = snapshot
        .itinerary
        .iter()
        .filter(|i| i.trip_id == trip_id)
        .filter_map(|i| i.cost)
        .sum();
    Ok(TripSpending {
        trip_id,
        spent,
        planned_cost,
        budget: trip.budget,
        over_budget: spent > trip.budget,
    })
}
