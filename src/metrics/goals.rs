// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::snapshot::Snapshot;
use crate::models::Goal;

/// Rollup across every goal that is still being saved toward.
#[derive(Debug, Clone, Serialize)]
pub struct GoalSummary {
    pub active: usize,
    pub completed: usize,
    pub total_target: Decimal,
    pub total_saved: Decimal,
}

pub fn summarize_goals(snapshot: &Snapshot) -> GoalSummary {
    let (completed, active): (Vec<&Goal>, Vec<&Goal>) =
        snapshot.goals.iter().partition(|g| g.is_reached());
    GoalSummary {
        active: active.len(),
        completed: completed.len(),
        total_target: active.iter().map(|g| g.target_amount).sum(),
        total_saved: active.iter().map(|g| g.current_amount).sum(),
    }
}

/// Days until a goal's due date; negative when overdue, None without one.
pub fn days_remaining(goal: &Goal, today: NaiveDate) -> Option<i64> {
    goal.due_date.map(|due| (due - today).num_days())
}
