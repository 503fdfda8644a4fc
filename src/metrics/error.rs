// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Failures surfaced by the derivation core. Bad input yields an error value,
/// never a panic, so the caller can render "N/A" instead of crashing.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("{0} '{1}' not found")]
    NotFound(&'static str, String),

    #[error("unrecognized cadence '{0}'")]
    InvalidCadence(String),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The minimum payment does not cover the monthly interest, so the
    /// balance never decreases and the payoff simulation cannot converge.
    #[error(
        "debt '{name}' is non-amortizing: minimum payment {minimum_payment} \
         does not cover monthly interest {monthly_interest}"
    )]
    NonAmortizing {
        name: String,
        minimum_payment: Decimal,
        monthly_interest: Decimal,
    },
}

impl MetricsError {
    pub fn not_found(entity: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound(entity, key.into())
    }
}

/// Intentional precision trade-offs, attached to results so callers can tell
/// "approximate by design" apart from "wrong".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Approximation {
    /// Weekly amounts are scaled by 4.33, the average number of weeks in a
    /// month, not by the exact occurrence count.
    WeeklyMonthlyEquivalent,
    /// Safe-to-spend only subtracts bills still due inside the current
    /// month; bills early next month are not seen.
    SingleMonthBillLookahead,
    /// Next-month expense projections extrapolate the prior month's mean
    /// expense per transaction over thirty days.
    ThirtyDayExpenseExtrapolation,
}

impl Approximation {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::WeeklyMonthlyEquivalent => {
                "weekly amount scaled by 4.33 average weeks per month"
            }
            Self::SingleMonthBillLookahead => {
                "only bills due later in the current month are subtracted"
            }
            Self::ThirtyDayExpenseExtrapolation => {
                "expenses extrapolated from last month's per-transaction mean"
            }
        }
    }
}

/// A derived value plus any approximation notes that went into it.
#[derive(Debug, Clone, Serialize)]
pub struct Estimate<T> {
    pub value: T,
    pub notes: Vec<Approximation>,
}

impl<T> Estimate<T> {
    pub fn exact(value: T) -> Self {
        Self {
            value,
            notes: Vec::new(),
        }
    }

    pub fn approximate(value: T, notes: Vec<Approximation>) -> Self {
        Self { value, notes }
    }

    pub fn is_exact(&self) -> bool {
        self.notes.is_empty()
    }
}
