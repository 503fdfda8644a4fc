// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure derivation core: balance resolution, bill projection, cash-flow
//! aggregation, debt payoff simulation, and couples settlement.
//!
//! Every function here takes an immutable [`snapshot::Snapshot`] (plus an
//! injected "today" where time matters) and returns plain values. Nothing
//! in this module reads the clock, touches the database, or mutates the
//! ledger.

pub mod balance;
pub mod cashflow;
pub mod error;
pub mod goals;
pub mod payoff;
pub mod recurring;
pub mod settlement;
pub mod snapshot;
pub mod travel;

pub use error::{Approximation, Estimate, MetricsError};
pub use snapshot::Snapshot;
