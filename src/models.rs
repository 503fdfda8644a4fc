// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::metrics::error::MetricsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
    Crypto,
    Loan,
    Other,
}

impl AccountType {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "checking" => Ok(Self::Checking),
            "savings" => Ok(Self::Savings),
            "credit" => Ok(Self::Credit),
            "cash" => Ok(Self::Cash),
            "investment" => Ok(Self::Investment),
            "crypto" => Ok(Self::Crypto),
            "loan" => Ok(Self::Loan),
            "other" => Ok(Self::Other),
            _ => Err(MetricsError::InvalidConfiguration(format!(
                "unknown account type '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Savings => "savings",
            Self::Credit => "credit",
            Self::Cash => "cash",
            Self::Investment => "investment",
            Self::Crypto => "crypto",
            Self::Loan => "loan",
            Self::Other => "other",
        }
    }

    /// Accounts counted as spendable cash in liquidity rollups.
    pub fn is_liquid(&self) -> bool {
        matches!(self, Self::Checking | Self::Savings)
    }
}

/// One half of a couple. Settlement math is symmetric in the two members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Member {
    A,
    B,
}

impl Member {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "a" | "A" | "member-a" => Ok(Self::A),
            "b" | "B" | "member-b" => Ok(Self::B),
            _ => Err(MetricsError::InvalidConfiguration(format!(
                "unknown member '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "member-a",
            Self::B => "member-b",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ownership {
    MemberA,
    MemberB,
    Joint,
}

impl Ownership {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "member-a" => Ok(Self::MemberA),
            "member-b" => Ok(Self::MemberB),
            "joint" => Ok(Self::Joint),
            _ => Err(MetricsError::InvalidConfiguration(format!(
                "unknown ownership '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemberA => "member-a",
            Self::MemberB => "member-b",
            Self::Joint => "joint",
        }
    }

    pub fn member(&self) -> Option<Member> {
        match self {
            Self::MemberA => Some(Member::A),
            Self::MemberB => Some(Member::B),
            Self::Joint => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub kind: AccountType,
    /// Opening balance; the resolved balance is this plus all transaction deltas.
    pub initial_balance: Decimal,
    pub archived: bool,
    pub ownership: Option<Ownership>,
}

impl Account {
    pub fn is_joint(&self) -> bool {
        matches!(self.ownership, Some(Ownership::Joint))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "transfer" => Ok(Self::Transfer),
            _ => Err(MetricsError::InvalidConfiguration(format!(
                "unknown transaction type '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Transfer => "transfer",
        }
    }
}

/// Amounts are signed: income positive, expenses negative. Aggregators sum
/// income as-is and expenses by absolute value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub account_id: i64,
    pub amount: Decimal,
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    pub paid_by: Option<Member>,
    pub trip_id: Option<i64>,
}

/// Recurrence of a bill. The due value means a different thing per cadence,
/// so each variant carries its own field rather than one overloaded number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "cadence", rename_all = "lowercase")]
pub enum Cadence {
    Weekly { weekday: Weekday },
    Monthly { due_day: u32 },
    Yearly { due_month: u32 },
}

impl Cadence {
    /// Builds a cadence from its stored `(kind, due)` pair.
    ///
    /// Weekly due values are ISO weekday numbers (1 = Monday .. 7 = Sunday),
    /// monthly 1-31, yearly 1-12.
    pub fn from_parts(kind: &str, due: u32) -> Result<Self, MetricsError> {
        match kind {
            "weekly" => {
                let weekday = match due {
                    1 => Weekday::Mon,
                    2 => Weekday::Tue,
                    3 => Weekday::Wed,
                    4 => Weekday::Thu,
                    5 => Weekday::Fri,
                    6 => Weekday::Sat,
                    7 => Weekday::Sun,
                    _ => {
                        return Err(MetricsError::InvalidConfiguration(format!(
                            "weekly due value {} outside 1-7",
                            due
                        )));
                    }
                };
                Ok(Self::Weekly { weekday })
            }
            "monthly" => {
                if !(1..=31).contains(&due) {
                    return Err(MetricsError::InvalidConfiguration(format!(
                        "monthly due day {} outside 1-31",
                        due
                    )));
                }
                Ok(Self::Monthly { due_day: due })
            }
            "yearly" => {
                if !(1..=12).contains(&due) {
                    return Err(MetricsError::InvalidConfiguration(format!(
                        "yearly due month {} outside 1-12",
                        due
                    )));
                }
                Ok(Self::Yearly { due_month: due })
            }
            _ => Err(MetricsError::InvalidCadence(kind.to_string())),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Weekly { .. } => "weekly",
            Self::Monthly { .. } => "monthly",
            Self::Yearly { .. } => "yearly",
        }
    }

    /// The stored due value for this cadence (inverse of [`Cadence::from_parts`]).
    pub fn due_value(&self) -> u32 {
        match self {
            Self::Weekly { weekday } => weekday.number_from_monday(),
            Self::Monthly { due_day } => *due_day,
            Self::Yearly { due_month } => *due_month,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub name: String,
    pub amount: Decimal,
    #[serde(flatten)]
    pub cadence: Cadence,
    pub category: String,
    pub account_id: i64,
    /// Soft delete: cancelled bills keep their history but drop out of
    /// every forward-looking computation.
    pub cancelled: bool,
    pub cancelled_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    Snowball,
    Avalanche,
}

impl Strategy {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "snowball" => Ok(Self::Snowball),
            "avalanche" => Ok(Self::Avalanche),
            _ => Err(MetricsError::InvalidConfiguration(format!(
                "unknown payoff strategy '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snowball => "snowball",
            Self::Avalanche => "avalanche",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    pub balance: Decimal,
    /// Annual percentage rate, e.g. 19.99 for 19.99%.
    pub apr: Decimal,
    pub minimum_payment: Decimal,
    pub due_day: u32,
    pub account_id: i64,
    pub strategy_override: Option<Strategy>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub target_amount: Decimal,
    pub current_amount: Decimal,
    pub due_date: Option<NaiveDate>,
    pub shared: bool,
}

impl Goal {
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    pub fn remaining(&self) -> Decimal {
        (self.target_amount - self.current_amount).max(Decimal::ZERO)
    }

    /// Fraction saved in [0, 1]; a zero target counts as complete.
    pub fn progress(&self) -> Decimal {
        if self.target_amount <= Decimal::ZERO {
            return Decimal::ONE;
        }
        (self.current_amount / self.target_amount).min(Decimal::ONE)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckInCadence {
    Weekly,
    Biweekly,
    Monthly,
}

impl CheckInCadence {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "biweekly" => Ok(Self::Biweekly),
            "monthly" => Ok(Self::Monthly),
            _ => Err(MetricsError::InvalidCadence(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Biweekly => "biweekly",
            Self::Monthly => "monthly",
        }
    }

    pub fn days(&self) -> i64 {
        match self {
            Self::Weekly => 7,
            Self::Biweekly => 14,
            Self::Monthly => 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouplesSettings {
    pub enabled: bool,
    /// Monthly discretionary allowance per member.
    pub fun_money_allowance: Decimal,
    /// Expenses at or above this amount are expected to be discussed first.
    pub joint_threshold: Decimal,
    pub check_in: CheckInCadence,
    pub last_check_in: Option<NaiveDate>,
}

impl Default for CouplesSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            fun_money_allowance: Decimal::ZERO,
            joint_threshold: Decimal::ZERO,
            check_in: CheckInCadence::Monthly,
            last_check_in: None,
        }
    }
}

/// Per-category budget line for one month (`YYYY-MM`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub month: String,
    pub category: String,
    pub budgeted: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItineraryCategory {
    Flight,
    Stay,
    Food,
    Activity,
    Transport,
    Other,
}

impl ItineraryCategory {
    pub fn parse(s: &str) -> Result<Self, MetricsError> {
        match s {
            "flight" => Ok(Self::Flight),
            "stay" => Ok(Self::Stay),
            "food" => Ok(Self::Food),
            "activity" => Ok(Self::Activity),
            "transport" => Ok(Self::Transport),
            "other" => Ok(Self::Other),
            _ => Err(MetricsError::InvalidConfiguration(format!(
                "unknown itinerary category '{}'",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flight => "flight",
            Self::Stay => "stay",
            Self::Food => "food",
            Self::Activity => "activity",
            Self::Transport => "transport",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub id: i64,
    pub trip_id: i64,
    pub date: NaiveDate,
    pub time: Option<NaiveTime>,
    pub activity: String,
    pub category: ItineraryCategory,
    pub location: Option<String>,
    pub cost: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub name: String,
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub budget: Decimal,
    pub archived: bool,
}
