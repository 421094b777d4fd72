//! Bet ledger domain models.

use chrono::{NaiveDate, NaiveDateTime};
use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};

/// Settled outcome of a bet slip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "WIN",
            Outcome::Lose => "LOSE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WIN" | "WON" => Ok(Outcome::Win),
            "LOSE" | "LOSS" | "LOST" => Ok(Outcome::Lose),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown outcome '{}', expected Win or Lose",
                other
            ))),
        }
    }
}

/// Domain model representing one recorded wager.
///
/// A bet never changes after creation; the ledger only appends and removes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: String,
    pub user_id: String,
    pub bet_date: NaiveDate,
    pub sport: Option<String>,
    pub amount_invested: Decimal,
    pub num_picks: i32,
    pub outcome: Outcome,
    pub amount_paid: Decimal,
    /// Payout minus stake, computed once at insert and stored with the record.
    pub profit: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for recording a new bet. `profit` is derived, never supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBet {
    pub bet_date: NaiveDate,
    pub sport: Option<String>,
    pub amount_invested: Decimal,
    pub num_picks: i32,
    pub outcome: Outcome,
    pub amount_paid: Decimal,
}

impl NewBet {
    /// Validates the input before it reaches the store.
    pub fn validate(&self) -> Result<()> {
        if self.amount_invested < Decimal::zero() {
            return Err(ValidationError::InvalidInput(
                "Amount invested cannot be negative".to_string(),
            )
            .into());
        }
        if self.amount_paid < Decimal::zero() {
            return Err(ValidationError::InvalidInput(
                "Amount paid cannot be negative".to_string(),
            )
            .into());
        }
        if self.num_picks < 1 {
            return Err(ValidationError::InvalidInput(
                "Number of picks must be at least 1".to_string(),
            )
            .into());
        }
        if let Some(sport) = &self.sport {
            if sport.trim().is_empty() {
                return Err(ValidationError::MissingField("sport".to_string()).into());
            }
        }
        Ok(())
    }

    /// Payout minus stake. The store persists exactly this value.
    pub fn profit(&self) -> Decimal {
        self.amount_paid - self.amount_invested
    }

    /// Sport label with surrounding whitespace removed; blank collapses to None.
    pub fn normalized_sport(&self) -> Option<String> {
        self.sport
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }
}
