//! Database model for bets.

use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use wagerbook_core::bets::{Bet, NewBet, Outcome};

/// Database model for bets. Monetary fields are stored as text and converted
/// to `Decimal` at the boundary so no binary floating point is involved.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::bets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BetDB {
    pub id: String,
    pub user_id: String,
    pub bet_date: NaiveDate,
    pub sport: Option<String>,
    pub amount_invested: String,
    pub num_picks: i32,
    pub outcome: String,
    pub amount_paid: String,
    pub profit: String,
    pub created_at: NaiveDateTime,
}

impl BetDB {
    /// Builds a row from validated input. The id is assigned by the
    /// repository just before insert; profit is fixed here, at creation.
    pub fn from_new(owner_id: &str, new_bet: &NewBet) -> Self {
        Self {
            id: String::new(),
            user_id: owner_id.to_string(),
            bet_date: new_bet.bet_date,
            sport: new_bet.sport.clone(),
            amount_invested: new_bet.amount_invested.to_string(),
            num_picks: new_bet.num_picks,
            outcome: new_bet.outcome.as_str().to_string(),
            amount_paid: new_bet.amount_paid.to_string(),
            profit: new_bet.profit().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}

/// Parses a stored decimal column, falling back to zero on corruption.
fn parse_stored_decimal(value: &str, column: &str) -> Decimal {
    Decimal::from_str(value).unwrap_or_else(|e| {
        log::error!("Failed to parse stored {} '{}': {}", column, value, e);
        Decimal::ZERO
    })
}

impl From<BetDB> for Bet {
    fn from(db: BetDB) -> Self {
        let outcome = Outcome::from_str(&db.outcome).unwrap_or_else(|e| {
            log::error!("Failed to parse stored outcome '{}': {}", db.outcome, e);
            Outcome::Lose
        });
        Self {
            id: db.id,
            user_id: db.user_id,
            bet_date: db.bet_date,
            sport: db.sport,
            amount_invested: parse_stored_decimal(&db.amount_invested, "amount_invested"),
            num_picks: db.num_picks,
            outcome,
            amount_paid: parse_stored_decimal(&db.amount_paid, "amount_paid"),
            profit: parse_stored_decimal(&db.profit, "profit"),
            created_at: db.created_at,
        }
    }
}
