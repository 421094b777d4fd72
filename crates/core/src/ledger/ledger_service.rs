//! Profit aggregation over bet collections.
//!
//! The aggregation itself is a set of pure functions over an explicit record
//! list; `LedgerService` binds them to the repository for callers that want a
//! freshly fetched collection per request.

use chrono::{Datelike, NaiveDate};
use log::debug;
use num_traits::Zero;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::ledger_model::{Granularity, ProfitBucket};
use crate::bets::{Bet, BetRepositoryTrait};
use crate::constants::MONTH_LABEL_FORMAT;
use crate::errors::{Result, ValidationError};

/// Sums profit per calendar bucket of the requested granularity.
///
/// Only buckets present in the input appear in the output (gaps are not
/// zero-filled), ordered ascending by bucket start.
pub fn bucket_profit(bets: &[Bet], granularity: Granularity) -> Vec<ProfitBucket> {
    let mut sums: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for bet in bets {
        *sums
            .entry(granularity.bucket_start(bet.bet_date))
            .or_insert_with(Decimal::zero) += bet.profit;
    }

    sums.into_iter()
        .map(|(start, profit)| ProfitBucket {
            label: granularity.label(start),
            start,
            profit,
        })
        .collect()
}

/// Exact sum of profit over the whole collection.
///
/// Equals the sum of any complete bucketing of the same collection at any
/// granularity.
pub fn total_profit(bets: &[Bet]) -> Decimal {
    bets.iter().map(|bet| bet.profit).sum()
}

/// Resolves a month label like "January 2024" to its inclusive date range.
pub fn month_range(month_label: &str) -> Result<(NaiveDate, NaiveDate)> {
    let padded = format!("01 {}", month_label.trim());
    let start = NaiveDate::parse_from_str(&padded, &format!("%d {}", MONTH_LABEL_FORMAT))
        .map_err(|_| {
            ValidationError::InvalidInput(format!(
                "'{}' is not a month label like 'January 2024'",
                month_label
            ))
        })?;

    let (next_year, next_month) = if start.month() == 12 {
        (start.year() + 1, 1)
    } else {
        (start.year(), start.month() + 1)
    };
    let end = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(start);

    Ok((start, end))
}

/// Restricts a collection to bets placed inside the given calendar month,
/// inclusive on both ends.
pub fn filter_by_month(bets: &[Bet], month_label: &str) -> Result<Vec<Bet>> {
    let (start, end) = month_range(month_label)?;
    Ok(bets
        .iter()
        .filter(|bet| bet.bet_date >= start && bet.bet_date <= end)
        .cloned()
        .collect())
}

/// Trait defining the contract for ledger aggregation over stored bets.
pub trait LedgerServiceTrait: Send + Sync {
    fn profit_series(&self, owner_id: &str, granularity: Granularity) -> Result<Vec<ProfitBucket>>;
    fn running_total(&self, owner_id: &str) -> Result<Decimal>;
    /// Daily buckets restricted to one calendar month, for the drill-down chart.
    fn month_detail(&self, owner_id: &str, month_label: &str) -> Result<Vec<ProfitBucket>>;
}

/// Aggregates over a freshly fetched record list on every call; nothing is
/// cached between requests.
pub struct LedgerService {
    bet_repository: Arc<dyn BetRepositoryTrait>,
}

impl LedgerService {
    pub fn new(bet_repository: Arc<dyn BetRepositoryTrait>) -> Self {
        Self { bet_repository }
    }
}

impl LedgerServiceTrait for LedgerService {
    fn profit_series(&self, owner_id: &str, granularity: Granularity) -> Result<Vec<ProfitBucket>> {
        let bets = self.bet_repository.list_by_owner(owner_id)?;
        debug!(
            "Bucketing {} bets for owner {} at {:?} granularity",
            bets.len(),
            owner_id,
            granularity
        );
        Ok(bucket_profit(&bets, granularity))
    }

    fn running_total(&self, owner_id: &str) -> Result<Decimal> {
        let bets = self.bet_repository.list_by_owner(owner_id)?;
        Ok(total_profit(&bets))
    }

    fn month_detail(&self, owner_id: &str, month_label: &str) -> Result<Vec<ProfitBucket>> {
        let bets = self.bet_repository.list_by_owner(owner_id)?;
        let in_month = filter_by_month(&bets, month_label)?;
        Ok(bucket_profit(&in_month, Granularity::Day))
    }
}
