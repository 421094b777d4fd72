//! Profit aggregation models.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DAY_LABEL_FORMAT, MONTH_LABEL_FORMAT, YEAR_LABEL_FORMAT};

/// Calendar resolution used to group bets for summation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Granularity {
    Day,
    #[default]
    Month,
    Year,
}

impl Granularity {
    /// First day of the calendar bucket containing `date`.
    pub fn bucket_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Day => date,
            Granularity::Month => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
            Granularity::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
        }
    }

    /// Human-readable bucket label, e.g. "January 2024" for monthly buckets.
    pub fn label(&self, bucket_start: NaiveDate) -> String {
        let format = match self {
            Granularity::Day => DAY_LABEL_FORMAT,
            Granularity::Month => MONTH_LABEL_FORMAT,
            Granularity::Year => YEAR_LABEL_FORMAT,
        };
        bucket_start.format(format).to_string()
    }
}

/// One calendar-aligned time window with its summed profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitBucket {
    pub label: String,
    pub start: NaiveDate,
    pub profit: Decimal,
}
