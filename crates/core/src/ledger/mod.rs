//! Ledger module - profit aggregation over bet collections.

mod ledger_model;
mod ledger_service;


pub use ledger_model::{Granularity, ProfitBucket};
pub use ledger_service::{
    bucket_profit, filter_by_month, month_range, total_profit, LedgerService, LedgerServiceTrait,
};
