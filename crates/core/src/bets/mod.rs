//! Bets module - domain models, services, and traits.

mod bets_errors;
mod bets_model;
mod bets_service;
mod bets_traits;
mod csv_table;



pub use bets_errors::BetError;
pub use bets_model::{Bet, NewBet, Outcome};
pub use bets_service::BetService;
pub use bets_traits::{BetRepositoryTrait, BetServiceTrait};
pub use csv_table::{parse_table, render_table, ImportSummary, ParsedTable, TableSchema};
