//! Wagerbook Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for the wagerbook ledger.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod bets;
pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod ledger;
pub mod users;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
