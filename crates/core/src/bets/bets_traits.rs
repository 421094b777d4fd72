use super::bets_model::{Bet, NewBet};
use super::csv_table::ImportSummary;
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for bet repository operations.
#[async_trait]
pub trait BetRepositoryTrait: Send + Sync {
    fn get_bet(&self, bet_id: &str) -> Result<Bet>;
    /// Returns all bets for the owner, ordered by bet date ascending.
    /// An empty collection is a valid, non-error result.
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Bet>>;
    async fn create_bet(&self, owner_id: &str, new_bet: NewBet) -> Result<Bet>;
    /// Deletes at most one bet, scoped to the owner. Returns the number of
    /// rows removed; 0 means the id was unknown.
    async fn delete_bet(&self, owner_id: &str, bet_id: &str) -> Result<usize>;
    /// Atomically replaces the owner's entire collection with the given rows.
    async fn replace_all(&self, owner_id: &str, new_bets: Vec<NewBet>) -> Result<Vec<Bet>>;
}

/// Trait defining the contract for bet service operations.
#[async_trait]
pub trait BetServiceTrait: Send + Sync {
    fn get_bet(&self, owner_id: &str, bet_id: &str) -> Result<Bet>;
    fn get_bets(&self, owner_id: &str) -> Result<Vec<Bet>>;
    async fn add_bet(&self, owner_id: &str, new_bet: NewBet) -> Result<Bet>;
    /// Removes one bet. Deleting an id that does not exist is a benign no-op.
    async fn delete_bet(&self, owner_id: &str, bet_id: &str) -> Result<()>;
    /// Parses a tabular file and replaces the owner's collection with its
    /// rows. Aborts with a validation error, leaving existing data untouched,
    /// if any required column or row value is bad.
    async fn import_table(&self, owner_id: &str, content: &[u8]) -> Result<ImportSummary>;
    /// Serializes the owner's full collection to the canonical tabular form.
    fn export_table(&self, owner_id: &str) -> Result<String>;
}
