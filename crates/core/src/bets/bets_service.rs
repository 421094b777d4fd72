use log::debug;
use std::sync::Arc;

use super::bets_errors::BetError;
use super::bets_model::{Bet, NewBet};
use super::bets_traits::{BetRepositoryTrait, BetServiceTrait};
use super::csv_table::{self, ImportSummary};
use crate::errors::Result;

/// Service for managing the bet ledger of a single owner per call.
///
/// Every operation takes the owner identity explicitly; the service holds no
/// per-user state between calls.
pub struct BetService {
    repository: Arc<dyn BetRepositoryTrait>,
}

impl BetService {
    /// Creates a new BetService instance
    pub fn new(repository: Arc<dyn BetRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl BetServiceTrait for BetService {
    fn get_bet(&self, owner_id: &str, bet_id: &str) -> Result<Bet> {
        let bet = self.repository.get_bet(bet_id)?;
        if bet.user_id != owner_id {
            return Err(BetError::NotFound(bet_id.to_string()).into());
        }
        Ok(bet)
    }

    fn get_bets(&self, owner_id: &str) -> Result<Vec<Bet>> {
        self.repository.list_by_owner(owner_id)
    }

    async fn add_bet(&self, owner_id: &str, new_bet: NewBet) -> Result<Bet> {
        new_bet.validate()?;
        let normalized = NewBet {
            sport: new_bet.normalized_sport(),
            ..new_bet
        };
        debug!(
            "Adding bet for owner {}: date {}, profit {}",
            owner_id,
            normalized.bet_date,
            normalized.profit()
        );
        self.repository.create_bet(owner_id, normalized).await
    }

    async fn delete_bet(&self, owner_id: &str, bet_id: &str) -> Result<()> {
        let removed = self.repository.delete_bet(owner_id, bet_id).await?;
        if removed == 0 {
            debug!("Delete of unknown bet id {} ignored", bet_id);
        }
        Ok(())
    }

    async fn import_table(&self, owner_id: &str, content: &[u8]) -> Result<ImportSummary> {
        // Parse and validate the whole table before any write; a single bad
        // row aborts the import with existing data untouched.
        let parsed = csv_table::parse_table(content)?;
        let imported = parsed.bets.len();
        self.repository.replace_all(owner_id, parsed.bets).await?;
        debug!(
            "Imported {} bets for owner {} (schema {:?})",
            imported, owner_id, parsed.schema
        );
        Ok(ImportSummary {
            imported,
            schema: parsed.schema,
        })
    }

    fn export_table(&self, owner_id: &str) -> Result<String> {
        let bets = self.repository.list_by_owner(owner_id)?;
        csv_table::render_table(&bets)
    }
}
