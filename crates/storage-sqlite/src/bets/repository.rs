use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::bets;
use crate::schema::bets::dsl::*;

use super::model::BetDB;
use wagerbook_core::bets::{Bet, BetRepositoryTrait, NewBet};
use wagerbook_core::Result;

/// Repository for managing bet records in the database
pub struct BetRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl BetRepository {
    /// Creates a new BetRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl BetRepositoryTrait for BetRepository {
    /// Retrieves a bet by its ID
    fn get_bet(&self, bet_id: &str) -> Result<Bet> {
        let mut conn = get_connection(&self.pool)?;

        let bet = bets
            .select(BetDB::as_select())
            .find(bet_id)
            .first::<BetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(bet.into())
    }

    /// Lists all bets for the owner, oldest bet date first
    fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Bet>> {
        let mut conn = get_connection(&self.pool)?;

        let results = bets
            .filter(user_id.eq(owner_id))
            .select(BetDB::as_select())
            .order((bet_date.asc(), created_at.asc()))
            .load::<BetDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Bet::from).collect())
    }

    async fn create_bet(&self, owner_id: &str, new_bet: NewBet) -> Result<Bet> {
        let owner_owned = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Bet> {
                let mut bet_db = BetDB::from_new(&owner_owned, &new_bet);
                bet_db.id = Uuid::new_v4().to_string();

                diesel::insert_into(bets::table)
                    .values(&bet_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(bet_db.into())
            })
            .await
    }

    /// Deletes one bet scoped to its owner; returns the number of rows
    /// removed so callers can treat an unknown id as a no-op.
    async fn delete_bet(&self, owner_id: &str, bet_id: &str) -> Result<usize> {
        let owner_owned = owner_id.to_string();
        let bet_id_owned = bet_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected_rows = diesel::delete(
                    bets.filter(id.eq(bet_id_owned)).filter(user_id.eq(owner_owned)),
                )
                .execute(conn)
                .map_err(StorageError::from)?;
                Ok(affected_rows)
            })
            .await
    }

    /// Replaces the owner's whole collection in one transaction. The write
    /// actor wraps the job in an immediate transaction, so a failed insert
    /// rolls the delete back too.
    async fn replace_all(&self, owner_id: &str, new_bets: Vec<NewBet>) -> Result<Vec<Bet>> {
        let owner_owned = owner_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Vec<Bet>> {
                diesel::delete(bets.filter(user_id.eq(owner_owned.as_str())))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let rows: Vec<BetDB> = new_bets
                    .iter()
                    .map(|b| {
                        let mut bet_db = BetDB::from_new(&owner_owned, b);
                        bet_db.id = Uuid::new_v4().to_string();
                        bet_db
                    })
                    .collect();

                diesel::insert_into(bets::table)
                    .values(&rows)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(rows.into_iter().map(Bet::from).collect())
            })
            .await
    }
}
