use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;

use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::users;
use crate::schema::users::dsl::*;

use super::model::UserDB;
use wagerbook_core::users::{User, UserRepositoryTrait};
use wagerbook_core::Result;

/// Repository for managing user records in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    /// Creates a new UserRepository instance
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn find_by_username(&self, username_param: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;

        let user = users
            .filter(username.eq(username_param))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        Ok(user.map(User::from))
    }

    /// Inserts a fully constructed user. A duplicate username comes back as a
    /// unique-violation database error for the service layer to translate.
    async fn create_user(&self, user: User) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let user_db: UserDB = user.into();

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(user_db.into())
            })
            .await
    }
}
