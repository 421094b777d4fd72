use super::users_model::{Identity, NewUser, User};
use crate::Result;
use async_trait::async_trait;

/// Trait defining the contract for user repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    /// Persists a fully constructed user. A duplicate username surfaces as a
    /// unique-violation database error.
    async fn create_user(&self, user: User) -> Result<User>;
}

/// Trait defining the contract for the identity gate.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn register(&self, new_user: NewUser) -> Result<User>;
    fn authenticate(&self, username: &str, password: &str) -> Result<Identity>;
}
